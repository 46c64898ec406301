pub mod common;
pub mod vless;

pub use common::{explode_sub, ExplodeReport, ParsedLine, SkippedLine};
pub use vless::explode_vless;
