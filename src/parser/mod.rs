//! Link parsers: text in, [`crate::Proxy`] values out

pub mod explodes;
pub mod parse_settings;

pub use explodes::{explode_sub, explode_vless, ExplodeReport, ParsedLine, SkippedLine};
pub use parse_settings::{LabelFallback, ParseSettings};
