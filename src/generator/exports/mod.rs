pub mod clash;
pub mod proxy_to_clash;

pub use clash::{proxy_to_clash, render_clash_yaml, AssembleOptions, ClashDocument};
pub use proxy_to_clash::{check_policy, proxy_to_clash_vless, ExportOptions};
