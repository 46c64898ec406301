pub mod config;
pub mod exports;
pub mod yaml;

// Re-export group and rule generation
pub use config::group::group_generate;
pub use config::remark::NameRegistry;
pub use config::ruleconvert::rules_generate;

// Re-export format converters
pub use exports::{
    proxy_to_clash, proxy_to_clash_vless, render_clash_yaml, AssembleOptions, ClashDocument,
    ExportOptions,
};
