//! Settings module
//!
//! Run configuration (`Settings`) and the static document template
//! (`BaseTemplate`).

pub mod settings_struct;
pub mod template;

pub use settings_struct::{CommonSettings, GroupSettings, NodeSettings, RuleSettings, Settings};
pub use template::BaseTemplate;
