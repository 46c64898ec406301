//! Convert lists of `vless://` links into a Clash Meta configuration.

pub mod error;
pub mod generator;
pub mod interfaces;
pub mod models;
pub mod parser;
pub mod settings;
pub mod utils;

// Re-export the main proxy types for easier access
pub use models::{Proxy, SecurityMode, SecurityPolicy, TransportMode};

// Re-export configuration types
pub use error::{ConvertError, ExplodeError, PolicyError};
pub use interfaces::{convert_content, subconverter, ConvertResult};
pub use settings::{BaseTemplate, Settings};
