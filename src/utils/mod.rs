pub mod base64;
pub mod file;
pub mod http_std;
pub mod string;
pub mod url;

// Re-export common utilities
pub use file::{file_exists, file_get, file_write};
pub use http_std::web_get;
pub use string::truncate_excerpt;
