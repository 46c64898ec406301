use std::fs;
use std::path::Path;

/// Checks if a file exists at the given path
pub fn file_exists(path: &str) -> bool {
    Path::new(path).is_file()
}

/// Read the contents of a file as a string
pub fn file_get(path: &str) -> Result<String, std::io::Error> {
    fs::read_to_string(path)
}

/// Write `content` to `path`, creating missing parent directories first.
pub fn file_write(path: &str, content: &str) -> Result<(), std::io::Error> {
    if let Some(parent) = Path::new(path).parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    fs::write(path, content)
}
