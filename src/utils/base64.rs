use base64::{engine::general_purpose, Engine as _};

/// Decodes a Base64 string to its original form.
///
/// Whitespace (line-wrapped blobs) is ignored, and both the standard and the
/// URL-safe alphabets are accepted, with or without padding.
///
/// # Returns
/// The decoded text, or `None` if the input is not valid Base64 or not UTF-8.
pub fn base64_decode(input: &str) -> Option<String> {
    let compact: String = input.chars().filter(|c| !c.is_whitespace()).collect();
    if compact.is_empty() {
        return None;
    }
    let standard = url_safe_base64_reverse(compact.trim_end_matches('='));

    let decoded = general_purpose::STANDARD_NO_PAD.decode(standard).ok()?;
    String::from_utf8(decoded).ok()
}

/// Reverses a URL-safe Base64 string to standard Base64 format.
pub fn url_safe_base64_reverse(input: &str) -> String {
    input.replace('-', "+").replace('_', "/")
}
