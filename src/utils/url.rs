//! URL encoding/decoding utilities

/// Decodes a URL-encoded string
///
/// # Arguments
/// * `input` - The URL-encoded string to decode
///
/// # Returns
/// * String containing the decoded input
/// * Returns the original string if decoding fails
///
/// # Examples
/// ```
/// use vless2clash::utils::url::url_decode;
///
/// let decoded = url_decode("%F0%9F%87%A9%F0%9F%87%AA%20Node");
/// assert_eq!(decoded, "🇩🇪 Node");
/// ```
pub fn url_decode(input: &str) -> String {
    urlencoding::decode(input)
        .map(|cow| cow.into_owned())
        .unwrap_or_else(|_| input.to_string())
}

/// Returns `true` for `http://` and `https://` locations
pub fn is_link(link: &str) -> bool {
    let lower = link.trim_start().to_ascii_lowercase();
    lower.starts_with("http://") || lower.starts_with("https://")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_decode_invalid_utf8_keeps_input() {
        assert_eq!(url_decode("%FF%FE"), "%FF%FE");
        assert_eq!(url_decode("plain"), "plain");
    }

    #[test]
    fn test_is_link() {
        assert!(is_link("https://raw.githubusercontent.com/a/b.txt"));
        assert!(is_link("HTTP://example.com"));
        assert!(!is_link("./servers.txt"));
    }
}
