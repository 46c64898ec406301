use std::time::Duration;

use log::debug;
use reqwest::{Client, Proxy, StatusCode};

/// Default timeout for HTTP requests in seconds
pub const DEFAULT_TIMEOUT: u64 = 15;

#[derive(Debug, Clone, Default)]
pub struct ProxyConfig {
    pub proxy: Option<String>,
}

pub fn parse_proxy(proxy_str: &str) -> ProxyConfig {
    let proxy_str = proxy_str.trim();
    if proxy_str.is_empty() || proxy_str.eq_ignore_ascii_case("NONE") {
        return ProxyConfig { proxy: None };
    }
    ProxyConfig {
        proxy: Some(proxy_str.to_string()),
    }
}

/// Makes an HTTP GET request to the specified URL
///
/// # Arguments
/// * `url` - The URL to request
/// * `proxy_config` - Optional upstream proxy (e.g., "http://127.0.0.1:8080")
/// * `timeout` - Whole-request deadline in seconds
///
/// # Returns
/// * `Ok(String)` - The response body as a string
/// * `Err(String)` - Error message if the request failed or returned a non-200 status
pub async fn web_get_async(
    url: &str,
    proxy_config: &ProxyConfig,
    timeout: u64,
) -> Result<String, String> {
    let mut client_builder = Client::builder()
        .timeout(Duration::from_secs(timeout))
        .user_agent(concat!("vless2clash/", env!("CARGO_PKG_VERSION")));

    if let Some(proxy) = &proxy_config.proxy {
        match Proxy::all(proxy) {
            Ok(proxy) => {
                client_builder = client_builder.proxy(proxy);
            }
            Err(e) => {
                return Err(format!("Failed to set proxy: {}", e));
            }
        }
    }

    let client = client_builder
        .build()
        .map_err(|e| format!("Failed to build HTTP client: {}", e))?;

    debug!("GET {}", url);
    let response = client
        .get(url)
        .send()
        .await
        .map_err(|e| format!("Failed to send request: {}", e))?;

    if response.status() != StatusCode::OK {
        return Err(format!("HTTP error: {}", response.status()));
    }

    response
        .text()
        .await
        .map_err(|e| format!("Failed to read response body: {}", e))
}

/// Synchronous version of web_get_async, driven by a current-thread tokio runtime
pub fn web_get(url: &str, proxy_config: &ProxyConfig, timeout: u64) -> Result<String, String> {
    let rt = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|e| format!("Failed to create tokio runtime: {}", e))?;

    rt.block_on(web_get_async(url, proxy_config, timeout))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_proxy() {
        assert_eq!(parse_proxy("").proxy, None);
        assert_eq!(parse_proxy("NONE").proxy, None);
        assert_eq!(
            parse_proxy("socks5://127.0.0.1:1080").proxy.as_deref(),
            Some("socks5://127.0.0.1:1080")
        );
    }
}
