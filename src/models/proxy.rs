//! Proxy model definitions
//!
//! Contains the normalized view of a single `vless://` link.

use std::fmt;

/// TLS layer requested by a link's `security` parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SecurityMode {
    #[default]
    None,
    Tls,
    Reality,
}

impl SecurityMode {
    /// Map a `security` query value onto a mode. Empty means `none`.
    pub fn from_param(value: &str) -> Option<Self> {
        match value.to_ascii_lowercase().as_str() {
            "" | "none" => Some(SecurityMode::None),
            "tls" => Some(SecurityMode::Tls),
            "reality" => Some(SecurityMode::Reality),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            SecurityMode::None => "none",
            SecurityMode::Tls => "tls",
            SecurityMode::Reality => "reality",
        }
    }

    pub fn is_tls(self) -> bool {
        !matches!(self, SecurityMode::None)
    }
}

impl fmt::Display for SecurityMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Stream framing requested by a link's `type` parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TransportMode {
    #[default]
    Tcp,
    WebSocket,
    Grpc,
}

impl TransportMode {
    pub fn from_param(value: &str) -> Option<Self> {
        match value.to_ascii_lowercase().as_str() {
            "" | "tcp" | "raw" => Some(TransportMode::Tcp),
            "ws" | "websocket" => Some(TransportMode::WebSocket),
            "grpc" | "gun" => Some(TransportMode::Grpc),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            TransportMode::Tcp => "tcp",
            TransportMode::WebSocket => "ws",
            TransportMode::Grpc => "grpc",
        }
    }
}

impl fmt::Display for TransportMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A parsed and defaulted `vless://` link.
///
/// `sni` and `fingerprint` are always filled (host and the configured default
/// fingerprint respectively); every other optional parameter stays `None` when
/// the link did not carry it.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Proxy {
    /// Display label, not yet unique
    pub remark: String,
    pub hostname: String,
    pub port: u16,
    /// The UUID from the userinfo part
    pub user_id: String,

    pub security: SecurityMode,
    pub transport: TransportMode,

    pub sni: String,
    pub fingerprint: String,
    pub alpn: Vec<String>,
    /// Reality `pbk`
    pub public_key: Option<String>,
    /// Reality `sid`
    pub short_id: Option<String>,
    /// Reality `spx`
    pub spider_x: Option<String>,
    pub flow: Option<String>,

    /// Already cut at its first `?`
    pub path: Option<String>,
    /// `host` parameter, used as the Host header
    pub host: Option<String>,
    pub service_name: Option<String>,
    /// `headerType`; `http` turns tcp into an HTTP-masquerade transport
    pub header_type: Option<String>,
}

impl Proxy {
    pub fn has_reality_keys(&self) -> bool {
        self.public_key.is_some() && self.short_id.is_some()
    }

    pub fn is_http_masquerade(&self) -> bool {
        self.transport == TransportMode::Tcp
            && self
                .header_type
                .as_deref()
                .is_some_and(|t| t.eq_ignore_ascii_case("http"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_has_reality_keys() {
        let mut proxy = Proxy {
            security: SecurityMode::Reality,
            public_key: Some("KEY".to_string()),
            ..Default::default()
        };
        assert!(!proxy.has_reality_keys());

        proxy.short_id = Some("ab".to_string());
        assert!(proxy.has_reality_keys());
    }
}
