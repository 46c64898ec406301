//! Error types
//!
//! Per-line failures (`ExplodeError`, `PolicyError`) are recoverable and only
//! cause the offending line to be skipped. `ConvertError` aborts the run.

use thiserror::Error;

use crate::models::{SecurityMode, SecurityPolicy};

/// Reasons a single link cannot be turned into a [`crate::Proxy`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ExplodeError {
    #[error("unsupported scheme, expected vless://")]
    UnsupportedScheme,

    #[error("malformed link: {0}")]
    Malformed(#[from] url::ParseError),

    #[error("missing user id")]
    MissingUserId,

    #[error("missing host")]
    MissingHost,

    #[error("missing port")]
    MissingPort,

    #[error("invalid port")]
    InvalidPort,

    #[error("unsupported security mode: {0}")]
    UnsupportedSecurity(String),

    #[error("unsupported transport type: {0}")]
    UnsupportedTransport(String),
}

/// Reasons a parsed link is refused by the configured [`SecurityPolicy`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PolicyError {
    #[error("security mode `{security}` is not allowed by the `{policy}` policy")]
    SecurityNotAllowed {
        security: SecurityMode,
        policy: SecurityPolicy,
    },

    #[error("reality link is missing {0}")]
    MissingRealityKey(&'static str),
}

/// Run-level failures.
#[derive(Error, Debug)]
pub enum ConvertError {
    #[error("Network error: {0}")]
    Fetch(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to write {path}: {source}")]
    Write {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Template error: {0}")]
    Template(String),

    #[error("no valid proxies found in {lines} input lines")]
    NoValidProxies { lines: usize },
}
