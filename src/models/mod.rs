//! Core data models for the application
//!
//! This module contains the primary data structures used throughout the application,
//! separated from the logic that operates on them.
//!
//! # Usage
//!
//! ```rust
//! use vless2clash::models::{Proxy, SecurityMode, TransportMode};
//!
//! let mut proxy = Proxy::default();
//! proxy.hostname = "example.com".to_string();
//! proxy.port = 443;
//! proxy.security = SecurityMode::Reality;
//! assert_eq!(proxy.transport, TransportMode::Tcp);
//! ```

pub mod proxy;
pub mod proxy_group_config;
pub mod security_policy;

pub use proxy::*;
pub use proxy_group_config::{ProxyGroupConfig, ProxyGroupConfigs, ProxyGroupType};
pub use security_policy::SecurityPolicy;
