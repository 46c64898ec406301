use std::collections::BTreeMap;

use serde::Serialize;

use crate::models::{ProxyGroupConfig, ProxyGroupType};

fn is_empty_option_string(s: &Option<String>) -> bool {
    s.as_ref().map_or(true, |s| s.is_empty())
}

fn is_empty_option_vec(v: &Option<Vec<String>>) -> bool {
    v.as_ref().map_or(true, |v| v.is_empty())
}

/// Common proxy options shared by every Clash proxy entry
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub struct CommonProxyOptions {
    pub name: String,
    pub server: String,
    pub port: u16,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub udp: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tfo: Option<bool>,
    #[serde(skip_serializing_if = "is_empty_option_string")]
    pub ip_version: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tls: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub skip_cert_verify: Option<bool>,
    #[serde(skip_serializing_if = "is_empty_option_string")]
    pub client_fingerprint: Option<String>,
}

impl CommonProxyOptions {
    /// Create a new CommonProxyOptions with every optional field unset
    pub fn new(name: String, server: String, port: u16) -> Self {
        Self {
            name,
            server,
            port,
            udp: None,
            tfo: None,
            ip_version: None,
            tls: None,
            skip_cert_verify: None,
            client_fingerprint: None,
        }
    }

    /// Create a builder for CommonProxyOptions
    pub fn builder(name: String, server: String, port: u16) -> CommonProxyOptionsBuilder {
        CommonProxyOptionsBuilder {
            common: Self::new(name, server, port),
        }
    }
}

/// Builder for CommonProxyOptions
pub struct CommonProxyOptionsBuilder {
    common: CommonProxyOptions,
}

impl CommonProxyOptionsBuilder {
    pub fn udp(mut self, value: Option<bool>) -> Self {
        self.common.udp = value;
        self
    }

    pub fn tfo(mut self, value: Option<bool>) -> Self {
        self.common.tfo = value;
        self
    }

    pub fn ip_version(mut self, value: Option<String>) -> Self {
        self.common.ip_version = value;
        self
    }

    pub fn build(self) -> CommonProxyOptions {
        self.common
    }
}

/// `reality-opts`
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub struct RealityOptions {
    pub public_key: String,
    pub short_id: String,
}

/// `http-opts`, used by tcp links with `headerType=http`
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct HttpOptions {
    pub method: String,
    pub path: Vec<String>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub headers: BTreeMap<String, Vec<String>>,
}

/// `ws-opts`
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct WsOptions {
    #[serde(skip_serializing_if = "is_empty_option_string")]
    pub path: Option<String>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub headers: BTreeMap<String, String>,
}

/// `grpc-opts`; the service name is kept even when empty
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub struct GrpcOptions {
    pub grpc_service_name: String,
}

/// Represents a single proxy in Clash configuration
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(tag = "type")]
pub enum ClashProxy {
    #[serde(rename = "vless")]
    Vless {
        #[serde(flatten)]
        common: CommonProxyOptions,
        uuid: String,
        #[serde(skip_serializing_if = "is_empty_option_string")]
        flow: Option<String>,
        #[serde(skip_serializing_if = "is_empty_option_string")]
        servername: Option<String>,
        #[serde(skip_serializing_if = "is_empty_option_vec")]
        alpn: Option<Vec<String>>,
        #[serde(rename = "reality-opts", skip_serializing_if = "Option::is_none")]
        reality_opts: Option<RealityOptions>,
        #[serde(rename = "spider-x", skip_serializing_if = "is_empty_option_string")]
        spider_x: Option<String>,
        network: String,
        #[serde(rename = "http-opts", skip_serializing_if = "Option::is_none")]
        http_opts: Option<HttpOptions>,
        #[serde(rename = "ws-opts", skip_serializing_if = "Option::is_none")]
        ws_opts: Option<WsOptions>,
        #[serde(rename = "grpc-opts", skip_serializing_if = "Option::is_none")]
        grpc_opts: Option<GrpcOptions>,
    },
}

impl ClashProxy {
    /// Create a new VLESS proxy over bare tcp with no security fields
    pub fn new_vless(common: CommonProxyOptions, uuid: String) -> Self {
        ClashProxy::Vless {
            common,
            uuid,
            flow: None,
            servername: None,
            alpn: None,
            reality_opts: None,
            spider_x: None,
            network: "tcp".to_string(),
            http_opts: None,
            ws_opts: None,
            grpc_opts: None,
        }
    }
}

/// Trait for common operations on all ClashProxy variants
pub trait ClashProxyCommon {
    /// Get a reference to the common options
    fn common(&self) -> &CommonProxyOptions;

    /// Get a mutable reference to the common options
    fn common_mut(&mut self) -> &mut CommonProxyOptions;

    fn name(&self) -> &str {
        &self.common().name
    }

    fn set_name(&mut self, value: String) {
        self.common_mut().name = value;
    }
}

impl ClashProxyCommon for ClashProxy {
    fn common(&self) -> &CommonProxyOptions {
        match self {
            ClashProxy::Vless { common, .. } => common,
        }
    }

    fn common_mut(&mut self) -> &mut CommonProxyOptions {
        match self {
            ClashProxy::Vless { common, .. } => common,
        }
    }
}

/// Represents a proxy group in Clash configuration
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(tag = "type")]
pub enum ClashProxyGroup {
    #[serde(rename = "select")]
    Select { name: String, proxies: Vec<String> },
    #[serde(rename = "url-test")]
    UrlTest {
        name: String,
        url: String,
        interval: u32,
        tolerance: u32,
        #[serde(skip_serializing_if = "Option::is_none")]
        lazy: Option<bool>,
        proxies: Vec<String>,
    },
}

impl ClashProxyGroup {
    pub fn name(&self) -> &str {
        match self {
            ClashProxyGroup::Select { name, .. } | ClashProxyGroup::UrlTest { name, .. } => name,
        }
    }

    pub fn proxies(&self) -> &[String] {
        match self {
            ClashProxyGroup::Select { proxies, .. } | ClashProxyGroup::UrlTest { proxies, .. } => {
                proxies
            }
        }
    }
}

impl From<&ProxyGroupConfig> for ClashProxyGroup {
    fn from(group: &ProxyGroupConfig) -> Self {
        match group.group_type {
            ProxyGroupType::Select => ClashProxyGroup::Select {
                name: group.name.clone(),
                proxies: group.proxies.clone(),
            },
            ProxyGroupType::URLTest => ClashProxyGroup::UrlTest {
                name: group.name.clone(),
                url: group.url.clone(),
                interval: group.interval,
                tolerance: group.tolerance,
                lazy: group.lazy,
                proxies: group.proxies.clone(),
            },
        }
    }
}

/// Convert group configurations to their Clash output form, keeping order
pub fn convert_proxy_groups(groups: &[ProxyGroupConfig]) -> Vec<ClashProxyGroup> {
    groups.iter().map(ClashProxyGroup::from).collect()
}
