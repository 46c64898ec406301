//! Proxy → Clash proxy entry
//!
//! Fragments are applied in a fixed order: base identity fields, then the
//! security fragment, then the transport fragment. Each fragment only writes
//! keys it owns, so a later one never overwrites `name`, `server`, `port` or
//! `uuid`.

use std::collections::BTreeMap;

use crate::error::PolicyError;
use crate::generator::yaml::clash_output::{
    ClashProxy, CommonProxyOptions, GrpcOptions, HttpOptions, RealityOptions, WsOptions,
};
use crate::models::{Proxy, SecurityMode, SecurityPolicy, TransportMode};
use crate::settings::Settings;

/// Per-node switches that end up on every emitted entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportOptions {
    pub policy: SecurityPolicy,
    pub udp: Option<bool>,
    pub tfo: Option<bool>,
    pub ip_version: Option<String>,
    /// Applied to `security=tls` entries only. On by default: connectivity is
    /// preferred over certificate validation for these feeds.
    pub skip_cert_verify: bool,
}

impl Default for ExportOptions {
    fn default() -> Self {
        ExportOptions {
            policy: SecurityPolicy::Permissive,
            udp: Some(true),
            tfo: None,
            ip_version: None,
            skip_cert_verify: true,
        }
    }
}

impl From<&Settings> for ExportOptions {
    fn from(settings: &Settings) -> Self {
        ExportOptions {
            policy: settings.common.security_policy,
            udp: settings.node.udp,
            tfo: settings.node.tfo,
            ip_version: settings.node.ip_version.clone(),
            skip_cert_verify: settings.node.skip_cert_verify,
        }
    }
}

/// Refuse nodes the policy does not allow.
pub fn check_policy(node: &Proxy, policy: SecurityPolicy) -> Result<(), PolicyError> {
    let allowed = match policy {
        SecurityPolicy::Permissive => true,
        SecurityPolicy::RequireTls => node.security.is_tls(),
        SecurityPolicy::RealityOnly => node.security == SecurityMode::Reality,
    };
    if !allowed {
        return Err(PolicyError::SecurityNotAllowed {
            security: node.security,
            policy,
        });
    }

    if policy == SecurityPolicy::RealityOnly && !node.has_reality_keys() {
        let missing = if node.public_key.is_none() {
            "public key (pbk)"
        } else {
            "short id (sid)"
        };
        return Err(PolicyError::MissingRealityKey(missing));
    }
    Ok(())
}

/// Build the Clash entry for one VLESS node.
///
/// The entry's name is the node's provisional remark; uniqueness is settled
/// later by [`crate::generator::config::remark::NameRegistry`].
pub fn proxy_to_clash_vless(node: &Proxy, opts: &ExportOptions) -> Result<ClashProxy, PolicyError> {
    check_policy(node, opts.policy)?;

    let common = CommonProxyOptions::builder(node.remark.clone(), node.hostname.clone(), node.port)
        .udp(opts.udp)
        .tfo(opts.tfo)
        .ip_version(opts.ip_version.clone())
        .build();
    let mut proxy = ClashProxy::new_vless(common, node.user_id.clone());

    apply_security(&mut proxy, node, opts);
    apply_transport(&mut proxy, node);

    Ok(proxy)
}

fn apply_security(proxy: &mut ClashProxy, node: &Proxy, opts: &ExportOptions) {
    let ClashProxy::Vless {
        common,
        flow,
        servername,
        alpn,
        reality_opts,
        spider_x,
        ..
    } = proxy;

    *flow = node.flow.clone();

    if !node.security.is_tls() {
        return;
    }

    common.tls = Some(true);
    common.client_fingerprint = Some(node.fingerprint.clone());
    *servername = Some(node.sni.clone());

    match node.security {
        SecurityMode::Tls => {
            if !node.alpn.is_empty() {
                *alpn = Some(node.alpn.clone());
            }
            common.skip_cert_verify = Some(opts.skip_cert_verify);
        }
        SecurityMode::Reality => {
            if node.has_reality_keys() {
                *reality_opts = Some(RealityOptions {
                    public_key: node.public_key.clone().unwrap_or_default(),
                    short_id: node.short_id.clone().unwrap_or_default(),
                });
            }
            *spider_x = node.spider_x.clone();
        }
        SecurityMode::None => {}
    }
}

fn apply_transport(proxy: &mut ClashProxy, node: &Proxy) {
    let ClashProxy::Vless {
        network,
        http_opts,
        ws_opts,
        grpc_opts,
        ..
    } = proxy;

    match node.transport {
        TransportMode::Tcp if node.is_http_masquerade() => {
            let mut headers = BTreeMap::new();
            if let Some(host) = &node.host {
                headers.insert("Host".to_string(), vec![host.clone()]);
            }
            *network = "http".to_string();
            *http_opts = Some(HttpOptions {
                method: "GET".to_string(),
                path: vec![node.path.clone().unwrap_or_else(|| "/".to_string())],
                headers,
            });
        }
        TransportMode::Tcp => {
            *network = "tcp".to_string();
        }
        TransportMode::WebSocket => {
            let mut headers = BTreeMap::new();
            if let Some(host) = &node.host {
                headers.insert("Host".to_string(), host.clone());
            }
            *network = "ws".to_string();
            *ws_opts = Some(WsOptions {
                path: node.path.clone(),
                headers,
            });
        }
        TransportMode::Grpc => {
            *network = "grpc".to_string();
            *grpc_opts = Some(GrpcOptions {
                grpc_service_name: node.service_name.clone().unwrap_or_default(),
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::yaml::clash_output::ClashProxyCommon;
    use crate::parser::{explode_vless, ParseSettings};
    use serde_yaml::Value;

    fn build(link: &str, opts: &ExportOptions) -> Result<Value, PolicyError> {
        let node = explode_vless(link, &ParseSettings::default()).unwrap();
        proxy_to_clash_vless(&node, opts).map(|p| serde_yaml::to_value(p).unwrap())
    }

    #[test]
    fn test_reality_entry() {
        let v = build(
            "vless://uuid1@1.2.3.4:443?security=reality&pbk=KEY&sid=ABCD&sni=example.com#MyNode",
            &ExportOptions::default(),
        )
        .unwrap();

        assert_eq!(v["name"].as_str(), Some("MyNode"));
        assert_eq!(v["tls"].as_bool(), Some(true));
        assert_eq!(v["servername"].as_str(), Some("example.com"));
        assert_eq!(v["client-fingerprint"].as_str(), Some("chrome"));
        assert_eq!(v["reality-opts"]["public-key"].as_str(), Some("KEY"));
        assert_eq!(v["reality-opts"]["short-id"].as_str(), Some("ABCD"));
        assert_eq!(v["network"].as_str(), Some("tcp"));
        assert!(v.get("skip-cert-verify").is_none());
    }

    #[test]
    fn test_tls_entry_skips_verification_and_splits_alpn() {
        let v = build(
            "vless://u@h.example:443?security=tls&alpn=h2,http/1.1",
            &ExportOptions::default(),
        )
        .unwrap();

        assert_eq!(v["skip-cert-verify"].as_bool(), Some(true));
        assert_eq!(v["alpn"][0].as_str(), Some("h2"));
        assert_eq!(v["alpn"][1].as_str(), Some("http/1.1"));
        assert_eq!(v["servername"].as_str(), Some("h.example"));
        assert!(v.get("reality-opts").is_none());
    }

    #[test]
    fn test_plain_entry_has_no_tls_keys() {
        let v = build("vless://u@h.example:80", &ExportOptions::default()).unwrap();
        for key in ["tls", "servername", "client-fingerprint", "skip-cert-verify", "alpn", "flow"] {
            assert!(v.get(key).is_none(), "unexpected key {}", key);
        }
        assert_eq!(v["network"].as_str(), Some("tcp"));
    }

    #[test]
    fn test_reality_without_keys_permissive() {
        let v = build(
            "vless://u@h.example:443?security=reality&pbk=KEY",
            &ExportOptions::default(),
        )
        .unwrap();
        assert_eq!(v["tls"].as_bool(), Some(true));
        assert!(v.get("reality-opts").is_none());
    }

    #[test]
    fn test_reality_only_policy() {
        let opts = ExportOptions {
            policy: SecurityPolicy::RealityOnly,
            ..Default::default()
        };
        assert_eq!(
            build("vless://u@h.example:443?security=reality&pbk=KEY", &opts),
            Err(PolicyError::MissingRealityKey("short id (sid)"))
        );
        assert_eq!(
            build("vless://u@h.example:443?security=tls", &opts),
            Err(PolicyError::SecurityNotAllowed {
                security: SecurityMode::Tls,
                policy: SecurityPolicy::RealityOnly,
            })
        );
        assert!(build("vless://u@h.example:443?security=reality&pbk=K&sid=1", &opts).is_ok());
    }

    #[test]
    fn test_require_tls_policy_rejects_missing_security() {
        let opts = ExportOptions {
            policy: SecurityPolicy::RequireTls,
            ..Default::default()
        };
        assert!(build("vless://u@h.example:443", &opts).is_err());
        assert!(build("vless://u@h.example:443?security=reality", &opts).is_ok());
    }

    #[test]
    fn test_transport_fragments() {
        let opts = ExportOptions::default();

        let ws = build("vless://u@h.example:443?type=ws&path=/ray&host=cdn.example", &opts).unwrap();
        assert_eq!(ws["network"].as_str(), Some("ws"));
        assert_eq!(ws["ws-opts"]["path"].as_str(), Some("/ray"));
        assert_eq!(ws["ws-opts"]["headers"]["Host"].as_str(), Some("cdn.example"));

        let grpc = build("vless://u@h.example:443?type=grpc", &opts).unwrap();
        assert_eq!(grpc["network"].as_str(), Some("grpc"));
        assert_eq!(grpc["grpc-opts"]["grpc-service-name"].as_str(), Some(""));

        let http = build("vless://u@h.example:80?headerType=http&host=a.example", &opts).unwrap();
        assert_eq!(http["network"].as_str(), Some("http"));
        assert_eq!(http["http-opts"]["method"].as_str(), Some("GET"));
        assert_eq!(http["http-opts"]["path"][0].as_str(), Some("/"));
        assert_eq!(http["http-opts"]["headers"]["Host"][0].as_str(), Some("a.example"));
    }

    #[test]
    fn test_base_fields_survive_fragments() {
        let node = explode_vless(
            "vless://u@h.example:443?security=tls&type=ws&host=other.example#N",
            &ParseSettings::default(),
        )
        .unwrap();
        let proxy = proxy_to_clash_vless(&node, &ExportOptions::default()).unwrap();
        assert_eq!(proxy.common().server, "h.example");
        assert_eq!(proxy.common().port, 443);
        assert_eq!(proxy.name(), "N");
    }

    #[test]
    fn test_reality_only_reports_missing_public_key_first() {
        let opts = ExportOptions {
            policy: SecurityPolicy::RealityOnly,
            ..Default::default()
        };
        assert_eq!(
            build("vless://u@h.example:443?security=reality", &opts),
            Err(PolicyError::MissingRealityKey("public key (pbk)"))
        );
        assert_eq!(
            build("vless://u@h.example:443?security=reality&sid=1", &opts),
            Err(PolicyError::MissingRealityKey("public key (pbk)"))
        );
    }
}
