//! Base template holding the static sections of the output document

use log::{info, warn};
use serde_yaml::{Mapping, Value as YamlValue};

use crate::error::ConvertError;
use crate::utils::file_get;

/// Template shipped with the binary
pub const BUILTIN_BASE: &str = include_str!("../../base/clash_base.yaml");

/// Keys the generator owns; a template value under one of these is discarded
pub const GENERATED_KEYS: [&str; 3] = ["proxies", "proxy-groups", "rules"];

/// The static part of the Clash document (listener, DNS, TUN, sniffer,
/// rule-providers, ...), kept in template key order.
#[derive(Debug, Clone, PartialEq)]
pub struct BaseTemplate {
    root: Mapping,
}

impl BaseTemplate {
    /// Parse a template. An empty document is an empty mapping; anything that
    /// is not a mapping is refused.
    pub fn from_content(content: &str) -> Result<Self, ConvertError> {
        let value: YamlValue = serde_yaml::from_str(content)?;
        let root = match value {
            YamlValue::Null => Mapping::new(),
            YamlValue::Mapping(map) => map,
            _ => {
                return Err(ConvertError::Template(
                    "base template must be a YAML mapping".to_string(),
                ))
            }
        };

        for key in GENERATED_KEYS {
            if root.contains_key(key) {
                warn!("Base template key `{}` will be replaced by generated content", key);
            }
        }
        Ok(BaseTemplate { root })
    }

    pub fn builtin() -> Result<Self, ConvertError> {
        Self::from_content(BUILTIN_BASE)
    }

    /// Load from `path`, or the built-in template when `path` is empty
    pub fn load(path: &str) -> Result<Self, ConvertError> {
        if path.trim().is_empty() {
            return Self::builtin();
        }
        info!("Loading base template from {}", path);
        let content = file_get(path)
            .map_err(|e| ConvertError::Template(format!("cannot read {}: {}", path, e)))?;
        Self::from_content(&content)
    }

    /// Names defined under `rule-providers`
    pub fn rule_providers(&self) -> Vec<String> {
        self.root
            .get("rule-providers")
            .and_then(YamlValue::as_mapping)
            .map(|providers| {
                providers
                    .keys()
                    .filter_map(YamlValue::as_str)
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default()
    }

    pub fn has_rule_provider(&self, name: &str) -> bool {
        self.rule_providers().iter().any(|p| p == name)
    }

    pub fn as_mapping(&self) -> &Mapping {
        &self.root
    }
}
