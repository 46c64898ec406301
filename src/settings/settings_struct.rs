use log::debug;
use serde::Deserialize;

use crate::error::ConvertError;
use crate::generator::config::remark::DEFAULT_NAME_SEPARATOR;
use crate::models::SecurityPolicy;
use crate::parser::parse_settings::{LabelFallback, DEFAULT_FINGERPRINT};
use crate::utils::file_get;
use crate::utils::http_std::DEFAULT_TIMEOUT;

pub const DEFAULT_SOURCE: &str = "https://raw.githubusercontent.com/x45fh56/tgs/refs/heads/main/Servers/Protocols/Categorized_Servers/1_VLESS_REALITY_TCP.txt";
pub const DEFAULT_OUTPUT: &str = "clash_iran.yaml";
pub const DEFAULT_TEST_URL: &str = "http://www.gstatic.com/generate_204";

/// Settings structure holding one run's configuration
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct Settings {
    pub common: CommonSettings,
    pub node: NodeSettings,
    pub groups: GroupSettings,
    pub rules: RuleSettings,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct CommonSettings {
    /// URL or local path of the link list
    pub source: String,
    pub output: String,
    /// Base template path; empty selects the built-in one
    pub base_path: String,
    pub security_policy: SecurityPolicy,
    /// Seconds
    pub fetch_timeout: u64,
    /// Upstream proxy for the download, empty or `NONE` for a direct fetch
    pub proxy: String,
}

impl Default for CommonSettings {
    fn default() -> Self {
        CommonSettings {
            source: DEFAULT_SOURCE.to_string(),
            output: DEFAULT_OUTPUT.to_string(),
            base_path: String::new(),
            security_policy: SecurityPolicy::Permissive,
            fetch_timeout: DEFAULT_TIMEOUT,
            proxy: String::new(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct NodeSettings {
    pub label_fallback: LabelFallback,
    pub name_separator: String,
    pub default_fingerprint: String,
    pub udp: Option<bool>,
    pub tfo: Option<bool>,
    pub ip_version: Option<String>,
    pub skip_cert_verify: bool,
}

impl Default for NodeSettings {
    fn default() -> Self {
        NodeSettings {
            label_fallback: LabelFallback::HostPort,
            name_separator: DEFAULT_NAME_SEPARATOR.to_string(),
            default_fingerprint: DEFAULT_FINGERPRINT.to_string(),
            udp: Some(true),
            tfo: Some(false),
            ip_version: Some("ipv4-prefer".to_string()),
            skip_cert_verify: true,
        }
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct GroupSettings {
    pub select_name: String,
    pub auto_name: String,
    /// Region-direct group
    pub direct_name: String,
    pub test_url: String,
    /// Seconds
    pub interval: u32,
    /// Milliseconds
    pub tolerance: u32,
    pub lazy: Option<bool>,
}

impl Default for GroupSettings {
    fn default() -> Self {
        GroupSettings {
            select_name: "🚀 Proxy".to_string(),
            auto_name: "⚡ Auto".to_string(),
            direct_name: "🇮🇷 Iran Direct".to_string(),
            test_url: DEFAULT_TEST_URL.to_string(),
            interval: 300,
            tolerance: 50,
            lazy: None,
        }
    }
}

/// Names used by the fixed routing rules. The rule-set names must match keys
/// of the template's `rule-providers`.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct RuleSettings {
    pub ads_ruleset: String,
    pub domain_ruleset: String,
    pub ip_ruleset: String,
    pub geoip_code: String,
    pub domain_suffix: Option<String>,
}

impl Default for RuleSettings {
    fn default() -> Self {
        RuleSettings {
            ads_ruleset: "Ads".to_string(),
            domain_ruleset: "Iran_Domains".to_string(),
            ip_ruleset: "Iran_IP".to_string(),
            geoip_code: "IR".to_string(),
            domain_suffix: None,
        }
    }
}

impl Settings {
    /// Create a new settings instance with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse settings text. Content with a top-level `common:` key is read as
    /// YAML, anything else as TOML.
    pub fn load_from_content(content: &str) -> Result<Self, ConvertError> {
        let is_yaml = content
            .lines()
            .any(|line| line.trim_end().starts_with("common:"));

        let settings: Settings = if is_yaml {
            debug!("Reading settings as YAML");
            serde_yaml::from_str(content)?
        } else {
            debug!("Reading settings as TOML");
            toml::from_str(content)?
        };
        settings.validate()?;
        Ok(settings)
    }

    pub fn load_from_file(path: &str) -> Result<Self, ConvertError> {
        let content = file_get(path)
            .map_err(|e| ConvertError::Config(format!("cannot read {}: {}", path, e)))?;
        Self::load_from_content(&content)
    }

    pub fn validate(&self) -> Result<(), ConvertError> {
        if self.common.source.trim().is_empty() {
            return Err(ConvertError::Config("common.source is empty".to_string()));
        }
        if self.common.output.trim().is_empty() {
            return Err(ConvertError::Config("common.output is empty".to_string()));
        }
        let groups = &self.groups;
        let names = [&groups.select_name, &groups.auto_name, &groups.direct_name];
        if names.iter().any(|n| n.trim().is_empty()) {
            return Err(ConvertError::Config("group names must not be empty".to_string()));
        }
        if groups.select_name == groups.auto_name
            || groups.select_name == groups.direct_name
            || groups.auto_name == groups.direct_name
        {
            return Err(ConvertError::Config("group names must be distinct".to_string()));
        }
        if self.node.name_separator.is_empty() {
            return Err(ConvertError::Config("node.name_separator is empty".to_string()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.common.security_policy, SecurityPolicy::Permissive);
        assert_eq!(settings.node.udp, Some(true));
        assert_eq!(settings.groups.interval, 300);
        assert_eq!(settings.rules.geoip_code, "IR");
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_rejects_clashing_group_names() {
        let mut settings = Settings::default();
        settings.groups.auto_name = settings.groups.select_name.clone();
        assert!(matches!(settings.validate(), Err(ConvertError::Config(_))));
    }
}
