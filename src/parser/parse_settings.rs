use serde::Deserialize;

use crate::settings::Settings;

/// Fingerprint applied when a link carries no `fp` parameter
pub const DEFAULT_FINGERPRINT: &str = "chrome";

/// How to label a link that has no `#fragment`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LabelFallback {
    /// `host:port`, deterministic
    #[default]
    HostPort,
    /// `VLESS-` followed by six random hex digits
    Random,
}

/// Controls the behavior of the link parsers
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseSettings {
    pub label_fallback: LabelFallback,
    pub default_fingerprint: String,
}

impl Default for ParseSettings {
    fn default() -> Self {
        ParseSettings {
            label_fallback: LabelFallback::HostPort,
            default_fingerprint: DEFAULT_FINGERPRINT.to_string(),
        }
    }
}

impl From<&Settings> for ParseSettings {
    fn from(settings: &Settings) -> Self {
        ParseSettings {
            label_fallback: settings.node.label_fallback,
            default_fingerprint: settings.node.default_fingerprint.clone(),
        }
    }
}
