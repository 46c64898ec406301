use std::fmt;
use std::str::FromStr;

use serde::Deserialize;

/// Which security modes are allowed into the output.
///
/// | policy | none | tls | reality + keys | reality w/o keys |
/// |---|---|---|---|---|
/// | `Permissive` | yes | yes | yes | yes, no `reality-opts` |
/// | `RequireTls` | no | yes | yes | yes, no `reality-opts` |
/// | `RealityOnly` | no | no | yes | no |
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum SecurityPolicy {
    #[default]
    Permissive,
    RequireTls,
    RealityOnly,
}

impl SecurityPolicy {
    pub fn as_str(self) -> &'static str {
        match self {
            SecurityPolicy::Permissive => "permissive",
            SecurityPolicy::RequireTls => "require-tls",
            SecurityPolicy::RealityOnly => "reality-only",
        }
    }
}

impl fmt::Display for SecurityPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SecurityPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().replace('_', "-").as_str() {
            "permissive" => Ok(SecurityPolicy::Permissive),
            "require-tls" => Ok(SecurityPolicy::RequireTls),
            "reality-only" => Ok(SecurityPolicy::RealityOnly),
            other => Err(format!("unknown security policy: {}", other)),
        }
    }
}
