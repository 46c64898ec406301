//! Fixed routing rules
//!
//! Clash evaluates rules top to bottom and stops at the first match, so the
//! order below is part of the output contract: blocking first, region bypass
//! next, `MATCH` always last.

use super::group::{DIRECT, REJECT};
use crate::settings::{GroupSettings, RuleSettings};

pub fn rules_generate(rules: &RuleSettings, groups: &GroupSettings) -> Vec<String> {
    let direct_group = &groups.direct_name;

    let mut result = vec![
        format!("RULE-SET,{},{}", rules.ads_ruleset, REJECT),
        format!("RULE-SET,{},{}", rules.domain_ruleset, direct_group),
        format!("RULE-SET,{},{}", rules.ip_ruleset, direct_group),
    ];
    if let Some(suffix) = rules.domain_suffix.as_deref().filter(|s| !s.is_empty()) {
        result.push(format!("DOMAIN-SUFFIX,{},{}", suffix, direct_group));
    }
    result.push(format!("GEOIP,PRIVATE,{}", DIRECT));
    result.push(format!("GEOIP,{},{}", rules.geoip_code, direct_group));
    result.push(format!("MATCH,{}", groups.select_name));
    result
}

/// Rule-set names the generated rules refer to
pub fn referenced_rulesets(rules: &RuleSettings) -> [&str; 3] {
    [
        rules.ads_ruleset.as_str(),
        rules.domain_ruleset.as_str(),
        rules.ip_ruleset.as_str(),
    ]
}
