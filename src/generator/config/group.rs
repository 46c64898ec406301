//! Group generation utilities
//!
//! Builds the three generated proxy groups: the manual selector, the
//! latency-tested auto group and the region-direct selector.

use crate::models::{ProxyGroupConfig, ProxyGroupConfigs, ProxyGroupType};
use crate::settings::GroupSettings;

/// Built-in policy that bypasses every proxy
pub const DIRECT: &str = "DIRECT";
/// Built-in policy that drops the connection
pub const REJECT: &str = "REJECT";

/// Generates the proxy groups for `names`, which must already be unique.
///
/// * select: auto group, `DIRECT`, then every node in input order
/// * url-test: every node in input order
/// * region direct: `DIRECT`, then the select group
pub fn group_generate(names: &[String], groups: &GroupSettings) -> ProxyGroupConfigs {
    let mut select = ProxyGroupConfig::new(groups.select_name.clone(), ProxyGroupType::Select);
    select.proxies = Vec::with_capacity(names.len() + 2);
    select.proxies.push(groups.auto_name.clone());
    select.proxies.push(DIRECT.to_string());
    select.proxies.extend(names.iter().cloned());

    let mut auto = ProxyGroupConfig::new(groups.auto_name.clone(), ProxyGroupType::URLTest);
    auto.url = groups.test_url.clone();
    auto.interval = groups.interval;
    auto.tolerance = groups.tolerance;
    auto.lazy = groups.lazy;
    auto.proxies = names.to_vec();

    let mut direct = ProxyGroupConfig::new(groups.direct_name.clone(), ProxyGroupType::Select);
    direct.proxies = vec![DIRECT.to_string(), groups.select_name.clone()];

    vec![select, auto, direct]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_group_generate() {
        let settings = GroupSettings::default();
        let names = vec!["A".to_string(), "B".to_string()];
        let groups = group_generate(&names, &settings);

        assert_eq!(groups.len(), 3);

        assert_eq!(groups[0].name, settings.select_name);
        assert_eq!(groups[0].group_type, ProxyGroupType::Select);
        assert_eq!(
            groups[0].proxies,
            vec![settings.auto_name.clone(), "DIRECT".into(), "A".into(), "B".into()]
        );

        assert_eq!(groups[1].type_str(), "url-test");
        assert_eq!(groups[1].proxies, names);
        assert_eq!(groups[1].interval, 300);
        assert_eq!(groups[1].tolerance, 50);

        assert_eq!(groups[2].name, settings.direct_name);
        assert_eq!(
            groups[2].proxies,
            vec!["DIRECT".to_string(), settings.select_name.clone()]
        );
    }
}
