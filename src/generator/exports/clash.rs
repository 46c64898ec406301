//! Clash document assembly
//!
//! Combines the uniquely named proxy entries with the base template and the
//! generated groups and rules.

use log::{debug, warn};
use serde_yaml::{Mapping, Value as YamlValue};

use crate::error::ConvertError;
use crate::generator::config::group::group_generate;
use crate::generator::config::remark::NameRegistry;
use crate::generator::config::ruleconvert::{referenced_rulesets, rules_generate};
use crate::generator::yaml::clash_output::{
    convert_proxy_groups, ClashProxy, ClashProxyCommon, ClashProxyGroup,
};
use crate::settings::{BaseTemplate, GroupSettings, RuleSettings};

/// Everything the generator contributes to the document
#[derive(Debug, Clone, PartialEq)]
pub struct ClashDocument {
    pub proxies: Vec<ClashProxy>,
    pub proxy_groups: Vec<ClashProxyGroup>,
    pub rules: Vec<String>,
}

impl ClashDocument {
    pub fn proxy_names(&self) -> Vec<&str> {
        self.proxies.iter().map(|p| p.name()).collect()
    }
}

/// Assembler inputs that come from settings
#[derive(Debug, Clone, Copy)]
pub struct AssembleOptions<'a> {
    pub groups: &'a GroupSettings,
    pub rules: &'a RuleSettings,
    pub name_separator: &'a str,
}

/// Give every entry its final name, then derive groups and rules from those names.
///
/// `proxies` must be in input order; a fresh [`NameRegistry`] is used for the
/// call so repeated runs over the same input produce the same names.
pub fn generate_document(mut proxies: Vec<ClashProxy>, opts: &AssembleOptions) -> ClashDocument {
    let mut registry = NameRegistry::new(opts.name_separator);
    let reserved = [
        opts.groups.select_name.as_str(),
        opts.groups.auto_name.as_str(),
        opts.groups.direct_name.as_str(),
        "DIRECT",
        "REJECT",
    ];
    for name in reserved {
        // group and policy names share the namespace with proxies
        registry.resolve(name);
    }

    for proxy in proxies.iter_mut() {
        let unique = registry.resolve(proxy.name());
        if unique != proxy.name() {
            debug!("Renaming duplicate proxy `{}` to `{}`", proxy.name(), unique);
            proxy.set_name(unique);
        }
    }

    let names: Vec<String> = proxies.iter().map(|p| p.name().to_string()).collect();
    let groups = group_generate(&names, opts.groups);

    ClashDocument {
        proxies,
        proxy_groups: convert_proxy_groups(&groups),
        rules: rules_generate(opts.rules, opts.groups),
    }
}

/// Convert proxies to a full Clash configuration
///
/// Template keys keep their order; `proxies`, `proxy-groups` and `rules`
/// replace same-named template keys in place, or are appended in that order.
pub fn proxy_to_clash(
    proxies: Vec<ClashProxy>,
    base: &BaseTemplate,
    opts: &AssembleOptions,
) -> Result<(Mapping, ClashDocument), ConvertError> {
    for ruleset in referenced_rulesets(opts.rules) {
        if !base.has_rule_provider(ruleset) {
            warn!(
                "Rule-set `{}` is not defined under rule-providers in the base template",
                ruleset
            );
        }
    }

    let document = generate_document(proxies, opts);

    let mut root = base.as_mapping().clone();
    root.insert(
        YamlValue::from("proxies"),
        serde_yaml::to_value(&document.proxies)?,
    );
    root.insert(
        YamlValue::from("proxy-groups"),
        serde_yaml::to_value(&document.proxy_groups)?,
    );
    root.insert(
        YamlValue::from("rules"),
        serde_yaml::to_value(&document.rules)?,
    );

    Ok((root, document))
}

/// Serialize the assembled document. Non-ASCII labels are written as-is.
pub fn render_clash_yaml(root: &Mapping) -> Result<String, ConvertError> {
    Ok(serde_yaml::to_string(root)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::yaml::clash_output::CommonProxyOptions;

    fn proxy(name: &str) -> ClashProxy {
        ClashProxy::new_vless(
            CommonProxyOptions::new(name.to_string(), "1.2.3.4".to_string(), 443),
            "id".to_string(),
        )
    }

    fn options<'a>(groups: &'a GroupSettings, rules: &'a RuleSettings) -> AssembleOptions<'a> {
        AssembleOptions {
            groups,
            rules,
            name_separator: "_",
        }
    }

    #[test]
    fn test_generate_document_names_and_groups() {
        let groups = GroupSettings::default();
        let rules = RuleSettings::default();
        let doc = generate_document(
            vec![proxy("Node"), proxy("Node"), proxy("Other")],
            &options(&groups, &rules),
        );

        assert_eq!(doc.proxy_names(), vec!["Node", "Node_1", "Other"]);
        assert_eq!(doc.proxy_groups.len(), 3);
        assert_eq!(
            doc.proxy_groups[0].proxies(),
            &[
                groups.auto_name.clone(),
                "DIRECT".to_string(),
                "Node".to_string(),
                "Node_1".to_string(),
                "Other".to_string()
            ]
        );
        assert_eq!(doc.rules.last().unwrap(), &format!("MATCH,{}", groups.select_name));
    }

    #[test]
    fn test_proxy_named_like_a_group_is_renamed() {
        let groups = GroupSettings::default();
        let rules = RuleSettings::default();
        let doc = generate_document(vec![proxy("DIRECT")], &options(&groups, &rules));
        assert_eq!(doc.proxy_names(), vec!["DIRECT_1"]);
    }

    #[test]
    fn test_proxy_to_clash_keeps_template_order() {
        let groups = GroupSettings::default();
        let rules = RuleSettings::default();
        let base = BaseTemplate::from_content("mixed-port: 7890\nrules: [\"MATCH,DIRECT\"]\ndns:\n  enable: true\n")
            .unwrap();

        let (root, _) = proxy_to_clash(vec![proxy("A")], &base, &options(&groups, &rules)).unwrap();
        let keys: Vec<&str> = root.keys().filter_map(YamlValue::as_str).collect();

        assert_eq!(keys, vec!["mixed-port", "rules", "dns", "proxies", "proxy-groups"]);
        assert_eq!(root.get("rules").and_then(YamlValue::as_sequence).map(Vec::len), Some(6));
    }

    #[test]
    fn test_render_keeps_unicode() {
        let groups = GroupSettings::default();
        let rules = RuleSettings::default();
        let base = BaseTemplate::builtin().unwrap();
        let (root, _) =
            proxy_to_clash(vec![proxy("🇩🇪 Frankfurt")], &base, &options(&groups, &rules)).unwrap();
        let text = render_clash_yaml(&root).unwrap();

        assert!(text.contains("🇩🇪 Frankfurt"));
        assert!(text.contains("🚀 Proxy"));
    }
}
