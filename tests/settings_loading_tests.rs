use vless2clash::parser::LabelFallback;
use vless2clash::{ConvertError, SecurityPolicy, Settings};

#[cfg(test)]
mod settings_loading_tests {
    use super::*;

    #[test]
    fn test_settings_toml() {
        let toml_content = r#"
[common]
source = "./servers.txt"
output = "out/clash.yaml"
security_policy = "reality-only"
fetch_timeout = 30

[node]
label_fallback = "random"
name_separator = "-"

[groups]
select_name = "Proxy"
auto_name = "Auto"
direct_name = "Direct"
lazy = true

[rules]
domain_suffix = "ir"
"#;

        let settings = Settings::load_from_content(toml_content).unwrap();

        assert_eq!(settings.common.source, "./servers.txt");
        assert_eq!(settings.common.output, "out/clash.yaml");
        assert_eq!(settings.common.security_policy, SecurityPolicy::RealityOnly);
        assert_eq!(settings.common.fetch_timeout, 30);
        assert_eq!(settings.node.label_fallback, LabelFallback::Random);
        assert_eq!(settings.node.name_separator, "-");
        assert_eq!(settings.groups.select_name, "Proxy");
        assert_eq!(settings.groups.lazy, Some(true));
        assert_eq!(settings.groups.interval, 300);
        assert_eq!(settings.rules.domain_suffix.as_deref(), Some("ir"));
        assert_eq!(settings.rules.ads_ruleset, "Ads");
    }

    #[test]
    fn test_settings_yaml() {
        let yaml_content = r#"
common:
  source: "https://example.com/list.txt"
  security_policy: require-tls
groups:
  select_name: "🚀 Select"
  tolerance: 100
"#;

        let settings = Settings::load_from_content(yaml_content).unwrap();

        assert_eq!(settings.common.source, "https://example.com/list.txt");
        assert_eq!(settings.common.security_policy, SecurityPolicy::RequireTls);
        assert_eq!(settings.common.output, "clash_iran.yaml");
        assert_eq!(settings.groups.select_name, "🚀 Select");
        assert_eq!(settings.groups.tolerance, 100);
        assert_eq!(settings.node.udp, Some(true));
    }

    #[test]
    fn test_empty_content_uses_defaults() {
        let settings = Settings::load_from_content("").unwrap();
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn test_invalid_settings_are_refused() {
        assert!(matches!(
            Settings::load_from_content("[common]\nsource = \"\"\n"),
            Err(ConvertError::Config(_))
        ));
        assert!(matches!(
            Settings::load_from_content("[common]\nsecurity_policy = \"strict\"\n"),
            Err(ConvertError::Toml(_))
        ));
        assert!(Settings::load_from_file("/nonexistent/pref.toml").is_err());
    }
}
