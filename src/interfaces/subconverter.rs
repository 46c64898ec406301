use log::{debug, error, info, warn};

use crate::error::ConvertError;
use crate::generator::exports::{
    proxy_to_clash, proxy_to_clash_vless, render_clash_yaml, AssembleOptions, ExportOptions,
};
use crate::parser::{explode_sub, ParseSettings, SkippedLine};
use crate::settings::{BaseTemplate, CommonSettings, Settings};
use crate::utils::http_std::parse_proxy;
use crate::utils::url::is_link;
use crate::utils::{file_get, file_write, web_get};

/// Result of one conversion
#[derive(Debug, Clone)]
pub struct ConvertResult {
    /// Rendered Clash YAML
    pub content: String,
    /// Proxies in the document, in input order
    pub proxy_names: Vec<String>,
    /// Lines that could not be parsed
    pub skipped: Vec<SkippedLine>,
    /// Parsed lines refused by the security policy
    pub rejected: Vec<SkippedLine>,
    /// Non-blank input lines
    pub total_lines: usize,
}

impl ConvertResult {
    pub fn proxy_count(&self) -> usize {
        self.proxy_names.len()
    }
}

/// Read the link list from a URL or a local file
pub fn fetch_source(common: &CommonSettings) -> Result<String, ConvertError> {
    let source = common.source.trim();
    if is_link(source) {
        info!("Downloading server list from {}", source);
        let proxy = parse_proxy(&common.proxy);
        let content = web_get(source, &proxy, common.fetch_timeout).map_err(|e| {
            error!("Failed to fetch '{}': {}", source, e);
            ConvertError::Fetch(e)
        })?;
        debug!("Downloaded {} bytes", content.len());
        Ok(content)
    } else {
        info!("Reading server list from {}", source);
        Ok(file_get(source)?)
    }
}

/// Convert raw link-list text into a Clash document.
///
/// Malformed and policy-rejected lines are skipped with a warning. When no
/// proxy is left the run fails with [`ConvertError::NoValidProxies`].
pub fn convert_content(
    content: &str,
    settings: &Settings,
    base: &BaseTemplate,
) -> Result<ConvertResult, ConvertError> {
    let parse_settings = ParseSettings::from(settings);
    let export_options = ExportOptions::from(settings);

    let report = explode_sub(content, &parse_settings);
    info!(
        "Parsed {} of {} lines",
        report.nodes.len(),
        report.total_lines
    );

    let mut proxies = Vec::with_capacity(report.nodes.len());
    let mut rejected = Vec::new();
    for parsed in &report.nodes {
        match proxy_to_clash_vless(&parsed.node, &export_options) {
            Ok(proxy) => proxies.push(proxy),
            Err(e) => {
                let entry = SkippedLine::new(parsed.line_no, &parsed.excerpt, &e);
                warn!(
                    "Rejecting line {} ({}): {}",
                    entry.line_no, entry.reason, entry.excerpt
                );
                rejected.push(entry);
            }
        }
    }

    if proxies.is_empty() {
        return Err(ConvertError::NoValidProxies {
            lines: report.total_lines,
        });
    }

    let opts = AssembleOptions {
        groups: &settings.groups,
        rules: &settings.rules,
        name_separator: &settings.node.name_separator,
    };
    let (root, document) = proxy_to_clash(proxies, base, &opts)?;
    let content = render_clash_yaml(&root)?;

    Ok(ConvertResult {
        content,
        proxy_names: document.proxy_names().into_iter().map(str::to_string).collect(),
        skipped: report.skipped,
        rejected,
        total_lines: report.total_lines,
    })
}

/// Fetch the configured source and convert it, without writing anything
pub fn convert_source(settings: &Settings) -> Result<ConvertResult, ConvertError> {
    let base = BaseTemplate::load(&settings.common.base_path)?;
    let content = fetch_source(&settings.common)?;
    convert_content(&content, settings, &base)
}

/// Process a full run: fetch, convert, then write the document to
/// `common.output`. Nothing is written when the conversion fails.
pub fn subconverter(settings: &Settings) -> Result<ConvertResult, ConvertError> {
    info!("Converting {} to Clash", settings.common.source);
    let result = convert_source(settings)?;

    let output = &settings.common.output;
    file_write(output, &result.content).map_err(|source| ConvertError::Write {
        path: output.clone(),
        source,
    })?;

    info!(
        "Wrote {} proxies to {} ({} skipped, {} rejected)",
        result.proxy_count(),
        output,
        result.skipped.len(),
        result.rejected.len()
    );
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::SecurityPolicy;

    fn base() -> BaseTemplate {
        BaseTemplate::builtin().unwrap()
    }

    #[test]
    fn test_convert_content_counts() {
        let input = "vless://a@1.1.1.1:443?security=reality&pbk=K&sid=S#R\n\
                     garbage\n\
                     vless://b@2.2.2.2:443#Plain\n";
        let result = convert_content(input, &Settings::default(), &base()).unwrap();

        assert_eq!(result.total_lines, 3);
        assert_eq!(result.proxy_names, vec!["R", "Plain"]);
        assert_eq!(result.skipped.len(), 1);
        assert!(result.rejected.is_empty());
    }

    #[test]
    fn test_policy_rejections_are_recorded() {
        let mut settings = Settings::default();
        settings.common.security_policy = SecurityPolicy::RealityOnly;
        let input = "vless://a@1.1.1.1:443?security=reality&pbk=K&sid=S#R\n\
                     vless://b@2.2.2.2:443#Plain\n";
        let result = convert_content(input, &settings, &base()).unwrap();

        assert_eq!(result.proxy_names, vec!["R"]);
        assert_eq!(result.rejected.len(), 1);
        assert_eq!(result.rejected[0].line_no, 2);
        assert_eq!(result.rejected[0].excerpt, "vless://b@2.2.2.2:443#Plain");
    }

    #[test]
    fn test_nothing_usable() {
        let err = convert_content("foo\nbar\n", &Settings::default(), &base()).unwrap_err();
        assert!(matches!(err, ConvertError::NoValidProxies { lines: 2 }));
    }

    #[test]
    fn test_fetch_source_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("list.txt");
        std::fs::write(&path, "vless://a@1.1.1.1:443#A\n").unwrap();

        let common = CommonSettings {
            source: path.to_string_lossy().into_owned(),
            ..Default::default()
        };
        assert_eq!(fetch_source(&common).unwrap(), "vless://a@1.1.1.1:443#A\n");
    }
}
