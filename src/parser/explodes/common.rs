use log::{debug, warn};

use super::vless::explode_vless;
use crate::models::Proxy;
use crate::parser::parse_settings::ParseSettings;
use crate::utils::base64::base64_decode;
use crate::utils::string::truncate_excerpt;

/// Characters of an offending line kept in diagnostics
pub const EXCERPT_LEN: usize = 60;

/// A line that did not make it into the output, and why.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedLine {
    /// 1-based line number in the (decoded) input
    pub line_no: usize,
    pub excerpt: String,
    pub reason: String,
}

impl SkippedLine {
    pub fn new(line_no: usize, line: &str, reason: impl ToString) -> Self {
        SkippedLine {
            line_no,
            excerpt: truncate_excerpt(line, EXCERPT_LEN),
            reason: reason.to_string(),
        }
    }
}

/// A node together with where it came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedLine {
    /// 1-based line number in the (decoded) input
    pub line_no: usize,
    pub excerpt: String,
    pub node: Proxy,
}

/// Parsed nodes with their source lines, plus every line that failed.
#[derive(Debug, Clone, Default)]
pub struct ExplodeReport {
    pub nodes: Vec<ParsedLine>,
    pub skipped: Vec<SkippedLine>,
    /// Non-blank lines seen
    pub total_lines: usize,
}

/// Explode a subscription content into Proxy objects, one per non-blank line
///
/// A body that is a single base64 blob is decoded first. Lines that fail to
/// parse are logged and recorded in [`ExplodeReport::skipped`]; they never
/// stop the batch. Line numbers count every line of the input, blank or not.
pub fn explode_sub(sub: &str, settings: &ParseSettings) -> ExplodeReport {
    let mut report = ExplodeReport::default();

    let sub = sub.strip_prefix('\u{feff}').unwrap_or(sub);
    let trimmed = sub.trim();
    if trimmed.is_empty() {
        return report;
    }

    let decoded;
    let content = if trimmed.contains("://") {
        sub
    } else {
        match base64_decode(trimmed) {
            Some(text) if text.contains("://") => {
                debug!("Subscription body is base64 encoded");
                decoded = text;
                decoded.strip_prefix('\u{feff}').unwrap_or(decoded.as_str())
            }
            _ => sub,
        }
    };

    for (idx, line) in content.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        report.total_lines += 1;

        match explode_vless(line, settings) {
            Ok(node) => report.nodes.push(ParsedLine {
                line_no: idx + 1,
                excerpt: truncate_excerpt(line, EXCERPT_LEN),
                node,
            }),
            Err(e) => {
                let skipped = SkippedLine::new(idx + 1, line, &e);
                warn!(
                    "Skipping line {} ({}): {}",
                    skipped.line_no, skipped.reason, skipped.excerpt
                );
                report.skipped.push(skipped);
            }
        }
    }

    report
}
