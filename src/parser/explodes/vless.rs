use std::collections::HashMap;

use url::Url;

use crate::error::ExplodeError;
use crate::models::{Proxy, SecurityMode, TransportMode};
use crate::parser::parse_settings::{LabelFallback, ParseSettings};
use crate::utils::string::non_empty;
use crate::utils::url::url_decode;

pub const VLESS_SCHEME: &str = "vless://";

/// Parse a VLESS link into a Proxy object
///
/// Format: `vless://uuid@host:port[?params][#remark]`
///
/// Query parameters are optional; `security` defaults to none, `type` to tcp,
/// `sni` to the host and `fp` to the configured fingerprint. Empty values count
/// as absent and the first occurrence of a repeated key wins.
pub fn explode_vless(vless: &str, settings: &ParseSettings) -> Result<Proxy, ExplodeError> {
    let vless = vless.trim();
    let has_scheme = vless
        .get(..VLESS_SCHEME.len())
        .is_some_and(|s| s.eq_ignore_ascii_case(VLESS_SCHEME));
    if !has_scheme {
        return Err(ExplodeError::UnsupportedScheme);
    }

    let url = Url::parse(vless).map_err(|e| match e {
        url::ParseError::InvalidPort => ExplodeError::InvalidPort,
        url::ParseError::EmptyHost => ExplodeError::MissingHost,
        other => ExplodeError::Malformed(other),
    })?;

    let user_id = url_decode(url.username());
    if user_id.is_empty() {
        return Err(ExplodeError::MissingUserId);
    }

    let hostname = url
        .host_str()
        .map(|h| h.trim_start_matches('[').trim_end_matches(']'))
        .filter(|h| !h.is_empty())
        .ok_or(ExplodeError::MissingHost)?
        .to_string();

    let port = url.port().ok_or(ExplodeError::MissingPort)?;
    if port == 0 {
        return Err(ExplodeError::InvalidPort);
    }

    let mut params: HashMap<String, String> = HashMap::new();
    for (key, value) in url.query_pairs() {
        if value.trim().is_empty() {
            continue;
        }
        params
            .entry(key.into_owned())
            .or_insert_with(|| value.trim().to_string());
    }

    let security = match params.get("security") {
        Some(s) => SecurityMode::from_param(s)
            .ok_or_else(|| ExplodeError::UnsupportedSecurity(s.clone()))?,
        None => SecurityMode::None,
    };
    let transport = match params.get("type") {
        Some(t) => TransportMode::from_param(t)
            .ok_or_else(|| ExplodeError::UnsupportedTransport(t.clone()))?,
        None => TransportMode::Tcp,
    };

    let sni = params
        .get("sni")
        .cloned()
        .unwrap_or_else(|| hostname.clone());
    let fingerprint = match params.get("fp").map(String::as_str) {
        Some("randomized") => "random".to_string(),
        Some(fp) => fp.to_string(),
        None => settings.default_fingerprint.clone(),
    };
    let alpn = params
        .get("alpn")
        .map(|a| a.split(',').filter_map(non_empty).collect())
        .unwrap_or_default();

    let path = params.get("path").and_then(|p| {
        let p = match p.find('?') {
            Some(pos) => &p[..pos],
            None => p.as_str(),
        };
        non_empty(p)
    });

    let remark = url
        .fragment()
        .and_then(|f| non_empty(&url_decode(f)))
        .unwrap_or_else(|| fallback_remark(&hostname, port, settings.label_fallback));

    Ok(Proxy {
        remark,
        hostname,
        port,
        user_id,
        security,
        transport,
        sni,
        fingerprint,
        alpn,
        public_key: params.get("pbk").cloned(),
        short_id: params.get("sid").cloned(),
        spider_x: params.get("spx").cloned(),
        flow: params.get("flow").cloned(),
        path,
        host: params.get("host").cloned(),
        service_name: params.get("serviceName").cloned(),
        header_type: params.get("headerType").cloned(),
    })
}

fn fallback_remark(hostname: &str, port: u16, fallback: LabelFallback) -> String {
    match fallback {
        LabelFallback::HostPort => format!("{}:{}", hostname, port),
        LabelFallback::Random => {
            let token = uuid::Uuid::new_v4().simple().to_string();
            format!("VLESS-{}", &token[..6])
        }
    }
}
