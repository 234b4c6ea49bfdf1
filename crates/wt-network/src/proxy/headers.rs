use hyper::HeaderMap as InboundHeaders;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, HOST};
use url::Url;

use super::ProxyError;

/// Connection-scoped headers; both hops re-frame the body themselves.
const HOP_BY_HOP: [&str; 7] = [
    "connection",
    "keep-alive",
    "proxy-connection",
    "te",
    "trailer",
    "transfer-encoding",
    "upgrade",
];

/// Headers that would reveal the original client to the target.
const CLIENT_IDENTIFYING: [&str; 2] = ["x-forwarded-for", "x-real-ip"];

pub(crate) fn is_hop_by_hop(name: &str) -> bool {
    HOP_BY_HOP.iter().any(|h| name.eq_ignore_ascii_case(h))
}

/// `host[:port]` as it should appear in the outbound `Host` header.
pub(crate) fn host_header(target: &Url) -> Option<String> {
    let host = target.host_str()?;
    Some(match target.port() {
        Some(port) => format!("{host}:{port}"),
        None => host.to_string(),
    })
}

/// Copy inbound headers for the outbound request: every value is kept
/// except hop-by-hop and client-identifying headers, and `Host` names the target.
pub(crate) fn outbound_headers(
    inbound: &InboundHeaders,
    target: &Url,
) -> Result<HeaderMap, ProxyError> {
    let mut out = HeaderMap::with_capacity(inbound.len());

    for (name, value) in inbound {
        let name = name.as_str();
        if is_hop_by_hop(name) || CLIENT_IDENTIFYING.contains(&name) || name == "host" {
            continue;
        }
        let name = HeaderName::from_bytes(name.as_bytes())
            .map_err(|e| ProxyError::RequestConstruction(e.to_string()))?;
        let value = HeaderValue::from_bytes(value.as_bytes())
            .map_err(|e| ProxyError::RequestConstruction(e.to_string()))?;
        out.append(name, value);
    }

    if let Some(host) = host_header(target) {
        let value = HeaderValue::from_str(&host)
            .map_err(|e| ProxyError::RequestConstruction(e.to_string()))?;
        out.insert(HOST, value);
    }

    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use hyper::header::HeaderValue as InboundValue;

    fn inbound(pairs: &[(&'static str, &'static str)]) -> InboundHeaders {
        let mut headers = InboundHeaders::new();
        for (name, value) in pairs {
            headers.append(*name, InboundValue::from_static(*value));
        }
        headers
    }

    #[test]
    fn host_header_includes_explicit_port_only() {
        assert_eq!(
            host_header(&Url::parse("http://example.com:8080/x").unwrap()).as_deref(),
            Some("example.com:8080")
        );
        assert_eq!(
            host_header(&Url::parse("https://example.com/x").unwrap()).as_deref(),
            Some("example.com")
        );
    }

    #[test]
    fn rewrites_host_and_strips_client_headers() {
        let headers = inbound(&[
            ("host", "127.0.0.1:8081"),
            ("x-forwarded-for", "10.0.0.9"),
            ("x-real-ip", "10.0.0.9"),
            ("connection", "keep-alive"),
            ("accept", "text/html"),
            ("x-custom", "a"),
            ("x-custom", "b"),
        ]);
        let target = Url::parse("http://example.com:9000/").unwrap();

        let out = outbound_headers(&headers, &target).unwrap();
        assert_eq!(out.get(HOST).unwrap(), "example.com:9000");
        assert!(out.get("x-forwarded-for").is_none());
        assert!(out.get("x-real-ip").is_none());
        assert!(out.get("connection").is_none());
        assert_eq!(out.get("accept").unwrap(), "text/html");
        assert_eq!(out.get_all("x-custom").iter().count(), 2);
    }

    #[test]
    fn hop_by_hop_match_is_case_insensitive() {
        assert!(is_hop_by_hop("Transfer-Encoding"));
        assert!(is_hop_by_hop("keep-alive"));
        assert!(!is_hop_by_hop("content-length"));
    }
}
