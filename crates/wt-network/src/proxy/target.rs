use hyper::Uri;
use url::{form_urlencoded, Url};
use wt_core::proxy::query_unescape;

use super::ProxyError;

const PATH_PREFIX: &str = "/proxy/";

/// Resolve the forwarding target of an inbound request.
///
/// The `url` query parameter wins; otherwise the path remainder after
/// `/proxy/`. Either form is query-unescaped once more before parsing, so
/// targets escaped by the caller and then placed in a query both work.
pub fn extract_target(uri: &Uri) -> Result<Url, ProxyError> {
    let from_query = uri.query().and_then(|query| {
        form_urlencoded::parse(query.as_bytes())
            .find(|(key, _)| key == "url")
            .map(|(_, value)| value.into_owned())
            .filter(|value| !value.is_empty())
    });

    let raw = match from_query {
        Some(value) => value,
        None => uri
            .path()
            .strip_prefix(PATH_PREFIX)
            .filter(|rest| !rest.is_empty())
            .map(str::to_string)
            .ok_or_else(|| ProxyError::Validation("missing target URL".to_string()))?,
    };

    let decoded = query_unescape(&raw).map_err(|e| ProxyError::Validation(e.to_string()))?;
    let target = Url::parse(&decoded)
        .map_err(|e| ProxyError::Validation(format!("{decoded:?}: {e}")))?;

    match target.scheme() {
        "http" | "https" if target.host_str().is_some() => Ok(target),
        scheme => Err(ProxyError::Validation(format!(
            "unsupported target {decoded:?} (scheme {scheme})"
        ))),
    }
}
