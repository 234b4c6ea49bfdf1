use std::convert::Infallible;

use futures::TryStreamExt;
use hyper::body::HttpBody;
use hyper::header::{HeaderValue, CONTENT_TYPE};
use hyper::{Body, Request, Response, StatusCode};
use tracing::{debug, warn};

use super::headers::{is_hop_by_hop, outbound_headers};
use super::{extract_target, ProxyError};

/// Serve one inbound request. Failures become plain-text error responses.
pub(crate) async fn handle(
    client: reqwest::Client,
    req: Request<Body>,
) -> Result<Response<Body>, Infallible> {
    let method = req.method().clone();
    let uri = req.uri().clone();

    match forward(&client, req).await {
        Ok(resp) => {
            debug!(%method, %uri, status = resp.status().as_u16(), "proxied request");
            Ok(resp)
        }
        Err(err) => {
            warn!(%method, %uri, error = %err, "proxy request failed");
            Ok(error_response(&err))
        }
    }
}

async fn forward(client: &reqwest::Client, req: Request<Body>) -> Result<Response<Body>, ProxyError> {
    let target = extract_target(req.uri())?;
    let (parts, body) = req.into_parts();

    let method = reqwest::Method::from_bytes(parts.method.as_str().as_bytes())
        .map_err(|e| ProxyError::RequestConstruction(e.to_string()))?;
    let headers = outbound_headers(&parts.headers, &target)?;

    // The inbound body streams through; a forwarded Content-Length keeps its framing.
    let mut outbound = client.request(method, target.clone()).headers(headers);
    if !body.is_end_stream() {
        outbound = outbound.body(reqwest::Body::wrap_stream(body));
    }

    let upstream = outbound
        .send()
        .await
        .map_err(|e| ProxyError::Upstream(format!("{target}: {e}")))?;

    let status = StatusCode::from_u16(upstream.status().as_u16())
        .map_err(|e| ProxyError::Upstream(e.to_string()))?;
    let mut builder = Response::builder().status(status);
    for (name, value) in upstream.headers() {
        if is_hop_by_hop(name.as_str()) {
            continue;
        }
        builder = builder.header(name.as_str(), value.as_bytes());
    }

    // Status and headers are committed once the body starts streaming.
    let stream = upstream.bytes_stream().inspect_err(move |e| {
        warn!(%target, error = %e, "upstream body ended with an error");
    });

    builder
        .body(Body::wrap_stream(stream))
        .map_err(|e| ProxyError::RequestConstruction(e.to_string()))
}

pub(crate) fn error_response(err: &ProxyError) -> Response<Body> {
    let mut resp = Response::new(Body::from(err.to_string()));
    *resp.status_mut() = err.status_code();
    resp.headers_mut().insert(
        CONTENT_TYPE,
        HeaderValue::from_static("text/plain; charset=utf-8"),
    );
    resp
}
