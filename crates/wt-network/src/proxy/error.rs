use std::net::SocketAddr;
use std::time::Duration;

use hyper::StatusCode;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ProxyError {
    /// The inbound request does not name a usable target.
    #[error("invalid target: {0}")]
    Validation(String),

    #[error("upstream request failed: {0}")]
    Upstream(String),

    #[error("failed to build upstream request: {0}")]
    RequestConstruction(String),

    #[error("failed to bind proxy server on {addr}: {source}")]
    Bind {
        addr: SocketAddr,
        #[source]
        source: hyper::Error,
    },

    #[error("invalid proxy bind address {0:?}")]
    InvalidBindAddr(String),

    #[error("failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    #[error("proxy server is not running")]
    NotRunning,

    #[error("proxy is not enabled")]
    NotEnabled,

    #[error("proxy server did not shut down within {0:?}")]
    ShutdownTimeout(Duration),
}

impl ProxyError {
    /// HTTP status reported to the proxy client for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::Upstream(_) => StatusCode::BAD_GATEWAY,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}
