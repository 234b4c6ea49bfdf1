use std::fmt;

use serde::{Deserialize, Serialize};

use super::query_escape;

/// Proxy configuration as edited by the user.
///
/// `host`/`port` describe an optional upstream proxy the local forwarding
/// proxy chains through. Invariant kept by the proxy service: `enabled`
/// implies the local server is running, `!enabled` implies it is stopped.
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProxyConfig {
    pub enabled: bool,
    pub host: String,
    pub port: String,
    pub username: String,
    pub password: String,
}

impl ProxyConfig {
    /// Upstream proxy URL, `http://[user:pass@]host:port`.
    ///
    /// `None` when the proxy is disabled or no host is set. Credentials are
    /// embedded (query-escaped) only when both username and password are present.
    pub fn upstream_url(&self) -> Option<String> {
        if !self.enabled || self.host.is_empty() {
            return None;
        }

        if !self.username.is_empty() && !self.password.is_empty() {
            Some(format!(
                "http://{}:{}@{}:{}",
                query_escape(&self.username),
                query_escape(&self.password),
                self.host,
                self.port
            ))
        } else {
            Some(format!("http://{}:{}", self.host, self.port))
        }
    }
}

impl fmt::Debug for ProxyConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProxyConfig")
            .field("enabled", &self.enabled)
            .field("host", &self.host)
            .field("port", &self.port)
            .field("username", &self.username)
            .field("password", &if self.password.is_empty() { "" } else { "***" })
            .finish()
    }
}
