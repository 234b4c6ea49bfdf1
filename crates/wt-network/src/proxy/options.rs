use std::net::SocketAddr;
use std::time::Duration;

use wt_core::config::DEFAULT_CHECK_URL;
use wt_core::AppConfig;

use super::ProxyError;

/// Static knobs of the forwarding proxy.
#[derive(Debug, Clone)]
pub struct ProxyOptions {
    pub bind_addr: SocketAddr,
    /// Total timeout of one forwarded request.
    pub forward_timeout: Duration,
    pub check_url: String,
    pub check_timeout: Duration,
    pub shutdown_timeout: Duration,
}

impl Default for ProxyOptions {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([127, 0, 0, 1], 8081)),
            forward_timeout: Duration::from_secs(30),
            check_url: DEFAULT_CHECK_URL.to_string(),
            check_timeout: Duration::from_secs(10),
            shutdown_timeout: Duration::from_secs(5),
        }
    }
}

impl ProxyOptions {
    pub fn from_app_config(config: &AppConfig) -> Result<Self, ProxyError> {
        let bind_addr = config
            .proxy_bind_addr
            .parse()
            .map_err(|_| ProxyError::InvalidBindAddr(config.proxy_bind_addr.clone()))?;

        Ok(Self {
            bind_addr,
            forward_timeout: Duration::from_secs(config.proxy_forward_timeout_secs),
            check_url: config.proxy_check_url.clone(),
            check_timeout: Duration::from_secs(config.proxy_check_timeout_secs),
            shutdown_timeout: Duration::from_secs(config.proxy_shutdown_timeout_secs),
        })
    }
}
