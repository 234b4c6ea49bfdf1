//! Static process configuration
//!
//! `AppConfig` is the TOML → DTO mapping of `config.toml`. It carries plain
//! values only; consumers turn them into durations, socket addresses and
//! paths. A missing key keeps the value from [`AppConfig::default`].

use std::path::PathBuf;

use crate::clipboard::DEFAULT_MAX_RECORDS;

pub const DEFAULT_PROXY_BIND_ADDR: &str = "127.0.0.1:8081";
pub const DEFAULT_CHECK_URL: &str = "http://httpbin.org/get";

/// Application configuration DTO
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Overrides the per-user data directory when set.
    pub data_dir: Option<PathBuf>,

    /// Local listen address of the forwarding proxy
    pub proxy_bind_addr: String,
    pub proxy_forward_timeout_secs: u64,
    pub proxy_check_url: String,
    pub proxy_check_timeout_secs: u64,
    pub proxy_shutdown_timeout_secs: u64,

    pub clipboard_poll_interval_ms: u64,
    /// Default history cap, used until the user saves their own
    pub clipboard_max_records: usize,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data_dir: None,
            proxy_bind_addr: DEFAULT_PROXY_BIND_ADDR.to_string(),
            proxy_forward_timeout_secs: 30,
            proxy_check_url: DEFAULT_CHECK_URL.to_string(),
            proxy_check_timeout_secs: 10,
            proxy_shutdown_timeout_secs: 5,
            clipboard_poll_interval_ms: 1000,
            clipboard_max_records: DEFAULT_MAX_RECORDS,
        }
    }
}

impl AppConfig {
    /// Create AppConfig from a parsed TOML document.
    ///
    /// Keys with the wrong type or a negative value are treated as missing.
    pub fn from_toml(toml_value: &toml::Value) -> anyhow::Result<Self> {
        let defaults = Self::default();
        let str_at = |section: &str, key: &str| {
            toml_value
                .get(section)
                .and_then(|s| s.get(key))
                .and_then(|v| v.as_str())
                .map(str::to_string)
        };
        let uint_at = |section: &str, key: &str| {
            toml_value
                .get(section)
                .and_then(|s| s.get(key))
                .and_then(|v| v.as_integer())
                .and_then(|v| u64::try_from(v).ok())
        };

        Ok(Self {
            data_dir: str_at("storage", "data_dir")
                .filter(|s| !s.is_empty())
                .map(PathBuf::from),
            proxy_bind_addr: str_at("proxy", "bind_addr").unwrap_or(defaults.proxy_bind_addr),
            proxy_forward_timeout_secs: uint_at("proxy", "forward_timeout_secs")
                .unwrap_or(defaults.proxy_forward_timeout_secs),
            proxy_check_url: str_at("proxy", "check_url").unwrap_or(defaults.proxy_check_url),
            proxy_check_timeout_secs: uint_at("proxy", "check_timeout_secs")
                .unwrap_or(defaults.proxy_check_timeout_secs),
            proxy_shutdown_timeout_secs: uint_at("proxy", "shutdown_timeout_secs")
                .unwrap_or(defaults.proxy_shutdown_timeout_secs),
            clipboard_poll_interval_ms: uint_at("clipboard", "poll_interval_ms")
                .unwrap_or(defaults.clipboard_poll_interval_ms),
            clipboard_max_records: uint_at("clipboard", "max_records")
                .and_then(|v| usize::try_from(v).ok())
                .unwrap_or(defaults.clipboard_max_records),
        })
    }
}
