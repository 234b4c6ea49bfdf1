//! Upstream proxy selection for the outbound client.
//!
//! The configured upstream is consulted per request through
//! [`reqwest::Proxy::custom`], so config changes apply without rebuilding the
//! client. When it yields nothing, the proxies taken from the environment at
//! construction time apply, with reqwest's own `NO_PROXY` matching. Loopback
//! targets never go through an environment proxy.

use tracing::warn;
use url::Url;
use wt_core::ProxyConfig;

/// Always reached directly unless an upstream is configured.
const LOOPBACK_HOSTS: [&str; 3] = ["localhost", "127.0.0.1", "::1"];

/// Which requests an environment proxy intercepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProxyScope {
    Http,
    Https,
    All,
}

/// Upstream proxy from the user's config, if enabled and well formed.
pub fn configured_upstream(config: &ProxyConfig) -> Option<Url> {
    let configured = config.upstream_url()?;
    match Url::parse(&configured) {
        Ok(url) => Some(url),
        Err(e) => {
            warn!(error = %e, host = %config.host, port = %config.port, "configured upstream proxy is not a valid URL; connecting directly");
            None
        }
    }
}

/// Proxies named by `HTTP_PROXY`, `HTTPS_PROXY` and `ALL_PROXY`, in the
/// order reqwest should try them. Lower-case names are accepted; a proxy
/// reqwest cannot use is skipped with a warning.
pub fn env_proxies(env: impl Fn(&str) -> Option<String>) -> Vec<reqwest::Proxy> {
    let no_proxy = no_proxy_list(&env);

    env_proxy_urls(&env)
        .into_iter()
        .filter_map(|(scope, url)| {
            let built = match scope {
                ProxyScope::Http => reqwest::Proxy::http(url.clone()),
                ProxyScope::Https => reqwest::Proxy::https(url.clone()),
                ProxyScope::All => reqwest::Proxy::all(url.clone()),
            };
            match built {
                Ok(proxy) => Some(proxy.no_proxy(reqwest::NoProxy::from_string(&no_proxy))),
                Err(e) => {
                    warn!(?scope, %url, error = %e, "unsupported environment proxy; skipped");
                    None
                }
            }
        })
        .collect()
}

pub(crate) fn env_proxy_urls(env: impl Fn(&str) -> Option<String>) -> Vec<(ProxyScope, Url)> {
    [
        (ProxyScope::Http, "HTTP_PROXY"),
        (ProxyScope::Https, "HTTPS_PROXY"),
        (ProxyScope::All, "ALL_PROXY"),
    ]
    .into_iter()
    .filter_map(|(scope, var)| {
        let value = lookup(&env, var)?;
        match parse_env_proxy(&value) {
            Some(url) => Some((scope, url)),
            None => {
                warn!(var, value = %value, "ignoring unparseable proxy variable");
                None
            }
        }
    })
    .collect()
}

/// `NO_PROXY` entries plus the loopback hosts, comma separated.
pub(crate) fn no_proxy_list(env: impl Fn(&str) -> Option<String>) -> String {
    let mut entries: Vec<String> = LOOPBACK_HOSTS.iter().map(|h| h.to_string()).collect();
    if let Some(value) = lookup(&env, "NO_PROXY") {
        entries.extend(
            value
                .split(',')
                .map(str::trim)
                .filter(|entry| !entry.is_empty())
                .map(String::from),
        );
    }
    entries.join(",")
}

fn lookup(env: &impl Fn(&str) -> Option<String>, var: &str) -> Option<String> {
    env(var)
        .or_else(|| env(&var.to_ascii_lowercase()))
        .filter(|v| !v.trim().is_empty())
}

fn parse_env_proxy(value: &str) -> Option<Url> {
    let value = value.trim();
    let with_scheme = if value.contains("://") {
        value.to_string()
    } else {
        format!("http://{value}")
    };
    Url::parse(&with_scheme).ok().filter(|url| url.has_host())
}
