//! Forwarding proxy domain: user-facing configuration and URL escaping rules.

mod config;
mod escape;

pub use config::ProxyConfig;
pub use escape::{query_escape, query_unescape, EscapeError};
