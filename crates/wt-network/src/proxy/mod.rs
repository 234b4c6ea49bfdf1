mod error;
mod handler;
mod headers;
mod options;
mod server;
mod target;
mod upstream;

pub use error::ProxyError;
pub use options::ProxyOptions;
pub use server::ForwardingProxy;
pub use target::extract_target;
pub use upstream::{configured_upstream, env_proxies, ProxyScope};
