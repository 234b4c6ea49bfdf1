//! # wt-network
//!
//! The local forwarding proxy: a loopback HTTP listener that relays any
//! request addressed to `/proxy?url=<target>` (or `/proxy/<target>`) to the
//! target, optionally through a configured upstream proxy.

pub mod proxy;

pub use proxy::{ForwardingProxy, ProxyError, ProxyOptions};
