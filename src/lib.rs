//! WeTools
//!
//! Process entry: tracing, configuration, dependency wiring and the
//! run loop. The behaviour lives in the `wt-*` workspace crates.

pub mod bootstrap;

pub use bootstrap::run_app;
