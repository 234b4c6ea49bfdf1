//! # wt-core
//!
//! Core domain models and business rules for WeTools.
//!
//! This crate contains pure domain logic without any infrastructure dependencies:
//! clipboard history items and pagination, proxy configuration, user settings,
//! the static application configuration DTO, and the port traits implemented by
//! `wt-infra` and `wt-platform`.

pub mod app_dirs;
pub mod clipboard;
pub mod config;
pub mod ports;
pub mod proxy;
pub mod settings;

// Re-export commonly used types at the crate root
pub use app_dirs::AppDirs;
pub use clipboard::{ClipboardItem, HistoryError, HistoryPage};
pub use config::AppConfig;
pub use proxy::ProxyConfig;
pub use settings::Settings;
