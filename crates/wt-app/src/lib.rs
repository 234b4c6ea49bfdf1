//! WeTools application layer
//!
//! The clipboard history engine and the [`WeToolsApp`] facade that exposes
//! every user-facing operation over the proxy and the history.

pub mod app;
pub mod app_paths;
pub mod history;

pub use app::{load_startup_settings, AppError, WeToolsApp, WeToolsDeps};
pub use app_paths::AppPaths;
pub use history::ClipboardHistoryEngine;
