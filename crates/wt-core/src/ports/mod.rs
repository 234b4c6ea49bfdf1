//! Port interfaces for the application layer
//!
//! Ports define the contract between the use cases in `wt-app` and the
//! infrastructure (`wt-infra`) or platform (`wt-platform`) implementations.
//! The core never depends on a concrete adapter.

pub mod app_dirs;
mod capture_handler;
pub mod clipboard;
mod clock;
pub mod errors;
mod file_opener;
mod history_store;
pub mod settings;

pub use app_dirs::AppDirsPort;
pub use capture_handler::ClipboardCaptureHandler;
pub use clipboard::SystemClipboardPort;
pub use clock::*;
pub use errors::{AppDirsError, ClipboardError, OpenerError, SettingsError, StoreError};
pub use file_opener::FileOpenerPort;
pub use history_store::HistoryStorePort;
pub use settings::SettingsPort;
