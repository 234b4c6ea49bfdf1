//! # wt-platform
//!
//! OS-facing adapters: the system clipboard, the background clipboard
//! poller, per-user directories and the default-application file opener.

pub mod app_dirs;
pub mod clipboard;
pub mod opener;
pub mod runtime;

pub use app_dirs::DirsAppDirsAdapter;
pub use clipboard::ClipboardRsClipboard;
pub use opener::SystemFileOpener;
pub use runtime::{ClipboardPoller, PollOutcome};
