//! System clipboard port - abstracts plain-text clipboard access

use crate::ports::errors::ClipboardError;

/// Blocking access to the OS clipboard.
///
/// Implementations may block on the platform clipboard APIs; async callers
/// are expected to go through `spawn_blocking`.
pub trait SystemClipboardPort: Send + Sync {
    fn read_text(&self) -> Result<String, ClipboardError>;
    fn write_text(&self, content: &str) -> Result<(), ClipboardError>;
}
