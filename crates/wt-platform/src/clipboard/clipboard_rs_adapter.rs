use clipboard_rs::{Clipboard, ClipboardContext};
use wt_core::ports::{ClipboardError, SystemClipboardPort};

/// Plain-text clipboard access through `clipboard-rs`.
///
/// A fresh context is opened per call; platform contexts are not `Send`
/// everywhere, and the poller reads from a blocking pool thread.
#[derive(Default)]
pub struct ClipboardRsClipboard;

impl ClipboardRsClipboard {
    pub fn new() -> Self {
        Self
    }

    fn context() -> Result<ClipboardContext, ClipboardError> {
        ClipboardContext::new().map_err(|e| ClipboardError::from_message(e.to_string()))
    }
}

impl SystemClipboardPort for ClipboardRsClipboard {
    fn read_text(&self) -> Result<String, ClipboardError> {
        Self::context()?
            .get_text()
            .map_err(|e| ClipboardError::from_message(e.to_string()))
    }

    fn write_text(&self, content: &str) -> Result<(), ClipboardError> {
        Self::context()?
            .set_text(content.to_string())
            .map_err(|e| ClipboardError::from_message(e.to_string()))
    }
}
