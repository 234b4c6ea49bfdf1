//! Clipboard capture handler port
//!
//! The platform poller depends on this abstraction; the history engine in
//! the app layer implements it.

use crate::clipboard::HistoryError;

pub trait ClipboardCaptureHandler: Send + Sync {
    /// Offer a freshly read clipboard value.
    ///
    /// Returns `Ok(true)` when the value was recorded, `Ok(false)` when it
    /// was empty or identical to the previous capture.
    fn on_capture(&self, content: String) -> Result<bool, HistoryError>;
}
