use serde::{Deserialize, Serialize};

/// One captured clipboard value.
///
/// History is kept newest-first; `timestamp_ms` is the capture time in
/// milliseconds since the Unix epoch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClipboardItem {
    pub content: String,
    #[serde(rename = "timestamp")]
    pub timestamp_ms: i64,
}

impl ClipboardItem {
    pub fn new(content: impl Into<String>, timestamp_ms: i64) -> Self {
        Self {
            content: content.into(),
            timestamp_ms,
        }
    }
}
