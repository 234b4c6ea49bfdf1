use std::path::Path;

use crate::clipboard::ClipboardItem;
use crate::ports::errors::StoreError;

/// Flat persistent store for the clipboard history, newest first.
pub trait HistoryStorePort: Send + Sync {
    /// Read every decodable record. A missing store yields an empty list.
    fn load(&self) -> Result<Vec<ClipboardItem>, StoreError>;

    /// Replace the store contents with `items`.
    fn save(&self, items: &[ClipboardItem]) -> Result<(), StoreError>;

    fn path(&self) -> &Path;
}
