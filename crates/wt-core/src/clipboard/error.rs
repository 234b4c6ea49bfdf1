use thiserror::Error;

use crate::ports::StoreError;

/// Errors raised by clipboard history mutations.
#[derive(Debug, Error)]
pub enum HistoryError {
    #[error("index {index} out of range (history holds {len} items)")]
    IndexOutOfRange { index: i64, len: usize },

    /// The in-memory mutation was applied but writing the store failed.
    #[error("failed to persist clipboard history: {0}")]
    Store(#[from] StoreError),
}
