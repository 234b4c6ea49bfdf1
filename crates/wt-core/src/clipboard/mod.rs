//! Clipboard history domain
//!
//! - `item`: a single captured clipboard value
//! - `page`: pagination rules for history reads
//! - `error`: errors raised by history mutations

mod error;
mod item;
mod page;

pub use error::HistoryError;
pub use item::ClipboardItem;
pub use page::{page_bounds, HistoryPage};

/// Default cap on the number of history items kept in memory and on disk.
pub const DEFAULT_MAX_RECORDS: usize = 1000;
