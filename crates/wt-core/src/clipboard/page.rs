use std::ops::Range;

use serde::{Deserialize, Serialize};

use super::ClipboardItem;

/// One page of clipboard history plus the page count it was cut from.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryPage {
    pub items: Vec<ClipboardItem>,
    pub total_pages: i64,
}

/// Compute the slice of a `total`-long history that backs `page`.
///
/// Returns the index range to copy (or `None` for an empty page) and the total
/// page count. Rules:
///
/// - `total_pages = ceil(total / page_size)` when both are positive, else `0`
/// - `page` is clamped into `[1, total_pages]`
/// - an empty history or a non-positive `page_size` yields an empty page
/// - a start index at or past `total` yields an empty page ("no more data")
pub fn page_bounds(total: usize, page: i64, page_size: i64) -> (Option<Range<usize>>, i64) {
    let total = i64::try_from(total).unwrap_or(i64::MAX);

    let total_pages = if total > 0 && page_size > 0 {
        (total - 1) / page_size + 1
    } else {
        0
    };

    if total == 0 || page_size <= 0 {
        return (None, total_pages);
    }

    let page = page.clamp(1, total_pages);
    let start = (page - 1).saturating_mul(page_size);
    if start >= total {
        return (None, total_pages);
    }
    let end = start.saturating_add(page_size).min(total);

    (Some(start as usize..end as usize), total_pages)
}
