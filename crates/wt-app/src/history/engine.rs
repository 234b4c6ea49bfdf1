//! Clipboard history engine.
//!
//! Owns the newest-first item list, the dedup state and the capacity policy.
//! Every mutation is flushed to the store while the engine lock is held, so
//! mutations and their writes happen in one order.

use std::path::Path;
use std::sync::{Arc, Mutex, MutexGuard};

use tracing::{debug, info, warn};
use wt_core::clipboard::{page_bounds, DEFAULT_MAX_RECORDS};
use wt_core::ports::{ClipboardCaptureHandler, ClockPort, HistoryStorePort};
use wt_core::{ClipboardItem, HistoryError, HistoryPage};

struct HistoryState {
    items: Vec<ClipboardItem>,
    /// Most recently captured value; not persisted.
    last_content: Option<String>,
    max_records: usize,
}

pub struct ClipboardHistoryEngine {
    store: Arc<dyn HistoryStorePort>,
    clock: Arc<dyn ClockPort>,
    state: Mutex<HistoryState>,
}

impl ClipboardHistoryEngine {
    /// Load the history from `store`.
    ///
    /// An unreadable store starts an empty history. A stored history longer
    /// than `max_records` is cut in memory only; the file is rewritten on the
    /// next mutation.
    pub fn new(
        store: Arc<dyn HistoryStorePort>,
        clock: Arc<dyn ClockPort>,
        max_records: usize,
    ) -> Self {
        let max_records = if max_records == 0 {
            DEFAULT_MAX_RECORDS
        } else {
            max_records
        };

        let mut items = match store.load() {
            Ok(items) => items,
            Err(err) => {
                warn!(error = %err, "failed to load clipboard history; starting empty");
                Vec::new()
            }
        };
        if items.len() > max_records {
            debug!(loaded = items.len(), max_records, "truncating loaded history");
            items.truncate(max_records);
        }
        info!(items = items.len(), path = %store.path().display(), "clipboard history loaded");

        Self {
            store,
            clock,
            state: Mutex::new(HistoryState {
                items,
                last_content: None,
                max_records,
            }),
        }
    }

    fn lock(&self) -> MutexGuard<'_, HistoryState> {
        self.state
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn persist(&self, state: &HistoryState) -> Result<(), HistoryError> {
        self.store.save(&state.items).map_err(|err| {
            warn!(error = %err, "failed to persist clipboard history");
            HistoryError::from(err)
        })
    }

    fn push_front(&self, state: &mut HistoryState, content: String) -> Result<(), HistoryError> {
        let item = ClipboardItem::new(content, self.clock.now_ms());
        state.items.insert(0, item);
        state.items.truncate(state.max_records);
        self.persist(state)
    }

    /// Record `content` as the newest item. No dedup against older items.
    pub fn add_item(&self, content: impl Into<String>) -> Result<(), HistoryError> {
        let mut state = self.lock();
        self.push_front(&mut state, content.into())
    }

    /// Record `content` unless it is empty or equal to the previous capture.
    /// Returns whether an item was added.
    pub fn capture(&self, content: impl Into<String>) -> Result<bool, HistoryError> {
        let content = content.into();
        if content.is_empty() {
            return Ok(false);
        }

        let mut state = self.lock();
        if state.last_content.as_deref() == Some(content.as_str()) {
            return Ok(false);
        }
        state.last_content = Some(content.clone());
        debug!(len = content.len(), "clipboard change captured");
        self.push_front(&mut state, content)?;
        Ok(true)
    }

    pub fn history(&self) -> Vec<ClipboardItem> {
        self.lock().items.clone()
    }

    pub fn history_page(&self, page: i64, page_size: i64) -> HistoryPage {
        let state = self.lock();
        let (range, total_pages) = page_bounds(state.items.len(), page, page_size);
        HistoryPage {
            items: range
                .map(|range| state.items[range].to_vec())
                .unwrap_or_default(),
            total_pages,
        }
    }

    pub fn remove_item(&self, index: i64) -> Result<(), HistoryError> {
        let mut state = self.lock();
        let len = state.items.len();
        let idx = usize::try_from(index)
            .ok()
            .filter(|&i| i < len)
            .ok_or(HistoryError::IndexOutOfRange { index, len })?;

        state.items.remove(idx);
        self.persist(&state)
    }

    pub fn clear(&self) -> Result<(), HistoryError> {
        let mut state = self.lock();
        state.items.clear();
        info!("clipboard history cleared");
        self.persist(&state)
    }

    /// Change the cap. Non-positive values are ignored; a shrinking cap
    /// truncates and persists immediately.
    pub fn set_max_records(&self, max: i64) -> Result<(), HistoryError> {
        let Some(max) = usize::try_from(max).ok().filter(|&m| m > 0) else {
            return Ok(());
        };

        let mut state = self.lock();
        state.max_records = max;
        if state.items.len() > max {
            state.items.truncate(max);
            self.persist(&state)?;
        }
        Ok(())
    }

    pub fn max_records(&self) -> usize {
        self.lock().max_records
    }

    pub fn store_path(&self) -> &Path {
        self.store.path()
    }
}

impl ClipboardCaptureHandler for ClipboardHistoryEngine {
    fn on_capture(&self, content: String) -> Result<bool, HistoryError> {
        self.capture(content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use std::sync::atomic::{AtomicI64, Ordering};

    use mockall::mock;
    use wt_core::ports::StoreError;

    #[derive(Default)]
    struct MemoryStore {
        items: Mutex<Vec<ClipboardItem>>,
        saves: Mutex<usize>,
        path: PathBuf,
    }

    impl MemoryStore {
        fn with_items(items: Vec<ClipboardItem>) -> Self {
            Self {
                items: Mutex::new(items),
                ..Default::default()
            }
        }

        fn saved(&self) -> Vec<ClipboardItem> {
            self.items.lock().unwrap().clone()
        }

        fn save_count(&self) -> usize {
            *self.saves.lock().unwrap()
        }
    }

    impl HistoryStorePort for MemoryStore {
        fn load(&self) -> Result<Vec<ClipboardItem>, StoreError> {
            Ok(self.saved())
        }

        fn save(&self, items: &[ClipboardItem]) -> Result<(), StoreError> {
            *self.items.lock().unwrap() = items.to_vec();
            *self.saves.lock().unwrap() += 1;
            Ok(())
        }

        fn path(&self) -> &Path {
            &self.path
        }
    }

    mock! {
        pub Store {}

        impl HistoryStorePort for Store {
            fn load(&self) -> Result<Vec<ClipboardItem>, StoreError>;
            fn save(&self, items: &[ClipboardItem]) -> Result<(), StoreError>;
            fn path(&self) -> &Path;
        }
    }

    /// Ticks one second per call.
    struct StepClock(AtomicI64);

    impl ClockPort for StepClock {
        fn now_ms(&self) -> i64 {
            self.0.fetch_add(1000, Ordering::SeqCst)
        }
    }

    fn io_err() -> StoreError {
        StoreError::Io {
            path: PathBuf::from("clipboard.txt"),
            source: std::io::Error::other("disk full"),
        }
    }

    fn engine_with(store: Arc<MemoryStore>, max: usize) -> ClipboardHistoryEngine {
        ClipboardHistoryEngine::new(store, Arc::new(StepClock(AtomicI64::new(1_000_000))), max)
    }

    fn contents(items: &[ClipboardItem]) -> Vec<&str> {
        items.iter().map(|i| i.content.as_str()).collect()
    }

    #[test]
    fn add_item_prepends_and_persists() {
        let store = Arc::new(MemoryStore::default());
        let engine = engine_with(store.clone(), 10);

        engine.add_item("first").unwrap();
        engine.add_item("second").unwrap();

        let history = engine.history();
        assert_eq!(contents(&history), ["second", "first"]);
        assert!(history[0].timestamp_ms > history[1].timestamp_ms);
        assert_eq!(store.saved(), history);
    }

    #[test]
    fn add_item_does_not_dedup() {
        let engine = engine_with(Arc::new(MemoryStore::default()), 10);
        engine.add_item("same").unwrap();
        engine.add_item("same").unwrap();
        assert_eq!(engine.history().len(), 2);
    }

    #[test]
    fn capacity_is_enforced_on_every_add() {
        let store = Arc::new(MemoryStore::default());
        let engine = engine_with(store.clone(), 3);

        for i in 0..5 {
            engine.add_item(format!("item {i}")).unwrap();
        }

        assert_eq!(contents(&engine.history()), ["item 4", "item 3", "item 2"]);
        assert_eq!(store.saved().len(), 3);
    }

    #[test]
    fn capture_skips_empty_and_consecutive_duplicates() {
        let engine = engine_with(Arc::new(MemoryStore::default()), 10);

        assert!(engine.capture("a").unwrap());
        assert!(!engine.capture("a").unwrap());
        assert!(!engine.capture("").unwrap());
        assert!(engine.capture("b").unwrap());
        // only the previous capture counts; "a" may come back
        assert!(engine.capture("a").unwrap());

        assert_eq!(contents(&engine.history()), ["a", "b", "a"]);
    }

    #[test]
    fn capture_handler_delegates_to_capture() {
        let engine = engine_with(Arc::new(MemoryStore::default()), 10);
        let handler: &dyn ClipboardCaptureHandler = &engine;
        assert!(handler.on_capture("x".into()).unwrap());
        assert!(!handler.on_capture("x".into()).unwrap());
    }

    #[test]
    fn pagination_over_twenty_five_items() {
        let engine = engine_with(Arc::new(MemoryStore::default()), 100);
        for i in 0..25 {
            engine.add_item(format!("{i}")).unwrap();
        }

        let sizes: Vec<_> = (1..=3)
            .map(|p| engine.history_page(p, 10).items.len())
            .collect();
        assert_eq!(sizes, [10, 10, 5]);

        let page1 = engine.history_page(1, 10);
        assert_eq!(page1.total_pages, 3);
        assert_eq!(page1.items[0].content, "24");

        let clamped = engine.history_page(4, 10);
        assert_eq!(clamped.items, engine.history_page(3, 10).items);
        assert_eq!(engine.history_page(0, 10).items, page1.items);

        let empty = engine.history_page(1, 0);
        assert!(empty.items.is_empty());
        assert_eq!(empty.total_pages, 0);
    }

    #[test]
    fn remove_item_checks_bounds() {
        let store = Arc::new(MemoryStore::default());
        let engine = engine_with(store.clone(), 10);
        for c in ["c", "b", "a"] {
            engine.add_item(c).unwrap();
        }

        assert!(matches!(
            engine.remove_item(3),
            Err(HistoryError::IndexOutOfRange { index: 3, len: 3 })
        ));
        assert!(matches!(
            engine.remove_item(-1),
            Err(HistoryError::IndexOutOfRange { index: -1, .. })
        ));

        engine.remove_item(1).unwrap();
        assert_eq!(contents(&engine.history()), ["a", "c"]);
        assert_eq!(contents(&store.saved()), ["a", "c"]);
    }

    #[test]
    fn clear_empties_and_persists() {
        let store = Arc::new(MemoryStore::default());
        let engine = engine_with(store.clone(), 10);
        engine.add_item("x").unwrap();

        engine.clear().unwrap();
        assert!(engine.history().is_empty());
        assert!(store.saved().is_empty());
    }

    #[test]
    fn set_max_records_truncates_and_ignores_non_positive() {
        let store = Arc::new(MemoryStore::default());
        let engine = engine_with(store.clone(), 10);
        for i in 0..6 {
            engine.add_item(format!("{i}")).unwrap();
        }
        let saves = store.save_count();

        engine.set_max_records(0).unwrap();
        engine.set_max_records(-4).unwrap();
        assert_eq!(engine.max_records(), 10);
        assert_eq!(store.save_count(), saves);

        engine.set_max_records(20).unwrap();
        assert_eq!(engine.max_records(), 20);
        assert_eq!(store.save_count(), saves);

        engine.set_max_records(4).unwrap();
        assert_eq!(engine.max_records(), 4);
        assert_eq!(contents(&engine.history()), ["5", "4", "3", "2"]);
        assert_eq!(store.saved().len(), 4);
    }

    #[test]
    fn oversized_store_is_truncated_in_memory_only() {
        let stored: Vec<_> = (0..8)
            .map(|i| ClipboardItem::new(format!("{i}"), i))
            .collect();
        let store = Arc::new(MemoryStore::with_items(stored));
        let engine = engine_with(store.clone(), 5);

        assert_eq!(engine.history().len(), 5);
        assert_eq!(store.saved().len(), 8);
        assert_eq!(store.save_count(), 0);
    }

    #[test]
    fn zero_cap_falls_back_to_default() {
        let engine = engine_with(Arc::new(MemoryStore::default()), 0);
        assert_eq!(engine.max_records(), DEFAULT_MAX_RECORDS);
    }

    #[test]
    fn unreadable_store_starts_empty() {
        let mut store = MockStore::new();
        store.expect_load().returning(|| Err(io_err()));
        store.expect_path().return_const(PathBuf::from("clipboard.txt"));

        let engine = ClipboardHistoryEngine::new(
            Arc::new(store),
            Arc::new(StepClock(AtomicI64::new(0))),
            10,
        );
        assert!(engine.history().is_empty());
    }

    #[test]
    fn failed_persist_keeps_memory_mutation() {
        let mut store = MockStore::new();
        store.expect_load().returning(|| Ok(Vec::new()));
        store.expect_path().return_const(PathBuf::from("clipboard.txt"));
        store.expect_save().returning(|_| Err(io_err()));

        let engine = ClipboardHistoryEngine::new(
            Arc::new(store),
            Arc::new(StepClock(AtomicI64::new(0))),
            10,
        );

        assert!(matches!(engine.add_item("kept"), Err(HistoryError::Store(_))));
        assert_eq!(contents(&engine.history()), ["kept"]);
    }
}
