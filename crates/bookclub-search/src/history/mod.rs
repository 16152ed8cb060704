//! Recent-query history.
//!
//! A most-recent-first list of submitted queries, deduplicated and capped,
//! persisted as a JSON array of strings in a key-value [`HistoryStore`].
//! History is a convenience: unreadable data reads as empty and failed writes
//! are logged and dropped.

pub use error::HistoryError;
use error::Result;
use tracing::{debug, error, warn};

mod store;

pub use store::{DATA_DIR_DEFAULT, DATA_DIR_ENV, JsonFileStore, MemoryStore};

/// Storage slot the history lives under.
pub const HISTORY_KEY: &str = "bc3_search_history";
/// Maximum number of remembered queries.
pub const HISTORY_CAPACITY: usize = 10;

/// A namespaced key-value slot for serialized history.
pub trait HistoryStore {
    /// Raw stored value, `None` when the slot is empty.
    fn load(&self, key: &str) -> Result<Option<String>>;

    fn save(&mut self, key: &str, value: &str) -> Result<()>;

    fn remove(&mut self, key: &str) -> Result<()>;
}

/// The query history service, holding its own store.
///
/// ```rust
/// use bookclub_search::{MemoryStore, QueryHistory};
///
/// let mut history = QueryHistory::new(MemoryStore::new());
/// history.add("공룡");
/// history.add("신비");
/// history.add("공룡");
/// assert_eq!(history.list(), vec!["공룡", "신비"]);
/// ```
#[derive(Debug, Clone)]
pub struct QueryHistory<S> {
    store: S,
    key: String,
    capacity: usize,
}

impl<S: HistoryStore> QueryHistory<S> {
    pub fn new(store: S) -> Self {
        Self::with_key(store, HISTORY_KEY)
    }

    pub fn with_key(store: S, key: impl Into<String>) -> Self {
        Self {
            store,
            key: key.into(),
            capacity: HISTORY_CAPACITY,
        }
    }

    /// Stored queries, most recent first. Missing or unreadable data is empty.
    pub fn list(&self) -> Vec<String> {
        let raw = match self.store.load(&self.key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return Vec::new(),
            Err(e) => {
                warn!(error = %e, key = %self.key, "Failed to load search history");
                return Vec::new();
            }
        };

        serde_json::from_str(&raw).unwrap_or_else(|e| {
            warn!(error = %e, key = %self.key, "Stored search history is corrupt, treating as empty");
            Vec::new()
        })
    }

    /// Record `query` as the most recent search.
    ///
    /// Blank queries are ignored. An existing identical entry moves to the
    /// front instead of being duplicated, and the list is cut to capacity.
    pub fn add(&mut self, query: &str) {
        if query.trim().is_empty() {
            return;
        }

        let mut history = self.list();
        history.retain(|item| item != query);
        history.insert(0, query.to_string());
        history.truncate(self.capacity);

        if let Err(e) = self.persist(&history) {
            error!(error = %e, key = %self.key, "Failed to save search history");
        } else {
            debug!(entries = history.len(), "Recorded search query");
        }
    }

    /// Forget every stored query.
    pub fn clear(&mut self) {
        if let Err(e) = self.store.remove(&self.key) {
            error!(error = %e, key = %self.key, "Failed to clear search history");
        }
    }

    pub fn len(&self) -> usize {
        self.list().len()
    }

    pub fn is_empty(&self) -> bool {
        self.list().is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }

    fn persist(&mut self, history: &[String]) -> Result<()> {
        let json = serde_json::to_string(history)?;
        self.store.save(&self.key, &json)
    }
}

mod error {
    use thiserror::Error;

    #[derive(Error, Debug)]
    pub enum HistoryError {
        #[error("IO error: {0}")]
        Io(#[from] std::io::Error),
        #[error("Serialization error: {0}")]
        Serde(#[from] serde_json::Error),
    }

    pub type Result<T> = std::result::Result<T, HistoryError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    /// A store whose reads and writes always fail.
    #[derive(Default)]
    struct BrokenStore;

    impl HistoryStore for BrokenStore {
        fn load(&self, _key: &str) -> Result<Option<String>> {
            Err(std::io::Error::other("disk on fire").into())
        }

        fn save(&mut self, _key: &str, _value: &str) -> Result<()> {
            Err(std::io::Error::other("disk on fire").into())
        }

        fn remove(&mut self, _key: &str) -> Result<()> {
            Err(std::io::Error::other("disk on fire").into())
        }
    }

    fn history() -> QueryHistory<MemoryStore> {
        QueryHistory::new(MemoryStore::new())
    }

    #[test]
    fn test_starts_empty() {
        let history = history();
        assert!(history.list().is_empty());
        assert!(history.is_empty());
        assert_eq!(history.capacity(), 10);
    }

    #[test]
    fn test_most_recent_first() {
        let mut history = history();
        history.add("a");
        history.add("b");
        history.add("c");
        assert_eq!(history.list(), vec!["c", "b", "a"]);
    }

    #[test]
    fn test_capacity_drops_oldest() {
        let mut history = history();
        for i in 1..=11 {
            history.add(&format!("q{i}"));
        }
        let list = history.list();
        assert_eq!(list.len(), 10);
        assert_eq!(list.first().map(String::as_str), Some("q11"));
        assert_eq!(list.last().map(String::as_str), Some("q2"));
        assert!(!list.contains(&"q1".to_string()));
    }

    #[test]
    fn test_readd_moves_to_front() {
        let mut history = history();
        for q in ["a", "b", "c"] {
            history.add(q);
        }
        history.add("a");
        assert_eq!(history.list(), vec!["a", "c", "b"]);
        assert_eq!(history.len(), 3);
    }

    #[test]
    fn test_readd_when_full_keeps_everyone() {
        let mut history = history();
        for i in 1..=10 {
            history.add(&format!("q{i}"));
        }
        history.add("q1");
        let list = history.list();
        assert_eq!(list.len(), 10);
        assert_eq!(list[0], "q1");
        assert!(list.contains(&"q2".to_string()));
    }

    #[test]
    fn test_blank_queries_ignored() {
        let mut history = history();
        history.add("a");
        let before = history.store().raw(HISTORY_KEY).map(str::to_string);

        history.add("");
        history.add("   ");
        history.add("\t\n");
        assert_eq!(history.store().raw(HISTORY_KEY).map(str::to_string), before);
        assert_eq!(history.list(), vec!["a"]);
    }

    #[test]
    fn test_blank_add_on_empty_store_writes_nothing() {
        let mut history = history();
        history.add("  ");
        assert_eq!(history.store().raw(HISTORY_KEY), None);
    }

    #[test]
    fn test_dedupe_is_exact() {
        let mut history = history();
        history.add("Dino");
        history.add("dino");
        history.add(" dino");
        assert_eq!(history.list(), vec![" dino", "dino", "Dino"]);
    }

    #[test]
    fn test_corrupt_storage_reads_empty() {
        let mut store = MemoryStore::new();
        store.insert_raw(HISTORY_KEY, "{not json");
        let mut history = QueryHistory::new(store);
        assert!(history.list().is_empty());

        // The next add starts over from an empty list
        history.add("공룡");
        assert_eq!(history.list(), vec!["공룡"]);
    }

    #[test]
    fn test_wrong_shape_reads_empty() {
        let mut store = MemoryStore::new();
        store.insert_raw(HISTORY_KEY, r#"{"queries":["a"]}"#);
        assert!(QueryHistory::new(store).list().is_empty());
    }

    #[test]
    fn test_clear() {
        let mut history = history();
        history.add("a");
        history.add("b");
        history.clear();
        assert!(history.list().is_empty());
        assert_eq!(history.store().raw(HISTORY_KEY), None);
    }

    #[test]
    fn test_store_failures_are_swallowed() {
        let mut history = QueryHistory::new(BrokenStore);
        history.add("a");
        history.clear();
        assert!(history.list().is_empty());
    }

    #[test]
    fn test_custom_key_is_isolated() {
        let mut history = QueryHistory::with_key(MemoryStore::new(), "other");
        history.add("a");
        let store = history.into_store();
        assert!(store.raw("other").is_some());
        assert!(store.raw(HISTORY_KEY).is_none());
    }

    #[test]
    fn test_file_backed_history_survives_reopen() {
        let dir = tempfile::tempdir().unwrap();
        {
            let mut history = QueryHistory::new(JsonFileStore::new(dir.path()));
            history.add("우주");
            history.add("마법");
        }
        let reopened = QueryHistory::new(JsonFileStore::new(dir.path()));
        assert_eq!(reopened.list(), vec!["마법", "우주"]);
    }
}
