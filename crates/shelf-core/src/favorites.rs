//! Favorites persistence
//!
//! The favorites set is stored as a JSON array of book ids under a single
//! storage key. Every toggle is written through immediately.
//!
//! Older releases keyed favorites by book title instead of id. On startup
//! [`migrate_if_legacy`] converts such data once: if none of the stored
//! values is a known id, every value is treated as a title and mapped to the
//! matching book's id. Titles that no longer exist in the dataset are dropped.
//!
//! Storage failures never reach the caller. A corrupt value loads as an empty
//! set and a failed write leaves the in-memory set authoritative for the rest
//! of the session.

use serde_json::Value;
use tracing::{debug, error, info, warn};

use crate::dataset::Dataset;
use crate::models::{BookId, Favorites};
use crate::storage::KeyValueStore;

/// Default storage key for the favorites list
pub const FAVORITES_STORAGE_KEY: &str = "designBookshelfFavorites";

/// Owns the favorites set and keeps it in sync with storage
pub struct FavoritesStore<S: KeyValueStore> {
    storage: S,
    key: String,
    favorites: Favorites,
    last_write_error: Option<String>,
}

impl<S: KeyValueStore> FavoritesStore<S> {
    /// Create a store over `storage`, using `key` for the persisted value
    ///
    /// The set starts empty; call [`FavoritesStore::hydrate`] to restore it.
    pub fn new(storage: S, key: impl Into<String>) -> Self {
        Self {
            storage,
            key: key.into(),
            favorites: Favorites::new(),
            last_write_error: None,
        }
    }

    /// Restore favorites from storage, migrating legacy title-keyed data
    ///
    /// If the migration changed the stored value it is written back once so
    /// subsequent starts see ids.
    pub fn hydrate(&mut self, dataset: &Dataset) -> &Favorites {
        let stored = self.load();
        let migrated = migrate_if_legacy(&stored, dataset);

        let unchanged = stored.len() == migrated.len()
            && stored
                .iter()
                .zip(migrated.iter())
                .all(|(raw, id)| raw == id.as_str());

        self.favorites = migrated;
        if !unchanged {
            info!(
                "Migrated {} stored favorite(s) to {} id(s)",
                stored.len(),
                self.favorites.len()
            );
            self.persist();
        }
        &self.favorites
    }

    /// Read the raw persisted entries
    ///
    /// Absent, unreadable or unparsable values all yield an empty list.
    /// Numbers are accepted and converted to their textual form; other
    /// non-string entries are skipped.
    pub fn load(&self) -> Vec<String> {
        let raw = match self.storage.get(&self.key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return Vec::new(),
            Err(e) => {
                warn!("Failed to read favorites: {}", e);
                return Vec::new();
            }
        };

        let entries = match serde_json::from_str::<Value>(&raw) {
            Ok(Value::Array(entries)) => entries,
            Ok(other) => {
                warn!("Ignoring stored favorites: expected array, found {}", other);
                return Vec::new();
            }
            Err(e) => {
                warn!("Ignoring corrupt stored favorites: {}", e);
                return Vec::new();
            }
        };

        entries
            .into_iter()
            .filter_map(|entry| match entry {
                Value::String(s) => Some(s),
                Value::Number(n) => Some(BookId::from_number(&n).as_str().to_string()),
                _ => None,
            })
            .collect()
    }

    /// Flip membership of `id` and write the new set through to storage
    pub fn toggle(&mut self, id: &BookId) -> &Favorites {
        let added = self.favorites.toggle(id);
        debug!(
            "{} favorite {}",
            if added { "Added" } else { "Removed" },
            id
        );
        self.persist();
        &self.favorites
    }

    /// Write the full set under the storage key
    ///
    /// Failures are logged and remembered, never returned.
    pub fn persist(&mut self) {
        let json = match serde_json::to_string(&self.favorites) {
            Ok(json) => json,
            Err(e) => {
                warn!("Failed to encode favorites: {}", e);
                self.last_write_error = Some(e.to_string());
                return;
            }
        };

        match self.storage.set(&self.key, &json) {
            Ok(()) => self.last_write_error = None,
            Err(e) => {
                if e.is_recoverable() {
                    warn!("Failed to persist favorites: {}", e);
                } else {
                    error!("Failed to persist favorites: {}", e);
                }
                if let Some(hint) = e.recovery_suggestion() {
                    warn!("{}", hint);
                }
                self.last_write_error = Some(e.to_string());
            }
        }
    }

    pub fn favorites(&self) -> &Favorites {
        &self.favorites
    }

    pub fn is_favorite(&self, id: &BookId) -> bool {
        self.favorites.contains(id)
    }

    pub fn len(&self) -> usize {
        self.favorites.len()
    }

    pub fn is_empty(&self) -> bool {
        self.favorites.is_empty()
    }

    /// Message of the most recent failed write, cleared by the next success
    pub fn last_write_error(&self) -> Option<&str> {
        self.last_write_error.as_deref()
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }
}

/// Convert legacy title-keyed favorites to ids
///
/// Triggers only when `stored` is non-empty and none of its entries is a
/// current book id. Each entry is then looked up as an exact title; entries
/// without a match are dropped. When not triggered, entries are taken as ids
/// unchanged (duplicates removed, unknown ids kept).
pub fn migrate_if_legacy(stored: &[String], dataset: &Dataset) -> Favorites {
    let is_legacy = !stored.is_empty()
        && !stored
            .iter()
            .any(|entry| dataset.contains_id(&BookId::new(entry.as_str())));

    if !is_legacy {
        return stored.iter().map(|s| BookId::new(s.as_str())).collect();
    }

    stored
        .iter()
        .filter_map(|title| match dataset.find_by_title(title) {
            Some(book) => Some(book.id.clone()),
            None => {
                debug!("Dropping legacy favorite with unknown title '{}'", title);
                None
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Book;
    use crate::storage::{MemoryStorage, StorageError, StorageResult};

    const KEY: &str = FAVORITES_STORAGE_KEY;

    fn dataset() -> Dataset {
        Dataset::from_books(vec![
            Book::new("a", "Hooked: How to Build Habit-Forming Products", "UX Design"),
            Book::new("b", "Refactoring UI", "UI Design"),
            Book::new("c", "Sprint", "Design Process"),
        ])
        .unwrap()
    }

    fn ids(favorites: &Favorites) -> Vec<&str> {
        favorites.iter().map(|id| id.as_str()).collect()
    }

    fn strings(values: &[&str]) -> Vec<String> {
        values.iter().map(|s| s.to_string()).collect()
    }

    /// Storage whose writes always fail
    struct ReadOnlyStorage {
        inner: MemoryStorage,
    }

    impl KeyValueStore for ReadOnlyStorage {
        fn get(&self, key: &str) -> StorageResult<Option<String>> {
            self.inner.get(key)
        }

        fn set(&mut self, _key: &str, _value: &str) -> StorageResult<()> {
            Err(StorageError::Unavailable("quota exceeded".to_string()))
        }
    }

    #[test]
    fn test_load_absent_is_empty() {
        let store = FavoritesStore::new(MemoryStorage::new(), KEY);
        assert!(store.load().is_empty());
    }

    #[test]
    fn test_load_corrupt_is_empty() {
        for raw in ["{not json", "{\"a\": 1}", "\"a\"", "null"] {
            let store = FavoritesStore::new(MemoryStorage::with_value(KEY, raw), KEY);
            assert!(store.load().is_empty(), "raw value {:?}", raw);
        }
    }

    #[test]
    fn test_load_accepts_numbers() {
        let store = FavoritesStore::new(MemoryStorage::with_value(KEY, "[1, \"b\", null]"), KEY);
        assert_eq!(store.load(), strings(&["1", "b"]));
    }

    #[test]
    fn test_float_ids_match_dataset_ids() {
        let dataset = Dataset::from_json(
            r#"[{"id": 1.0, "Title": "One", "Category": "UX"},
                {"id": 2.0, "Title": "Two", "Category": "UI"}]"#,
        )
        .unwrap();
        let mut store = FavoritesStore::new(MemoryStorage::with_value(KEY, "[2.0]"), KEY);

        assert_eq!(store.load(), strings(&["2"]));
        store.hydrate(&dataset);
        assert!(store.is_favorite(&dataset.books()[1].id));
    }

    #[test]
    fn test_persist_then_load_round_trip() {
        let dataset = dataset();
        let mut store = FavoritesStore::new(MemoryStorage::new(), KEY);
        store.hydrate(&dataset);
        store.toggle(&BookId::new("c"));
        store.toggle(&BookId::new("a"));

        let reloaded = FavoritesStore::new(store.storage().clone(), KEY);
        let restored = migrate_if_legacy(&reloaded.load(), &dataset);
        assert_eq!(&restored, store.favorites());
        assert_eq!(ids(&restored), vec!["c", "a"]);
    }

    #[test]
    fn test_toggle_parity() {
        let mut store = FavoritesStore::new(MemoryStorage::new(), KEY);
        let id = BookId::new("a");
        for n in 1..=6 {
            store.toggle(&id);
            assert_eq!(store.is_favorite(&id), n % 2 == 1, "after {} toggles", n);
        }
        assert!(store.is_empty());
    }

    #[test]
    fn test_toggle_writes_through() {
        let mut store = FavoritesStore::new(MemoryStorage::new(), KEY);
        store.toggle(&BookId::new("b"));
        assert_eq!(
            store.storage().get(KEY).unwrap().as_deref(),
            Some("[\"b\"]")
        );
        store.toggle(&BookId::new("b"));
        assert_eq!(store.storage().get(KEY).unwrap().as_deref(), Some("[]"));
    }

    #[test]
    fn test_failed_write_keeps_memory_state() {
        let storage = ReadOnlyStorage {
            inner: MemoryStorage::new(),
        };
        let mut store = FavoritesStore::new(storage, KEY);

        store.toggle(&BookId::new("a"));
        assert!(store.is_favorite(&BookId::new("a")));
        assert!(store.last_write_error().unwrap().contains("quota exceeded"));
        assert!(store.storage().get(KEY).unwrap().is_none());
    }

    #[test]
    fn test_successful_write_clears_error() {
        let mut store = FavoritesStore::new(MemoryStorage::new(), KEY);
        store.last_write_error = Some("earlier failure".to_string());
        store.toggle(&BookId::new("a"));
        assert!(store.last_write_error().is_none());
    }

    #[test]
    fn test_migrate_all_titles_known() {
        let stored = strings(&["Sprint", "Hooked: How to Build Habit-Forming Products"]);
        let migrated = migrate_if_legacy(&stored, &dataset());
        assert_eq!(ids(&migrated), vec!["c", "a"]);
    }

    #[test]
    fn test_migrate_drops_unknown_title() {
        let stored = strings(&["Sprint", "A Title That Was Renamed"]);
        let migrated = migrate_if_legacy(&stored, &dataset());
        assert_eq!(ids(&migrated), vec!["c"]);
    }

    #[test]
    fn test_migrate_not_triggered_when_any_id_matches() {
        // "Sprint" would match a title, but "a" is a known id so nothing is remapped
        let stored = strings(&["a", "Sprint", "zzz"]);
        let migrated = migrate_if_legacy(&stored, &dataset());
        assert_eq!(ids(&migrated), vec!["a", "Sprint", "zzz"]);
    }

    #[test]
    fn test_migrate_empty_is_empty() {
        assert!(migrate_if_legacy(&[], &dataset()).is_empty());
    }

    #[test]
    fn test_migrate_dedups_ids() {
        let stored = strings(&["a", "a", "b"]);
        assert_eq!(ids(&migrate_if_legacy(&stored, &dataset())), vec!["a", "b"]);
    }

    #[test]
    fn test_hydrate_rewrites_legacy_value() {
        let legacy = serde_json::to_string(&["Refactoring UI", "Sprint"]).unwrap();
        let mut store = FavoritesStore::new(MemoryStorage::with_value(KEY, legacy), KEY);

        let favorites = store.hydrate(&dataset()).clone();
        assert_eq!(ids(&favorites), vec!["b", "c"]);
        assert_eq!(
            store.storage().get(KEY).unwrap().as_deref(),
            Some("[\"b\",\"c\"]")
        );
    }

    #[test]
    fn test_hydrate_leaves_current_value_untouched() {
        let mut store = FavoritesStore::new(MemoryStorage::with_value(KEY, "[ \"a\" ]"), KEY);
        store.hydrate(&dataset());
        assert!(store.is_favorite(&BookId::new("a")));
        // Not rewritten, original formatting preserved
        assert_eq!(store.storage().get(KEY).unwrap().as_deref(), Some("[ \"a\" ]"));
    }

    #[test]
    fn test_hydrate_corrupt_value_starts_empty() {
        let mut store = FavoritesStore::new(MemoryStorage::with_value(KEY, "[oops"), KEY);
        assert!(store.hydrate(&dataset()).is_empty());
        // Corrupt value is left alone until the next toggle
        assert_eq!(store.storage().get(KEY).unwrap().as_deref(), Some("[oops"));
    }
}
