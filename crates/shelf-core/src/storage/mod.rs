//! Storage layer
//!
//! Durable key-value storage behind a small port so callers never touch the
//! filesystem directly.
//!
//! ## Adapters
//!
//! - **FileStorage**: one JSON file per key inside the data directory,
//!   written atomically
//! - **MemoryStorage**: in-process map for tests and throwaway sessions

pub mod error;
pub mod file;
pub mod memory;

pub use error::{StorageError, StorageResult};
pub use file::{is_valid_key, FileStorage};
pub use memory::MemoryStorage;

/// Durable string key-value storage
pub trait KeyValueStore {
    /// Read the value stored under `key`, `None` if absent
    fn get(&self, key: &str) -> StorageResult<Option<String>>;

    /// Store `value` under `key`, replacing any previous value
    fn set(&mut self, key: &str, value: &str) -> StorageResult<()>;
}

impl<T: KeyValueStore + ?Sized> KeyValueStore for Box<T> {
    fn get(&self, key: &str) -> StorageResult<Option<String>> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> StorageResult<()> {
        (**self).set(key, value)
    }
}
