//! Synchronous key-value primitives consumed by `LocalStore`.
//!
//! # Responsibility
//! - Model a flat, string-keyed storage area shared by unrelated callers.
//! - Expose only read/write/delete by key and enumeration by index.
//!
//! # Invariants
//! - `key(i)` is defined for `0..len()`; out-of-range indexes yield `None`.
//! - Removing an absent key is not an error.

mod memory;
mod sqlite;

pub use memory::MemoryStorage;
pub use sqlite::SqliteKeyValueStorage;

use crate::store::StoreResult;

/// Flat string key space with positional key enumeration.
pub trait KeyValueStorage {
    fn get_item(&self, key: &str) -> StoreResult<Option<String>>;
    fn set_item(&self, key: &str, value: &str) -> StoreResult<()>;
    fn remove_item(&self, key: &str) -> StoreResult<()>;
    /// Key at position `index` in the storage's enumeration order.
    ///
    /// Both bundled storages seek to `index` on every call (`nth` over the map,
    /// SQL `OFFSET`), so a full `0..len()` walk is quadratic in the key count.
    fn key(&self, index: usize) -> StoreResult<Option<String>>;
    fn len(&self) -> StoreResult<usize>;

    fn is_empty(&self) -> StoreResult<bool> {
        Ok(self.len()? == 0)
    }
}

impl<S: KeyValueStorage + ?Sized> KeyValueStorage for &S {
    fn get_item(&self, key: &str) -> StoreResult<Option<String>> {
        (**self).get_item(key)
    }

    fn set_item(&self, key: &str, value: &str) -> StoreResult<()> {
        (**self).set_item(key, value)
    }

    fn remove_item(&self, key: &str) -> StoreResult<()> {
        (**self).remove_item(key)
    }

    fn key(&self, index: usize) -> StoreResult<Option<String>> {
        (**self).key(index)
    }

    fn len(&self) -> StoreResult<usize> {
        (**self).len()
    }
}
