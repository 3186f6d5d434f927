//! In-process key-value storage.

use super::KeyValueStorage;
use crate::store::StoreResult;
use std::cell::RefCell;
use std::collections::BTreeMap;

/// Volatile storage area; contents vanish with the value.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    items: RefCell<BTreeMap<String, String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStorage for MemoryStorage {
    fn get_item(&self, key: &str) -> StoreResult<Option<String>> {
        Ok(self.items.borrow().get(key).cloned())
    }

    fn set_item(&self, key: &str, value: &str) -> StoreResult<()> {
        self.items
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_item(&self, key: &str) -> StoreResult<()> {
        self.items.borrow_mut().remove(key);
        Ok(())
    }

    fn key(&self, index: usize) -> StoreResult<Option<String>> {
        Ok(self.items.borrow().keys().nth(index).cloned())
    }

    fn len(&self) -> StoreResult<usize> {
        Ok(self.items.borrow().len())
    }
}
