//! `DocStore` over a flat key-value storage area.
//!
//! # Responsibility
//! - Map document ids to namespaced keys in a shared key space.
//! - Serialize whole documents as JSON values under those keys.
//!
//! # Invariants
//! - Every key written is `namespace + _id`; keys outside the namespace are
//!   never read, listed or modified.
//! - Stored values always carry the `_rev` assigned by the last `put`.

use crate::config::DEFAULT_NAMESPACE;
use crate::kv::KeyValueStorage;
use crate::model::Document;
use crate::store::revision::stamp;
use crate::store::{validate_for_put, DocStore, PutResponse, StoreError, StoreResult};
use log::{debug, warn};
use std::marker::PhantomData;

/// Document store partitioned from other users of `S` by a key prefix.
pub struct LocalStore<T, S> {
    storage: S,
    namespace: String,
    _doc: PhantomData<fn() -> T>,
}

impl<T: Document, S: KeyValueStorage> LocalStore<T, S> {
    /// Creates a store whose keys all start with `namespace`.
    ///
    /// # Errors
    /// - `Validation` when `namespace` is empty, since an empty prefix would
    ///   claim every key in the shared storage.
    pub fn new(storage: S, namespace: impl Into<String>) -> StoreResult<Self> {
        let namespace = namespace.into();
        if namespace.is_empty() {
            return Err(StoreError::Validation(
                "store namespace must not be empty".to_string(),
            ));
        }
        Ok(Self {
            storage,
            namespace,
            _doc: PhantomData,
        })
    }

    /// Creates a store under the `paycheck_sheets:` namespace.
    pub fn with_default_namespace(storage: S) -> Self {
        Self {
            storage,
            namespace: DEFAULT_NAMESPACE.to_string(),
            _doc: PhantomData,
        }
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    fn storage_key(&self, id: &str) -> String {
        format!("{}{id}", self.namespace)
    }

    fn stored_rev(&self, key: &str) -> StoreResult<Option<String>> {
        let Some(raw) = self.storage.get_item(key)? else {
            return Ok(None);
        };
        match serde_json::from_str::<serde_json::Value>(&raw) {
            Ok(value) => Ok(value
                .get("_rev")
                .and_then(serde_json::Value::as_str)
                .map(str::to_string)),
            Err(err) => {
                warn!(
                    "event=doc_put module=store backend=local status=overwrite_corrupt key={} error={}",
                    key, err
                );
                Ok(None)
            }
        }
    }
}

impl<T: Document, S: KeyValueStorage> DocStore<T> for LocalStore<T, S> {
    fn get(&self, id: &str) -> StoreResult<T> {
        let raw = self
            .storage
            .get_item(&self.storage_key(id))?
            .filter(|raw| !raw.is_empty())
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;
        Ok(serde_json::from_str(&raw)?)
    }

    fn put(&self, doc: &T) -> StoreResult<PutResponse> {
        validate_for_put(doc)?;
        let key = self.storage_key(doc.id());
        let previous = self.stored_rev(&key)?;
        let stamped = stamp(doc, previous.as_deref())?;

        self.storage.set_item(&key, &stamped.body)?;
        debug!(
            "event=doc_put module=store backend=local status=ok id={} rev={}",
            doc.id(),
            stamped.rev
        );
        Ok(PutResponse::written(doc.id(), stamped.rev))
    }

    fn remove(&self, id: &str) -> StoreResult<()> {
        self.storage.remove_item(&self.storage_key(id))?;
        debug!("event=doc_remove module=store backend=local status=ok id={id}");
        Ok(())
    }

    /// Walks the whole shared key space by index; cost grows with every key
    /// in `S`, not only this namespace's.
    fn list(&self, prefix: &str) -> StoreResult<Vec<String>> {
        let mut ids = Vec::new();
        for index in 0..self.storage.len()? {
            let Some(key) = self.storage.key(index)? else {
                continue;
            };
            let Some(id) = key.strip_prefix(self.namespace.as_str()) else {
                continue;
            };
            if id.starts_with(prefix) {
                ids.push(id.to_string());
            }
        }
        ids.sort();
        ids.dedup();
        Ok(ids)
    }
}
