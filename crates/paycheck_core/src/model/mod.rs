//! Persisted document shapes.
//!
//! # Responsibility
//! - Define the paycheck sheet record stored by every backend.
//! - Define the `Document` capability that stores are generic over.
//!
//! # Invariants
//! - Every document is identified by a caller-assigned `_id`.
//! - `_rev` is owned by the store and opaque to callers.

pub mod paycheck;

use serde::de::DeserializeOwned;
use serde::Serialize;

/// A self-contained record addressable by `_id` and versioned by `_rev`.
pub trait Document: Clone + Serialize + DeserializeOwned {
    /// Caller-assigned identifier, used as the storage key.
    fn id(&self) -> &str;
    /// Last revision marker assigned by a store, if any.
    fn rev(&self) -> Option<&str>;
    /// Replaces the revision marker. Stores call this on write.
    fn set_rev(&mut self, rev: Option<String>);
}
