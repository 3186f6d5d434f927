//! Document store contract shared by every backend.
//!
//! # Responsibility
//! - Define the `DocStore` capability callers depend on.
//! - Define the semantic error taxonomy surfaced by stores.
//!
//! # Invariants
//! - `put` replaces the whole document and assigns a fresh `_rev`.
//! - `get` on an unknown id fails with `StoreError::NotFound`.
//! - `remove` on an unknown id succeeds.
//! - `list` returns ids in ascending byte order with no duplicates.

use crate::db::DbError;
use crate::model::Document;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod embedded_store;
pub mod local_store;
pub mod revision;

pub type StoreResult<T> = Result<T, StoreError>;

/// Status marker carried by not-found failures.
pub const NOT_FOUND_STATUS: u16 = 404;

/// Error surfaced by document stores and their storage primitives.
#[derive(Debug)]
pub enum StoreError {
    NotFound(String),
    Validation(String),
    Serialization(serde_json::Error),
    Db(DbError),
    InvalidData(String),
    UninitializedConnection {
        expected_version: u32,
        actual_version: u32,
    },
    MissingRequiredTable(&'static str),
}

impl StoreError {
    /// HTTP-style status for callers that branch on it; only `NotFound` has one.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::NotFound(_) => Some(NOT_FOUND_STATUS),
            _ => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotFound(id) => write!(f, "document not found: {id}"),
            Self::Validation(message) => write!(f, "invalid document: {message}"),
            Self::Serialization(err) => write!(f, "document serialization failed: {err}"),
            Self::Db(err) => write!(f, "{err}"),
            Self::InvalidData(message) => write!(f, "invalid persisted data: {message}"),
            Self::UninitializedConnection {
                expected_version,
                actual_version,
            } => write!(
                f,
                "connection schema version {actual_version} does not match expected {expected_version}"
            ),
            Self::MissingRequiredTable(table) => write!(f, "required table `{table}` is missing"),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Serialization(err) => Some(err),
            Self::Db(err) => Some(err),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(value: serde_json::Error) -> Self {
        Self::Serialization(value)
    }
}

impl From<DbError> for StoreError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for StoreError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Acknowledgement returned by a successful `put`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PutResponse {
    pub ok: bool,
    pub id: String,
    pub rev: String,
}

impl PutResponse {
    pub(crate) fn written(id: impl Into<String>, rev: impl Into<String>) -> Self {
        Self {
            ok: true,
            id: id.into(),
            rev: rev.into(),
        }
    }
}

/// CRUD contract over whole documents addressed by `_id`.
pub trait DocStore<T: Document> {
    /// Fetches the document stored at `id`.
    fn get(&self, id: &str) -> StoreResult<T>;
    /// Persists `doc` in full, replacing any prior value for the same `_id`.
    fn put(&self, doc: &T) -> StoreResult<PutResponse>;
    /// Deletes the document at `id`. Unknown ids are a no-op.
    fn remove(&self, id: &str) -> StoreResult<()>;
    /// Lists ids starting with `prefix`, sorted ascending. `""` lists all.
    fn list(&self, prefix: &str) -> StoreResult<Vec<String>>;
}

impl<T: Document, S: DocStore<T> + ?Sized> DocStore<T> for &S {
    fn get(&self, id: &str) -> StoreResult<T> {
        (**self).get(id)
    }

    fn put(&self, doc: &T) -> StoreResult<PutResponse> {
        (**self).put(doc)
    }

    fn remove(&self, id: &str) -> StoreResult<()> {
        (**self).remove(id)
    }

    fn list(&self, prefix: &str) -> StoreResult<Vec<String>> {
        (**self).list(prefix)
    }
}

/// Rejects documents no backend can address.
pub(crate) fn validate_for_put<T: Document>(doc: &T) -> StoreResult<()> {
    if doc.id().is_empty() {
        return Err(StoreError::Validation("`_id` must not be empty".to_string()));
    }
    Ok(())
}
