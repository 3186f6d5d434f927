//! `DocStore` adapter over the embedded database's `documents` table.
//!
//! # Responsibility
//! - Translate the document contract into SQL against a migrated connection.
//! - Keep revision bookkeeping atomic with the body write.
//!
//! # Invariants
//! - Only connections at the latest schema version are accepted.
//! - `documents.rev` always equals the `_rev` embedded in `documents.body`.

use crate::db::migrations::{current_user_version, latest_version, table_exists};
use crate::model::Document;
use crate::store::revision::stamp;
use crate::store::{validate_for_put, DocStore, PutResponse, StoreError, StoreResult};
use log::debug;
use rusqlite::{params, Connection, OptionalExtension};
use std::marker::PhantomData;

const DOCUMENTS_TABLE: &str = "documents";

/// Document store backed by a SQLite connection opened through `db::open_db`.
pub struct EmbeddedStore<'conn, T> {
    conn: &'conn Connection,
    _doc: PhantomData<fn() -> T>,
}

impl<'conn, T: Document> EmbeddedStore<'conn, T> {
    /// Wraps a connection after checking its schema.
    ///
    /// # Errors
    /// - `UninitializedConnection` when migrations have not been applied.
    /// - `MissingRequiredTable` when `documents` does not exist.
    pub fn try_new(conn: &'conn Connection) -> StoreResult<Self> {
        let expected_version = latest_version();
        let actual_version = current_user_version(conn)?;
        if actual_version != expected_version {
            return Err(StoreError::UninitializedConnection {
                expected_version,
                actual_version,
            });
        }
        if !table_exists(conn, DOCUMENTS_TABLE)? {
            return Err(StoreError::MissingRequiredTable(DOCUMENTS_TABLE));
        }
        Ok(Self {
            conn,
            _doc: PhantomData,
        })
    }
}

impl<T: Document> DocStore<T> for EmbeddedStore<'_, T> {
    fn get(&self, id: &str) -> StoreResult<T> {
        let body: Option<String> = self
            .conn
            .query_row(
                "SELECT body FROM documents WHERE id = ?1;",
                [id],
                |row| row.get(0),
            )
            .optional()?;
        let body = body.ok_or_else(|| StoreError::NotFound(id.to_string()))?;
        Ok(serde_json::from_str(&body)?)
    }

    fn put(&self, doc: &T) -> StoreResult<PutResponse> {
        validate_for_put(doc)?;

        let tx = self.conn.unchecked_transaction()?;
        let previous: Option<String> = tx
            .query_row(
                "SELECT rev FROM documents WHERE id = ?1;",
                [doc.id()],
                |row| row.get(0),
            )
            .optional()?;
        let stamped = stamp(doc, previous.as_deref())?;

        tx.execute(
            "INSERT INTO documents (id, rev, body) VALUES (?1, ?2, ?3)
             ON CONFLICT(id) DO UPDATE SET
                rev = excluded.rev,
                body = excluded.body;",
            params![doc.id(), stamped.rev, stamped.body],
        )?;
        tx.commit()?;

        debug!(
            "event=doc_put module=store backend=embedded status=ok id={} rev={}",
            doc.id(),
            stamped.rev
        );
        Ok(PutResponse::written(doc.id(), stamped.rev))
    }

    fn remove(&self, id: &str) -> StoreResult<()> {
        let removed = self
            .conn
            .execute("DELETE FROM documents WHERE id = ?1;", [id])?;
        debug!("event=doc_remove module=store backend=embedded status=ok id={id} removed={removed}");
        Ok(())
    }

    fn list(&self, prefix: &str) -> StoreResult<Vec<String>> {
        let mut stmt = self.conn.prepare(
            "SELECT id FROM documents
             WHERE substr(id, 1, length(?1)) = ?1
             ORDER BY id ASC;",
        )?;
        let ids = stmt
            .query_map([prefix], |row| row.get::<_, String>(0))?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(ids)
    }
}
