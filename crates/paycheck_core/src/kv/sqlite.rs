//! Durable key-value storage in the embedded database's `kv_items` table.

use super::KeyValueStorage;
use crate::db::migrations::table_exists;
use crate::store::{StoreError, StoreResult};
use rusqlite::{params, Connection, OptionalExtension};

const KV_TABLE: &str = "kv_items";

/// Key-value area persisted alongside documents in one SQLite file.
pub struct SqliteKeyValueStorage<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteKeyValueStorage<'conn> {
    /// Wraps a migrated connection.
    ///
    /// # Errors
    /// - `MissingRequiredTable` when `kv_items` has not been created.
    pub fn try_new(conn: &'conn Connection) -> StoreResult<Self> {
        if !table_exists(conn, KV_TABLE)? {
            return Err(StoreError::MissingRequiredTable(KV_TABLE));
        }
        Ok(Self { conn })
    }
}

impl KeyValueStorage for SqliteKeyValueStorage<'_> {
    fn get_item(&self, key: &str) -> StoreResult<Option<String>> {
        let value = self
            .conn
            .query_row(
                "SELECT value FROM kv_items WHERE key = ?1;",
                [key],
                |row| row.get(0),
            )
            .optional()?;
        Ok(value)
    }

    fn set_item(&self, key: &str, value: &str) -> StoreResult<()> {
        self.conn.execute(
            "INSERT INTO kv_items (key, value) VALUES (?1, ?2)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value;",
            params![key, value],
        )?;
        Ok(())
    }

    fn remove_item(&self, key: &str) -> StoreResult<()> {
        self.conn
            .execute("DELETE FROM kv_items WHERE key = ?1;", [key])?;
        Ok(())
    }

    fn key(&self, index: usize) -> StoreResult<Option<String>> {
        let Ok(offset) = i64::try_from(index) else {
            return Ok(None);
        };
        let key = self
            .conn
            .query_row(
                "SELECT key FROM kv_items ORDER BY key ASC LIMIT 1 OFFSET ?1;",
                [offset],
                |row| row.get(0),
            )
            .optional()?;
        Ok(key)
    }

    fn len(&self) -> StoreResult<usize> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM kv_items;", [], |row| row.get(0))?;
        usize::try_from(count)
            .map_err(|_| StoreError::InvalidData(format!("invalid kv_items count `{count}`")))
    }
}
