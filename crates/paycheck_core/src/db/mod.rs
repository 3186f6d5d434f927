//! Embedded document database bootstrap.
//!
//! # Responsibility
//! - Open and configure the SQLite database backing persistent stores.
//! - Apply schema migrations in deterministic order.
//!
//! # Invariants
//! - Migration version is tracked via `PRAGMA user_version`.
//! - Stores must not read/write documents before migrations succeed.
//! - No replication or sync target is ever configured.

use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};

pub mod migrations;
mod open;

pub use open::{open_db, open_db_in_memory};

pub type DbResult<T> = Result<T, DbError>;

const DB_FILE_EXTENSION: &str = "sqlite3";

#[derive(Debug)]
pub enum DbError {
    Sqlite(rusqlite::Error),
    Io(std::io::Error),
    UnsupportedSchemaVersion {
        db_version: u32,
        latest_supported: u32,
    },
}

impl Display for DbError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Sqlite(err) => write!(f, "{err}"),
            Self::Io(err) => write!(f, "database directory error: {err}"),
            Self::UnsupportedSchemaVersion {
                db_version,
                latest_supported,
            } => write!(
                f,
                "database schema version {db_version} is newer than supported {latest_supported}"
            ),
        }
    }
}

impl Error for DbError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Sqlite(err) => Some(err),
            Self::Io(err) => Some(err),
            Self::UnsupportedSchemaVersion { .. } => None,
        }
    }
}

impl From<rusqlite::Error> for DbError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Sqlite(value)
    }
}

impl From<std::io::Error> for DbError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

/// Where the embedded database keeps its data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Adapter {
    /// One database file per name inside the given directory.
    File(PathBuf),
    /// Process-local, discarded when the connection drops.
    Memory,
}

/// Construction parameters for the embedded database.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DbConfig {
    pub name: String,
    pub adapter: Adapter,
}

impl DbConfig {
    pub fn new(name: impl Into<String>, adapter: Adapter) -> Self {
        Self {
            name: name.into(),
            adapter,
        }
    }

    /// Database file path for file-backed adapters, `None` for memory.
    pub fn file_path(&self) -> Option<PathBuf> {
        match &self.adapter {
            Adapter::File(dir) => Some(db_file_in(dir, &self.name)),
            Adapter::Memory => None,
        }
    }
}

fn db_file_in(dir: &Path, name: &str) -> PathBuf {
    dir.join(format!("{name}.{DB_FILE_EXTENSION}"))
}
