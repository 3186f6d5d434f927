//! Core persistence for paycheck sheets.
//! Documents are stored through the `DocStore` contract, backed either by a
//! namespaced key-value area or by the embedded SQLite document database.

pub mod config;
pub mod db;
pub mod kv;
pub mod logging;
pub mod model;
pub mod service;
pub mod store;

pub use config::{StoreConfig, DEFAULT_DB_NAME, DEFAULT_NAMESPACE};
pub use kv::{KeyValueStorage, MemoryStorage, SqliteKeyValueStorage};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::paycheck::{Allocation, PaycheckDoc};
pub use model::Document;
pub use service::sheet_service::SheetService;
pub use store::embedded_store::EmbeddedStore;
pub use store::local_store::LocalStore;
pub use store::{DocStore, PutResponse, StoreError, StoreResult, NOT_FOUND_STATUS};

/// Minimal health-check API for integration probes.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::{core_version, ping};

    #[test]
    fn ping_returns_pong() {
        assert_eq!(ping(), "pong");
    }

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
