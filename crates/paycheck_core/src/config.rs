//! Store configuration.
//!
//! # Invariants
//! - Namespace and database name are never empty after `validate()`.

use crate::db::{Adapter, DbConfig};
use crate::store::{StoreError, StoreResult};
use std::path::PathBuf;

/// Key prefix claimed by paycheck sheets in a shared key-value area.
pub const DEFAULT_NAMESPACE: &str = "paycheck_sheets:";
/// Name of the embedded database holding paycheck sheets.
pub const DEFAULT_DB_NAME: &str = "paycheck_sheets";

/// Settings shared by both storage backends.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    /// Prefix for `LocalStore` keys.
    pub namespace: String,
    /// Embedded database name.
    pub db_name: String,
    /// Directory for the database file; `None` keeps data in memory.
    pub data_dir: Option<PathBuf>,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            namespace: DEFAULT_NAMESPACE.to_string(),
            db_name: DEFAULT_DB_NAME.to_string(),
            data_dir: None,
        }
    }
}

impl StoreConfig {
    pub fn with_data_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.data_dir = Some(dir.into());
        self
    }

    pub fn with_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = namespace.into();
        self
    }

    pub fn validate(&self) -> StoreResult<()> {
        if self.namespace.is_empty() {
            return Err(StoreError::Validation(
                "config namespace must not be empty".to_string(),
            ));
        }
        if self.db_name.trim().is_empty() {
            return Err(StoreError::Validation(
                "config db_name must not be empty".to_string(),
            ));
        }
        Ok(())
    }

    /// Embedded database settings derived from this config.
    pub fn db_config(&self) -> DbConfig {
        let adapter = match &self.data_dir {
            Some(dir) => Adapter::File(dir.clone()),
            None => Adapter::Memory,
        };
        DbConfig::new(self.db_name.clone(), adapter)
    }
}

#[cfg(test)]
mod tests {
    use super::{StoreConfig, DEFAULT_DB_NAME};
    use crate::db::Adapter;
    use std::path::PathBuf;

    #[test]
    fn default_config_is_valid_and_in_memory() {
        let config = StoreConfig::default();
        config.validate().unwrap();
        assert_eq!(config.db_config().adapter, Adapter::Memory);
        assert_eq!(config.db_config().name, DEFAULT_DB_NAME);
    }

    #[test]
    fn data_dir_selects_file_adapter() {
        let config = StoreConfig::default().with_data_dir("/tmp/sheets");
        assert_eq!(
            config.db_config().adapter,
            Adapter::File(PathBuf::from("/tmp/sheets"))
        );
    }

    #[test]
    fn empty_namespace_fails_validation() {
        let config = StoreConfig::default().with_namespace("");
        assert!(config.validate().is_err());
    }
}
