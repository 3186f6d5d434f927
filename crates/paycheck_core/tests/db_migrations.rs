use paycheck_core::db::migrations::{latest_version, table_exists};
use paycheck_core::db::{open_db, open_db_in_memory, Adapter, DbConfig, DbError};
use rusqlite::Connection;

#[test]
fn open_db_in_memory_applies_all_migrations() {
    let conn = open_db_in_memory().unwrap();

    assert_eq!(schema_version(&conn), latest_version());
    assert!(table_exists(&conn, "documents").unwrap());
    assert!(table_exists(&conn, "kv_items").unwrap());
}

#[test]
fn opening_same_database_twice_is_idempotent() {
    let dir = tempfile::tempdir().unwrap();
    let config = DbConfig::new("sheets", Adapter::File(dir.path().to_path_buf()));

    let first = open_db(&config).unwrap();
    assert_eq!(schema_version(&first), latest_version());
    drop(first);

    let second = open_db(&config).unwrap();
    assert_eq!(schema_version(&second), latest_version());
    assert!(table_exists(&second, "documents").unwrap());
}

#[test]
fn file_adapter_creates_missing_directory() {
    let dir = tempfile::tempdir().unwrap();
    let nested = dir.path().join("nested").join("data");
    let config = DbConfig::new("sheets", Adapter::File(nested.clone()));

    open_db(&config).unwrap();
    assert!(nested.join("sheets.sqlite3").exists());
}

#[test]
fn opening_database_with_newer_schema_version_returns_error() {
    let dir = tempfile::tempdir().unwrap();
    let config = DbConfig::new("future", Adapter::File(dir.path().to_path_buf()));

    let conn = Connection::open(config.file_path().unwrap()).unwrap();
    conn.execute_batch("PRAGMA user_version = 999;").unwrap();
    drop(conn);

    match open_db(&config).unwrap_err() {
        DbError::UnsupportedSchemaVersion {
            db_version,
            latest_supported,
        } => {
            assert_eq!(db_version, 999);
            assert_eq!(latest_supported, latest_version());
        }
        other => panic!("unexpected error: {other}"),
    }
}

fn schema_version(conn: &Connection) -> u32 {
    conn.query_row("PRAGMA user_version;", [], |row| row.get(0))
        .unwrap()
}
