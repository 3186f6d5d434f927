use paycheck_core::db::migrations::latest_version;
use paycheck_core::db::{open_db, open_db_in_memory, Adapter, DbConfig};
use paycheck_core::store::revision::parse_generation;
use paycheck_core::{DocStore, EmbeddedStore, PaycheckDoc, StoreConfig, StoreError};
use rusqlite::Connection;

#[test]
fn documents_persist_across_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let config = StoreConfig::default().with_data_dir(dir.path()).db_config();

    {
        let conn = open_db(&config).unwrap();
        let store = EmbeddedStore::<PaycheckDoc>::try_new(&conn).unwrap();
        store
            .put(&PaycheckDoc::new("2024-01-01", "2024-01-01", 5000.0))
            .unwrap();
    }

    assert!(dir.path().join("paycheck_sheets.sqlite3").exists());
    let conn = open_db(&config).unwrap();
    let store = EmbeddedStore::<PaycheckDoc>::try_new(&conn).unwrap();
    assert_eq!(store.list("").unwrap(), vec!["2024-01-01"]);
    assert_eq!(store.get("2024-01-01").unwrap().income, 5000.0);
}

#[test]
fn rev_column_matches_embedded_rev() {
    let conn = open_db_in_memory().unwrap();
    let store = EmbeddedStore::<PaycheckDoc>::try_new(&conn).unwrap();
    store.put(&PaycheckDoc::new("a", "2024-01-01", 1.0)).unwrap();
    let second = store.put(&PaycheckDoc::new("a", "2024-01-01", 2.0)).unwrap();

    let rev: String = conn
        .query_row("SELECT rev FROM documents WHERE id = 'a';", [], |row| {
            row.get(0)
        })
        .unwrap();
    assert_eq!(rev, second.rev);
    assert_eq!(parse_generation(&rev), Some(2));
}

#[test]
fn caller_supplied_rev_is_replaced() {
    let conn = open_db_in_memory().unwrap();
    let store = EmbeddedStore::<PaycheckDoc>::try_new(&conn).unwrap();
    let mut doc = PaycheckDoc::new("a", "2024-01-01", 1.0);
    doc.rev = Some("made-up".to_string());

    let response = store.put(&doc).unwrap();
    assert_ne!(response.rev, "made-up");
    assert_eq!(store.get("a").unwrap().rev, Some(response.rev));
}

#[test]
fn list_prefix_is_literal_not_a_pattern() {
    let conn = open_db_in_memory().unwrap();
    let store = EmbeddedStore::<PaycheckDoc>::try_new(&conn).unwrap();
    for id in ["100%", "10_0", "1000"] {
        store.put(&PaycheckDoc::new(id, "2024-01-01", 1.0)).unwrap();
    }

    assert_eq!(store.list("10_").unwrap(), vec!["10_0"]);
    assert_eq!(store.list("100%").unwrap(), vec!["100%"]);
}

#[test]
fn corrupt_body_surfaces_as_serialization_error() {
    let conn = open_db_in_memory().unwrap();
    conn.execute(
        "INSERT INTO documents (id, rev, body) VALUES ('bad', '1-x', 'nope');",
        [],
    )
    .unwrap();
    let store = EmbeddedStore::<PaycheckDoc>::try_new(&conn).unwrap();

    let err = store.get("bad").unwrap_err();
    assert!(matches!(err, StoreError::Serialization(_)));
}

#[test]
fn store_rejects_unmigrated_connection() {
    let conn = Connection::open_in_memory().unwrap();

    match EmbeddedStore::<PaycheckDoc>::try_new(&conn) {
        Err(StoreError::UninitializedConnection {
            expected_version,
            actual_version: 0,
        }) => assert_eq!(expected_version, latest_version()),
        Err(other) => panic!("unexpected error: {other}"),
        Ok(_) => panic!("expected uninitialized connection error"),
    }
}

#[test]
fn store_rejects_connection_without_documents_table() {
    let conn = Connection::open_in_memory().unwrap();
    conn.execute_batch(&format!("PRAGMA user_version = {};", latest_version()))
        .unwrap();

    let result = EmbeddedStore::<PaycheckDoc>::try_new(&conn);
    assert!(matches!(
        result,
        Err(StoreError::MissingRequiredTable("documents"))
    ));
}

#[test]
fn memory_adapter_does_not_touch_disk() {
    let config = DbConfig::new("paycheck_sheets", Adapter::Memory);
    let conn = open_db(&config).unwrap();
    let store = EmbeddedStore::<PaycheckDoc>::try_new(&conn).unwrap();
    assert!(store.list("").unwrap().is_empty());
}
