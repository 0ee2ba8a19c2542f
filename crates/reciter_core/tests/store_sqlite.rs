use reciter_core::store::SCHEMA_VERSION;
use reciter_core::{
    open_store, open_store_in_memory, CoreConfig, ErrorRecordService, InProcessBus,
    KeyValueStore, NewErrorInput, SqliteStore, StoreError, WordDraft, WordLookupCache,
    WordService,
};
use rusqlite::Connection;
use std::sync::Arc;

#[test]
fn open_store_in_memory_creates_schema() {
    let conn = open_store_in_memory().unwrap();

    assert_eq!(schema_version(&conn), SCHEMA_VERSION);
    assert_table_exists(&conn, "kv_entries");
}

#[test]
fn sqlite_store_reads_and_overwrites_values() {
    let conn = open_store_in_memory().unwrap();
    let store = SqliteStore::try_new(&conn).unwrap();

    assert_eq!(store.read("reciter_words").unwrap(), None);
    store.write("reciter_words", "[]").unwrap();
    store.write("reciter_words", "[{\"id\":1}]").unwrap();
    assert_eq!(
        store.read("reciter_words").unwrap().as_deref(),
        Some("[{\"id\":1}]")
    );
}

#[test]
fn store_rejects_uninitialized_connection() {
    let conn = Connection::open_in_memory().unwrap();

    match SqliteStore::try_new(&conn) {
        Err(StoreError::UninitializedConnection {
            expected_version,
            actual_version: 0,
        }) => assert_eq!(expected_version, SCHEMA_VERSION),
        Err(other) => panic!("unexpected error: {other}"),
        Ok(_) => panic!("expected uninitialized connection error"),
    }
}

#[test]
fn opening_database_with_newer_schema_version_returns_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("future.db");

    let conn = Connection::open(&path).unwrap();
    conn.execute_batch("PRAGMA user_version = 999;").unwrap();
    drop(conn);

    match open_store(&path).unwrap_err() {
        StoreError::UnsupportedSchemaVersion {
            db_version,
            latest_supported,
        } => {
            assert_eq!(db_version, 999);
            assert_eq!(latest_supported, SCHEMA_VERSION);
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[tokio::test]
async fn words_and_errors_survive_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("reciter.db");
    let config = CoreConfig::default();

    {
        let conn = open_store(&path).unwrap();
        let store = SqliteStore::try_new(&conn).unwrap();
        let words = WordService::new(
            &store,
            &config,
            Arc::new(InProcessBus::new()),
            Arc::new(WordLookupCache::new()),
        );
        words.add_word(WordDraft::new("persist", "last")).await;
        words.add_word(WordDraft::new("again", "repeat")).await;

        let errors = ErrorRecordService::new(&store, &config);
        errors
            .add_error(NewErrorInput {
                content: "I has".to_string(),
                note: String::new(),
            })
            .await
            .unwrap();
    }

    let conn = open_store(&path).unwrap();
    assert_eq!(schema_version(&conn), SCHEMA_VERSION);
    let store = SqliteStore::try_new(&conn).unwrap();
    let words = WordService::new(
        &store,
        &config,
        Arc::new(InProcessBus::new()),
        Arc::new(WordLookupCache::new()),
    );
    let listed = words.list_words_sync();
    assert_eq!(listed.len(), 2);
    assert_eq!(listed[1].id, 2);
    assert_eq!(listed[1].name, "again");

    let errors = ErrorRecordService::new(&store, &config);
    assert_eq!(errors.list_errors().await[0].content, "I has");
}

fn schema_version(conn: &Connection) -> u32 {
    conn.query_row("PRAGMA user_version;", [], |row| row.get(0))
        .unwrap()
}

fn assert_table_exists(conn: &Connection, table_name: &str) {
    let exists: i64 = conn
        .query_row(
            "SELECT EXISTS(
                SELECT 1
                FROM sqlite_master
                WHERE type = 'table' AND name = ?1
            );",
            [table_name],
            |row| row.get(0),
        )
        .unwrap();
    assert_eq!(exists, 1, "table {table_name} does not exist");
}
