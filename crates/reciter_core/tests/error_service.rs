use reciter_core::{
    CoreConfig, ErrorRecordService, ErrorUpdate, KeyValueStore, MemoryStore, NewErrorInput,
};
use serde_json::{json, Value};

const ERRORS_KEY: &str = "reciter_errorbook";

fn service(store: &MemoryStore) -> ErrorRecordService<&MemoryStore> {
    ErrorRecordService::new(store, &CoreConfig::default())
}

fn seeded(value: Value) -> MemoryStore {
    MemoryStore::with_entry(ERRORS_KEY, value.to_string())
}

fn raw_errors(store: &MemoryStore) -> Value {
    serde_json::from_str(&store.read(ERRORS_KEY).unwrap().unwrap()).unwrap()
}

fn update(id: &str, content: &str, note: &str) -> ErrorUpdate {
    ErrorUpdate {
        id: id.to_string(),
        content: content.to_string(),
        note: note.to_string(),
    }
}

#[tokio::test]
async fn legacy_records_are_listed_in_canonical_shape() {
    let store = seeded(json!([{"id": "x", "title": "T", "desc": "D", "date": "2020-01-01"}]));
    let service = service(&store);

    let records = service.list_errors().await;
    assert_eq!(records.len(), 1);
    let record = &records[0];
    assert_eq!(record.id, "x");
    assert_eq!(record.content, "T");
    assert_eq!(record.translation, "D");
    assert_eq!(record.word, "");
    assert_eq!(record.note, "");
    assert_eq!(record.create_time, "2020-01-01");
    assert_eq!(record.update_time, None);
    assert!(record.uses_legacy_naming);

    let serialized = serde_json::to_value(record).unwrap();
    assert_eq!(serialized["content"], json!("T"));
    assert_eq!(serialized["createTime"], json!("2020-01-01"));
    assert!(serialized.get("usesLegacyNaming").is_none());
}

#[tokio::test]
async fn update_keeps_legacy_field_names_on_disk() {
    let store = seeded(json!([{"id": "x", "title": "T", "desc": "D", "date": "2020-01-01"}]));
    let service = service(&store);

    assert!(service.update_error(update("x", "T2", "")).await);

    let raw = raw_errors(&store);
    let item = &raw[0];
    assert_eq!(item["title"], json!("T2"));
    assert!(item.get("content").is_none());
    assert_eq!(item["desc"], json!("D"));
    assert_eq!(item["date"], json!("2020-01-01"));
    assert_eq!(item["note"], json!(""));
    assert!(item["updateTime"].is_string());

    let reread = service.get_error_by_id("x").await.unwrap();
    assert_eq!(reread.content, "T2");
    assert!(reread.uses_legacy_naming);
    assert!(reread.update_time.is_some());
}

#[tokio::test]
async fn update_canonical_record_keeps_note_when_input_note_empty() {
    let store = seeded(json!([{
        "id": "c1",
        "content": "old",
        "translation": "tr",
        "word": "w",
        "note": "keep me",
        "createTime": "2021-02-03T04:05:06.000Z"
    }]));
    let service = service(&store);

    assert!(service.update_error(update("c1", "new", "")).await);
    let item = &raw_errors(&store)[0];
    assert_eq!(item["content"], json!("new"));
    assert_eq!(item["note"], json!("keep me"));
    assert_eq!(item["translation"], json!("tr"));

    assert!(service.update_error(update("c1", "newer", "fresh")).await);
    let record = service.get_error_by_id("c1").await.unwrap();
    assert_eq!(record.note, "fresh");
    assert_eq!(record.content, "newer");
}

#[tokio::test]
async fn update_fails_on_empty_corrupt_or_unknown_id() {
    let empty = MemoryStore::new();
    assert!(!service(&empty).update_error(update("x", "c", "")).await);

    let corrupt = MemoryStore::with_entry(ERRORS_KEY, "[{oops");
    assert!(!service(&corrupt).update_error(update("x", "c", "")).await);

    let object = seeded(json!({"id": "x"}));
    assert!(!service(&object).update_error(update("x", "c", "")).await);

    let store = seeded(json!([{"id": "a", "content": "c"}]));
    assert!(!service(&store).update_error(update("b", "c", "")).await);
}

#[tokio::test]
async fn add_error_prepends_canonical_record() {
    let store = seeded(json!([{"id": "old", "title": "legacy", "date": "2019-01-01"}]));
    let service = service(&store);

    let created = service
        .add_error(NewErrorInput {
            content: "I goed home".to_string(),
            note: "past tense".to_string(),
        })
        .await
        .unwrap();
    assert!(!created.id.is_empty());
    assert_eq!(created.translation, "");
    assert_eq!(created.word, "");
    assert!(created.create_time.ends_with('Z'));
    assert!(!created.uses_legacy_naming);

    let raw = raw_errors(&store);
    assert_eq!(raw.as_array().unwrap().len(), 2);
    assert_eq!(raw[0]["id"], json!(created.id));
    assert_eq!(raw[0]["content"], json!("I goed home"));
    assert!(raw[0].get("updateTime").is_none());
    assert_eq!(raw[1]["title"], json!("legacy"));

    let listed = service.list_errors().await;
    assert_eq!(listed[0].id, created.id);
}

#[tokio::test]
async fn add_error_replaces_unrecognized_blob() {
    let store = MemoryStore::with_entry(ERRORS_KEY, "not json at all");
    let service = service(&store);

    let created = service.add_error(NewErrorInput::default()).await.unwrap();
    let raw = raw_errors(&store);
    assert_eq!(raw.as_array().unwrap().len(), 1);
    assert_eq!(raw[0]["id"], json!(created.id));
}

#[tokio::test]
async fn added_ids_are_distinct() {
    let store = MemoryStore::new();
    let service = service(&store);

    let first = service.add_error(NewErrorInput::default()).await.unwrap();
    let second = service.add_error(NewErrorInput::default()).await.unwrap();
    assert_ne!(first.id, second.id);
    assert_eq!(service.list_errors_sync().len(), 2);
}

#[tokio::test]
async fn delete_nonexistent_id_leaves_store_untouched() {
    let stored = json!([{"id": "a", "content": "c"}]);
    let store = seeded(stored.clone());
    let service = service(&store);
    let before = store.read(ERRORS_KEY).unwrap();

    assert!(!service.delete_error("nonexistent").await);
    assert_eq!(store.read(ERRORS_KEY).unwrap(), before);

    assert!(service.delete_error("a").await);
    assert_eq!(raw_errors(&store), json!([]));
    assert!(!service.delete_error("a").await);
}

#[tokio::test]
async fn delete_on_empty_store_returns_false() {
    let store = MemoryStore::new();
    assert!(!service(&store).delete_error("a").await);
    assert_eq!(store.read(ERRORS_KEY).unwrap(), None);
}

#[tokio::test]
async fn search_matches_content_or_note_ignoring_case() {
    let store = seeded(json!([
        {"id": "1", "content": "She go to school", "note": "Third person"},
        {"id": "2", "title": "Many informations", "note": "uncountable"},
        {"id": "3", "content": "fine", "note": ""}
    ]));
    let service = service(&store);

    let hits = service.search_errors(Some("THIRD")).await;
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].id, "1");

    let legacy_hits = service.search_errors(Some("informations")).await;
    assert_eq!(legacy_hits.len(), 1);
    assert_eq!(legacy_hits[0].id, "2");

    assert_eq!(service.search_errors(None).await.len(), 3);
    assert!(service.search_errors(Some("zzz")).await.is_empty());
}

#[tokio::test]
async fn numeric_stored_ids_never_match_text_ids() {
    let stored = json!([{"id": 42, "content": "numeric"}, {"id": "7", "content": "text"}]);
    let store = seeded(stored.clone());
    let service = service(&store);

    assert!(service.get_error_by_id("42").await.is_none());
    assert!(!service.update_error(update("42", "changed", "")).await);
    assert!(!service.delete_error("42").await);
    assert_eq!(raw_errors(&store), stored);

    assert_eq!(service.list_errors().await[0].id, "42");
    assert!(service.delete_error("7").await);
    assert_eq!(raw_errors(&store), json!([{"id": 42, "content": "numeric"}]));
}

#[tokio::test]
async fn get_error_by_id_requires_exact_match() {
    let store = seeded(json!([{"id": "Abc", "content": "c"}]));
    let service = service(&store);

    assert!(service.get_error_by_id("Abc").await.is_some());
    assert!(service.get_error_by_id("abc").await.is_none());
}
