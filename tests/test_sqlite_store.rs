use presensi::store::{DocumentStore, SqliteStore, StoreError};
use serde_json::json;

async fn memory_store() -> SqliteStore {
    let store = SqliteStore::connect("sqlite::memory:").await.unwrap();
    store.init_schema().await.unwrap();
    store
}

#[tokio::test]
async fn test_put_get_roundtrip() {
    let store = memory_store().await;
    let doc = json!({"name": "Budi", "areas": ["a1"]});

    store.put("users", "u1", &doc).await.unwrap();
    let fetched = store.get("users", "u1").await.unwrap().unwrap();
    assert_eq!(fetched, doc);
}

#[tokio::test]
async fn test_put_overwrites_existing() {
    let store = memory_store().await;
    store.put("users", "u1", &json!({"name": "Budi"})).await.unwrap();
    store.put("users", "u1", &json!({"name": "Siti"})).await.unwrap();

    let fetched = store.get("users", "u1").await.unwrap().unwrap();
    assert_eq!(fetched["name"], "Siti");
}

#[tokio::test]
async fn test_patch_merges_shallowly() {
    let store = memory_store().await;
    store
        .put("users", "u1", &json!({"name": "Budi", "role": "r1"}))
        .await
        .unwrap();

    store
        .patch("users", "u1", &json!({"role": "r2", "avatar": "x.png"}))
        .await
        .unwrap();

    let fetched = store.get("users", "u1").await.unwrap().unwrap();
    assert_eq!(fetched["name"], "Budi");
    assert_eq!(fetched["role"], "r2");
    assert_eq!(fetched["avatar"], "x.png");
}

#[tokio::test]
async fn test_patch_missing_document_fails() {
    let store = memory_store().await;
    let err = store
        .patch("users", "ghost", &json!({"name": "x"}))
        .await
        .unwrap_err();
    assert!(matches!(err, StoreError::NotFound { .. }));
}

#[tokio::test]
async fn test_delete_is_idempotent() {
    let store = memory_store().await;
    store.put("users", "u1", &json!({"name": "Budi"})).await.unwrap();

    store.delete("users", "u1").await.unwrap();
    assert!(store.get("users", "u1").await.unwrap().is_none());
    // Deleting again still succeeds.
    store.delete("users", "u1").await.unwrap();
}

#[tokio::test]
async fn test_list_returns_collection_ordered_by_id() {
    let store = memory_store().await;
    store.put("users", "u2", &json!({"name": "Siti"})).await.unwrap();
    store.put("users", "u1", &json!({"name": "Budi"})).await.unwrap();
    store.put("roles", "r1", &json!({"name": "Admin"})).await.unwrap();

    let rows = store.list("users").await.unwrap();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].0, "u1");
    assert_eq!(rows[1].0, "u2");
}

#[tokio::test]
async fn test_batch_writes_all_documents() {
    let store = memory_store().await;
    let writes = vec![
        ("users".to_string(), "u1".to_string(), json!({"name": "Budi"})),
        ("users".to_string(), "u2".to_string(), json!({"name": "Siti"})),
        ("roles".to_string(), "r1".to_string(), json!({"name": "Admin"})),
    ];

    store.put_batch(&writes).await.unwrap();
    assert_eq!(store.list("users").await.unwrap().len(), 2);
    assert!(store.get("roles", "r1").await.unwrap().is_some());
}

#[tokio::test]
async fn test_collections_do_not_collide() {
    let store = memory_store().await;
    store
        .put("attendance/u1/day", "2025-03-10", &json!({"status": "present"}))
        .await
        .unwrap();
    store
        .put("attendance/u2/day", "2025-03-10", &json!({"status": "overtime"}))
        .await
        .unwrap();

    let u1 = store.list("attendance/u1/day").await.unwrap();
    assert_eq!(u1.len(), 1);
    assert_eq!(u1[0].1["status"], "present");
}
