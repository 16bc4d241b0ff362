pub mod memory;
pub mod sqlite;

pub use memory::MemoryStore;
pub use sqlite::SqliteStore;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("document not found: {collection}/{id}")]
    NotFound { collection: String, id: String },

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("store backend error: {0}")]
    Backend(String),
}

impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        StoreError::Backend(err.to_string())
    }
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Collection/id keyed document store. Documents are JSON objects and may
/// hold references to other documents (plain id strings); resolving those
/// is the caller's concern, not the store's.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    async fn get(&self, collection: &str, id: &str) -> StoreResult<Option<Value>>;

    /// All documents in a collection as (id, document) pairs, ordered by id.
    async fn list(&self, collection: &str) -> StoreResult<Vec<(String, Value)>>;

    /// Insert or overwrite a full document.
    async fn put(&self, collection: &str, id: &str, doc: &Value) -> StoreResult<()>;

    /// Shallow-merge `fields` into an existing document. Fails with
    /// `NotFound` when the document does not exist; an explicit `null`
    /// value sets the field to null rather than removing it.
    async fn patch(&self, collection: &str, id: &str, fields: &Value) -> StoreResult<()>;

    /// Idempotent delete: removing an absent document succeeds.
    async fn delete(&self, collection: &str, id: &str) -> StoreResult<()>;

    /// Write several documents in one call. The sqlite backend applies the
    /// batch in a single transaction; the memory backend under one lock.
    async fn put_batch(&self, writes: &[(String, String, Value)]) -> StoreResult<()>;
}

/// Shallow merge of a JSON object into another, Firestore set-with-merge style.
pub(crate) fn merge_fields(target: &mut Value, fields: &Value) {
    if let (Some(target_map), Some(patch_map)) = (target.as_object_mut(), fields.as_object()) {
        for (key, value) in patch_map {
            target_map.insert(key.clone(), value.clone());
        }
    }
}

pub async fn get_doc<T: DeserializeOwned>(
    store: &dyn DocumentStore,
    collection: &str,
    id: &str,
) -> StoreResult<Option<T>> {
    match store.get(collection, id).await? {
        Some(value) => Ok(Some(serde_json::from_value(value)?)),
        None => Ok(None),
    }
}

pub async fn put_doc<T: Serialize>(
    store: &dyn DocumentStore,
    collection: &str,
    id: &str,
    doc: &T,
) -> StoreResult<()> {
    store.put(collection, id, &serde_json::to_value(doc)?).await
}

pub async fn list_docs<T: DeserializeOwned>(
    store: &dyn DocumentStore,
    collection: &str,
) -> StoreResult<Vec<T>> {
    let rows = store.list(collection).await?;
    let mut docs = Vec::with_capacity(rows.len());
    for (_, value) in rows {
        docs.push(serde_json::from_value(value)?);
    }
    Ok(docs)
}
