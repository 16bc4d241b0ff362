use super::{merge_fields, DocumentStore, StoreError, StoreResult};
use async_trait::async_trait;
use serde_json::Value;
use std::collections::{BTreeMap, HashMap};
use tokio::sync::RwLock;

/// In-memory document store, used by the test suites and as a local
/// stand-in for the real backend. Collections are created lazily on
/// first write.
#[derive(Default)]
pub struct MemoryStore {
    collections: RwLock<HashMap<String, BTreeMap<String, Value>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn get(&self, collection: &str, id: &str) -> StoreResult<Option<Value>> {
        let collections = self.collections.read().await;
        Ok(collections
            .get(collection)
            .and_then(|docs| docs.get(id))
            .cloned())
    }

    async fn list(&self, collection: &str) -> StoreResult<Vec<(String, Value)>> {
        let collections = self.collections.read().await;
        Ok(collections
            .get(collection)
            .map(|docs| {
                docs.iter()
                    .map(|(id, doc)| (id.clone(), doc.clone()))
                    .collect()
            })
            .unwrap_or_default())
    }

    async fn put(&self, collection: &str, id: &str, doc: &Value) -> StoreResult<()> {
        let mut collections = self.collections.write().await;
        collections
            .entry(collection.to_string())
            .or_default()
            .insert(id.to_string(), doc.clone());
        Ok(())
    }

    async fn patch(&self, collection: &str, id: &str, fields: &Value) -> StoreResult<()> {
        let mut collections = self.collections.write().await;
        let doc = collections
            .get_mut(collection)
            .and_then(|docs| docs.get_mut(id))
            .ok_or_else(|| StoreError::NotFound {
                collection: collection.to_string(),
                id: id.to_string(),
            })?;
        merge_fields(doc, fields);
        Ok(())
    }

    async fn delete(&self, collection: &str, id: &str) -> StoreResult<()> {
        let mut collections = self.collections.write().await;
        if let Some(docs) = collections.get_mut(collection) {
            docs.remove(id);
        }
        Ok(())
    }

    async fn put_batch(&self, writes: &[(String, String, Value)]) -> StoreResult<()> {
        let mut collections = self.collections.write().await;
        for (collection, id, doc) in writes {
            collections
                .entry(collection.clone())
                .or_default()
                .insert(id.clone(), doc.clone());
        }
        Ok(())
    }
}
