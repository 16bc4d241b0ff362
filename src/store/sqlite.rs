use super::{merge_fields, DocumentStore, StoreError, StoreResult};
use async_trait::async_trait;
use serde_json::Value;
use sqlx::sqlite::{SqlitePool, SqlitePoolOptions};
use sqlx::Row;

/// SQLite-backed document store. Documents live in a single
/// `(collection, id, data)` table with the JSON body stored as text,
/// mirroring the collection/document shape of the production backend.
pub struct SqliteStore {
    pool: SqlitePool,
}

impl SqliteStore {
    pub async fn connect(database_url: &str) -> Result<Self, sqlx::Error> {
        let pool = SqlitePoolOptions::new()
            .max_connections(if database_url.contains(":memory:") {
                // A second connection to an in-memory database would see
                // an empty, unrelated database.
                1
            } else {
                10
            })
            .connect(database_url)
            .await?;

        sqlx::query("PRAGMA foreign_keys = ON")
            .execute(&pool)
            .await?;

        Ok(Self { pool })
    }

    pub async fn init_schema(&self) -> Result<(), sqlx::Error> {
        sqlx::query(
            "CREATE TABLE IF NOT EXISTS documents (
                collection TEXT NOT NULL,
                id TEXT NOT NULL,
                data TEXT NOT NULL,
                updated_at TEXT NOT NULL,
                PRIMARY KEY (collection, id)
            )",
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            "CREATE INDEX IF NOT EXISTS idx_documents_collection ON documents(collection)",
        )
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    fn now() -> String {
        time::OffsetDateTime::now_utc()
            .format(&time::format_description::well_known::Rfc3339)
            .unwrap()
    }
}

#[async_trait]
impl DocumentStore for SqliteStore {
    async fn get(&self, collection: &str, id: &str) -> StoreResult<Option<Value>> {
        let row = sqlx::query("SELECT data FROM documents WHERE collection = ? AND id = ?")
            .bind(collection)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        match row {
            Some(row) => {
                let data: String = row.try_get("data").map_err(StoreError::from)?;
                Ok(Some(serde_json::from_str(&data)?))
            }
            None => Ok(None),
        }
    }

    async fn list(&self, collection: &str) -> StoreResult<Vec<(String, Value)>> {
        let rows = sqlx::query("SELECT id, data FROM documents WHERE collection = ? ORDER BY id")
            .bind(collection)
            .fetch_all(&self.pool)
            .await?;

        let mut docs = Vec::with_capacity(rows.len());
        for row in rows {
            let id: String = row.try_get("id").map_err(StoreError::from)?;
            let data: String = row.try_get("data").map_err(StoreError::from)?;
            docs.push((id, serde_json::from_str(&data)?));
        }
        Ok(docs)
    }

    async fn put(&self, collection: &str, id: &str, doc: &Value) -> StoreResult<()> {
        sqlx::query(
            "INSERT INTO documents (collection, id, data, updated_at)
             VALUES (?, ?, ?, ?)
             ON CONFLICT (collection, id)
             DO UPDATE SET data = excluded.data, updated_at = excluded.updated_at",
        )
        .bind(collection)
        .bind(id)
        .bind(serde_json::to_string(doc)?)
        .bind(Self::now())
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn patch(&self, collection: &str, id: &str, fields: &Value) -> StoreResult<()> {
        let mut doc = self
            .get(collection, id)
            .await?
            .ok_or_else(|| StoreError::NotFound {
                collection: collection.to_string(),
                id: id.to_string(),
            })?;

        merge_fields(&mut doc, fields);
        self.put(collection, id, &doc).await
    }

    async fn delete(&self, collection: &str, id: &str) -> StoreResult<()> {
        sqlx::query("DELETE FROM documents WHERE collection = ? AND id = ?")
            .bind(collection)
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn put_batch(&self, writes: &[(String, String, Value)]) -> StoreResult<()> {
        let mut tx = self.pool.begin().await?;
        let now = Self::now();

        for (collection, id, doc) in writes {
            sqlx::query(
                "INSERT INTO documents (collection, id, data, updated_at)
                 VALUES (?, ?, ?, ?)
                 ON CONFLICT (collection, id)
                 DO UPDATE SET data = excluded.data, updated_at = excluded.updated_at",
            )
            .bind(collection)
            .bind(id)
            .bind(serde_json::to_string(doc)?)
            .bind(&now)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;
        Ok(())
    }
}
