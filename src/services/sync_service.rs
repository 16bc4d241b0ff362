use crate::api::middleware::ApiResult;
use crate::models::{Notification, SyncDoc};
use crate::store::{get_doc, list_docs, put_doc, DocumentStore, StoreResult};
use async_trait::async_trait;
use serde_json::json;
use std::sync::Arc;

pub const USER_SYNC: &str = "userSync";

pub fn notifications_collection(user_id: &str) -> String {
    format!("users/{}/notifications", user_id)
}

/// Best-effort outbox toward the disconnected mobile client. Callers go
/// through `notify_best_effort` / `refresh_best_effort`, which log
/// failures and never let them reach the primary operation's control
/// flow.
#[async_trait]
pub trait SyncBridge: Send + Sync {
    /// Append a notification document to the user's sub-collection.
    async fn notify(&self, user_id: &str, notification: Notification) -> StoreResult<()>;

    /// Flip the user's sync document to `needsRefresh = true` with a
    /// fresh timestamp; the mobile client listening on it re-fetches.
    async fn trigger_refresh(&self, user_id: &str, cause: &str) -> StoreResult<()>;
}

pub struct DocumentSyncBridge {
    store: Arc<dyn DocumentStore>,
}

impl DocumentSyncBridge {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl SyncBridge for DocumentSyncBridge {
    async fn notify(&self, user_id: &str, notification: Notification) -> StoreResult<()> {
        put_doc(
            self.store.as_ref(),
            &notifications_collection(user_id),
            &notification.id,
            &notification,
        )
        .await
    }

    async fn trigger_refresh(&self, user_id: &str, cause: &str) -> StoreResult<()> {
        let now = crate::models::now_rfc3339();
        let mut doc = get_doc::<SyncDoc>(self.store.as_ref(), USER_SYNC, user_id)
            .await?
            .unwrap_or_else(|| SyncDoc::new(user_id.to_string()));

        doc.needs_refresh = true;
        doc.overtime_last_updated = now.clone();
        doc.last_sync_trigger = cause.to_string();
        doc.updated_at = now;

        put_doc(self.store.as_ref(), USER_SYNC, user_id, &doc).await
    }
}

pub async fn notify_best_effort(bridge: &dyn SyncBridge, user_id: &str, notification: Notification) {
    if let Err(err) = bridge.notify(user_id, notification).await {
        tracing::warn!(user_id, error = %err, "notification dispatch failed, continuing");
    }
}

pub async fn refresh_best_effort(bridge: &dyn SyncBridge, user_id: &str, cause: &str) {
    if let Err(err) = bridge.trigger_refresh(user_id, cause).await {
        tracing::warn!(user_id, cause, error = %err, "sync trigger failed, continuing");
    }
}

/// Idempotent creation of the per-user sync document; an existing
/// document is left untouched.
pub async fn setup_sync(store: &dyn DocumentStore, user_id: &str) -> ApiResult<SyncDoc> {
    if let Some(existing) = get_doc::<SyncDoc>(store, USER_SYNC, user_id).await? {
        return Ok(existing);
    }

    let doc = SyncDoc::new(user_id.to_string());
    put_doc(store, USER_SYNC, user_id, &doc).await?;
    Ok(doc)
}

/// Reset `needsRefresh` after the mobile client has re-fetched. Creates
/// the document if it does not exist yet.
pub async fn reset_refresh(store: &dyn DocumentStore, user_id: &str) -> ApiResult<()> {
    if get_doc::<SyncDoc>(store, USER_SYNC, user_id).await?.is_none() {
        let doc = SyncDoc::new(user_id.to_string());
        put_doc(store, USER_SYNC, user_id, &doc).await?;
        return Ok(());
    }

    store
        .patch(
            USER_SYNC,
            user_id,
            &json!({
                "needsRefresh": false,
                "updatedAt": crate::models::now_rfc3339(),
            }),
        )
        .await?;
    Ok(())
}

pub async fn list_notifications(
    store: &dyn DocumentStore,
    user_id: &str,
) -> ApiResult<Vec<Notification>> {
    let mut notifications: Vec<Notification> =
        list_docs(store, &notifications_collection(user_id)).await?;
    // Newest first, the order the mobile client subscribes in.
    notifications.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
    Ok(notifications)
}
