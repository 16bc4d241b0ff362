use serde::{Deserialize, Serialize};

/// Per-user signal document the mobile client listens on. The dashboard
/// flips `needsRefresh` after writes the mobile side cannot observe
/// directly; the client re-fetches its overtime list and resets the flag.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SyncDoc {
    pub user_id: String,
    pub overtime_last_updated: String,
    pub needs_refresh: bool,
    /// Free-text cause tag for the last trigger, e.g. "overtime_approved".
    pub last_sync_trigger: String,
    pub updated_at: String,
}

impl SyncDoc {
    pub fn new(user_id: String) -> Self {
        let now = crate::models::now_rfc3339();
        Self {
            user_id,
            overtime_last_updated: now.clone(),
            needs_refresh: false,
            last_sync_trigger: "setup".to_string(),
            updated_at: now,
        }
    }
}

// DTOs for API

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SyncAction {
    Setup,
    Refresh,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SyncCommand {
    pub user_id: String,
    pub action: SyncAction,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SyncQuery {
    pub user_id: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SyncInfo {
    pub user_id: String,
    pub action: String,
    pub timestamp: String,
}
