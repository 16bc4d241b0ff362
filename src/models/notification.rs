use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Append-only notification document in a per-user sub-collection. The
/// mobile client subscribes ordered by timestamp descending and sets the
/// `read` flag itself; no ack protocol beyond that.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub title: String,
    pub body: String,
    #[serde(default)]
    pub data: serde_json::Value,
    pub timestamp: String,
    #[serde(default)]
    pub read: bool,
}

impl Notification {
    pub fn new(kind: &str, title: String, body: String, data: serde_json::Value) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            kind: kind.to_string(),
            title,
            body,
            data,
            timestamp: crate::models::now_rfc3339(),
            read: false,
        }
    }
}
