pub mod middleware;

pub mod areas;
pub mod attendance;
pub mod auth;
pub mod locations;
pub mod mobile_sync;
pub mod overtime;
pub mod permissions;
pub mod requests;
pub mod roles;
pub mod router;
pub mod shifts;
pub mod users;

pub use middleware::*;
pub use router::build_router;

use serde::Serialize;

/// Uniform response envelope: `{success, message, data?}`.
#[derive(Debug, Serialize)]
pub struct Envelope<T: Serialize> {
    pub success: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

pub fn ok<T: Serialize>(message: impl Into<String>, data: T) -> axum::Json<Envelope<T>> {
    axum::Json(Envelope {
        success: true,
        message: message.into(),
        data: Some(data),
    })
}

pub fn ok_empty(message: impl Into<String>) -> axum::Json<Envelope<serde_json::Value>> {
    axum::Json(Envelope {
        success: true,
        message: message.into(),
        data: None,
    })
}
