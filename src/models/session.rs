use crate::models::{Action, UserView};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use uuid::Uuid;

/// Role claims resolved once at sign-in and embedded in the session
/// document. Access checks read this snapshot; it is not re-resolved per
/// request, so role edits take effect on the next login.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoleSnapshot {
    pub name: String,
    /// permission id -> allowed actions.
    pub permissions: HashMap<String, Vec<Action>>,
}

impl RoleSnapshot {
    pub fn empty(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            permissions: HashMap::new(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    pub id: String,
    pub token: String,
    pub user_id: String,
    pub user_name: String,
    pub email: String,
    pub role: RoleSnapshot,
    /// Area scope used to filter area-scoped list endpoints.
    #[serde(default)]
    pub area_ids: Vec<String>,
    pub created_at: String,
    pub expires_at: String,
}

impl Session {
    pub fn new(
        token: String,
        user_id: String,
        user_name: String,
        email: String,
        role: RoleSnapshot,
        area_ids: Vec<String>,
        duration_hours: i64,
    ) -> Self {
        let now = time::OffsetDateTime::now_utc();
        let expires_at = now + time::Duration::hours(duration_hours);

        Self {
            id: Uuid::new_v4().to_string(),
            token,
            user_id,
            user_name,
            email,
            role,
            area_ids,
            created_at: now
                .format(&time::format_description::well_known::Rfc3339)
                .unwrap(),
            expires_at: expires_at
                .format(&time::format_description::well_known::Rfc3339)
                .unwrap(),
        }
    }

    pub fn is_expired(&self) -> bool {
        match time::OffsetDateTime::parse(
            &self.expires_at,
            &time::format_description::well_known::Rfc3339,
        ) {
            Ok(expires_at) => expires_at <= time::OffsetDateTime::now_utc(),
            // Unparseable expiry is treated as expired.
            Err(_) => true,
        }
    }
}

// DTOs for API

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub token: String,
    pub expires_at: String,
    pub user: UserView,
    pub role: RoleSnapshot,
    pub area_ids: Vec<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionResponse {
    pub user_id: String,
    pub user_name: String,
    pub email: String,
    pub role: RoleSnapshot,
    pub area_ids: Vec<String>,
    pub expires_at: String,
}
