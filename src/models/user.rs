use crate::models::RefSummary;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// User document as stored: role, areas and shifts are references
/// (document ids), resolved into summaries on read.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
    /// Reference to a role document; may dangle if the role was deleted.
    pub role: String,
    #[serde(default)]
    pub areas: Vec<String>,
    #[serde(default)]
    pub shifts: Vec<String>,
    #[serde(default)]
    pub avatar: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

impl User {
    pub fn new(name: String, email: String, role: String) -> Self {
        let now = crate::models::now_rfc3339();
        Self {
            id: Uuid::new_v4().to_string(),
            name,
            email: email.to_lowercase(),
            role,
            areas: Vec::new(),
            shifts: Vec::new(),
            avatar: None,
            created_at: now.clone(),
            updated_at: now,
        }
    }
}

/// User with all references resolved, as returned to the dashboard.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserView {
    pub id: String,
    pub name: String,
    pub email: String,
    pub role: RefSummary,
    pub areas: Vec<RefSummary>,
    pub shifts: Vec<RefSummary>,
    pub avatar: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

// DTOs for API

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateUserRequest {
    pub name: String,
    pub email: String,
    pub password: String,
    pub role: String,
    #[serde(default)]
    pub areas: Vec<String>,
    #[serde(default)]
    pub shifts: Vec<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUserRequest {
    pub name: Option<String>,
    pub role: Option<String>,
    pub areas: Option<Vec<String>>,
    pub shifts: Option<Vec<String>>,
    pub avatar: Option<String>,
}
