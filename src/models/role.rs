use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Action that a role may be granted on a permission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Action {
    Read,
    Edit,
    Delete,
    Create,
}

impl Action {
    pub const ALL: [Action; 4] = [Action::Read, Action::Edit, Action::Delete, Action::Create];
}

/// One entry of a role's permission list: which actions the role is
/// allowed to take on the referenced permission document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PermissionGrant {
    pub id: String,
    pub actions: Vec<Action>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Role {
    pub id: String,
    pub name: String,
    /// Invariant: entries with an empty actions set are filtered out
    /// before the role is persisted.
    pub permissions: Vec<PermissionGrant>,
    pub created_at: String,
    pub updated_at: String,
}

impl Role {
    pub fn new(name: String, permissions: Vec<PermissionGrant>) -> Self {
        let now = crate::models::now_rfc3339();
        Self {
            id: Uuid::new_v4().to_string(),
            name,
            permissions,
            created_at: now.clone(),
            updated_at: now,
        }
    }
}

/// Denormalized back-reference kept on permission documents: which roles
/// currently grant this permission. Maintained by the role write path,
/// eventually consistent with the roles collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoleRef {
    pub role_id: String,
    pub role_name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Permission {
    pub id: String,
    pub name: String,
    /// Canonical list of actions this permission supports.
    pub actions: Vec<Action>,
    #[serde(default)]
    pub assigned_to: Vec<RoleRef>,
    pub created_at: String,
    pub updated_at: String,
}

impl Permission {
    pub fn new(id: String, name: String, actions: Vec<Action>) -> Self {
        let now = crate::models::now_rfc3339();
        Self {
            id,
            name,
            actions,
            assigned_to: Vec::new(),
            created_at: now.clone(),
            updated_at: now,
        }
    }
}

// DTOs for API

#[derive(Debug, Deserialize)]
pub struct CreateRoleRequest {
    pub name: String,
    pub permissions: Vec<PermissionGrant>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateRoleRequest {
    pub name: Option<String>,
    pub permissions: Option<Vec<PermissionGrant>>,
}

#[derive(Debug, Deserialize)]
pub struct CreatePermissionRequest {
    pub id: Option<String>,
    pub name: String,
    pub actions: Vec<Action>,
}

#[derive(Debug, Deserialize)]
pub struct UpdatePermissionRequest {
    pub name: Option<String>,
    pub actions: Option<Vec<Action>>,
}
