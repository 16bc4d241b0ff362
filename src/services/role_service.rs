use crate::api::middleware::{ApiError, ApiResult};
use crate::models::{
    CreatePermissionRequest, CreateRoleRequest, Permission, PermissionGrant, Role, RoleRef,
    UpdatePermissionRequest, UpdateRoleRequest,
};
use crate::store::{get_doc, list_docs, put_doc, DocumentStore};
use serde_json::json;

pub const ROLES: &str = "roles";
pub const PERMISSIONS: &str = "permissions";

/// Drop permission entries whose actions set is empty; only meaningful
/// grants are persisted.
fn filter_grants(grants: Vec<PermissionGrant>) -> Vec<PermissionGrant> {
    grants.into_iter().filter(|g| !g.actions.is_empty()).collect()
}

pub async fn list_roles(store: &dyn DocumentStore) -> ApiResult<Vec<Role>> {
    Ok(list_docs(store, ROLES).await?)
}

pub async fn get_role(store: &dyn DocumentStore, id: &str) -> ApiResult<Role> {
    get_doc(store, ROLES, id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("role {} not found", id)))
}

/// Persist the role, then fan the `{roleId, roleName}` back-reference
/// out to each referenced permission document. The fan-out is a second,
/// non-transactional step: failures are logged and the role write
/// stands, accepting eventual consistency on `assignedTo`.
pub async fn create_role(store: &dyn DocumentStore, request: CreateRoleRequest) -> ApiResult<Role> {
    if request.name.trim().is_empty() {
        return Err(ApiError::BadRequest("name is required".to_string()));
    }

    let role = Role::new(request.name, filter_grants(request.permissions));
    put_doc(store, ROLES, &role.id, &role).await?;

    sync_permission_back_references(store, &role).await;
    Ok(role)
}

pub async fn update_role(
    store: &dyn DocumentStore,
    id: &str,
    request: UpdateRoleRequest,
) -> ApiResult<Role> {
    let mut role = get_role(store, id).await?;

    if let Some(name) = request.name {
        role.name = name;
    }
    if let Some(permissions) = request.permissions {
        role.permissions = filter_grants(permissions);
    }
    role.updated_at = crate::models::now_rfc3339();

    put_doc(store, ROLES, &role.id, &role).await?;
    sync_permission_back_references(store, &role).await;
    Ok(role)
}

pub async fn delete_role(store: &dyn DocumentStore, id: &str) -> ApiResult<()> {
    store.delete(ROLES, id).await?;
    Ok(())
}

/// Append this role to the `assignedTo` list of every permission it
/// grants (deduplicated by role id, name refreshed in place). Best
/// effort per permission.
async fn sync_permission_back_references(store: &dyn DocumentStore, role: &Role) {
    for grant in &role.permissions {
        if let Err(err) = append_role_ref(store, &grant.id, role).await {
            tracing::warn!(
                permission_id = %grant.id,
                role_id = %role.id,
                error = %err,
                "permission back-reference update failed"
            );
        }
    }
}

async fn append_role_ref(
    store: &dyn DocumentStore,
    permission_id: &str,
    role: &Role,
) -> ApiResult<()> {
    let mut permission: Permission = match get_doc(store, PERMISSIONS, permission_id).await? {
        Some(p) => p,
        // Wildcard and not-yet-seeded permission ids have no document to
        // annotate.
        None => return Ok(()),
    };

    match permission
        .assigned_to
        .iter_mut()
        .find(|r| r.role_id == role.id)
    {
        Some(existing) => existing.role_name = role.name.clone(),
        None => permission.assigned_to.push(RoleRef {
            role_id: role.id.clone(),
            role_name: role.name.clone(),
        }),
    }

    store
        .patch(
            PERMISSIONS,
            permission_id,
            &json!({
                "assignedTo": permission.assigned_to,
                "updatedAt": crate::models::now_rfc3339(),
            }),
        )
        .await?;
    Ok(())
}

// Permission CRUD

pub async fn list_permissions(store: &dyn DocumentStore) -> ApiResult<Vec<Permission>> {
    Ok(list_docs(store, PERMISSIONS).await?)
}

pub async fn get_permission(store: &dyn DocumentStore, id: &str) -> ApiResult<Permission> {
    get_doc(store, PERMISSIONS, id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("permission {} not found", id)))
}

pub async fn create_permission(
    store: &dyn DocumentStore,
    request: CreatePermissionRequest,
) -> ApiResult<Permission> {
    if request.name.trim().is_empty() {
        return Err(ApiError::BadRequest("name is required".to_string()));
    }

    let id = request
        .id
        .unwrap_or_else(|| uuid::Uuid::new_v4().to_string());
    if get_doc::<Permission>(store, PERMISSIONS, &id).await?.is_some() {
        return Err(ApiError::Conflict(format!("permission {} already exists", id)));
    }

    let permission = Permission::new(id, request.name, request.actions);
    put_doc(store, PERMISSIONS, &permission.id, &permission).await?;
    Ok(permission)
}

pub async fn update_permission(
    store: &dyn DocumentStore,
    id: &str,
    request: UpdatePermissionRequest,
) -> ApiResult<Permission> {
    let mut permission = get_permission(store, id).await?;

    if let Some(name) = request.name {
        permission.name = name;
    }
    if let Some(actions) = request.actions {
        permission.actions = actions;
    }
    permission.updated_at = crate::models::now_rfc3339();

    put_doc(store, PERMISSIONS, &permission.id, &permission).await?;
    Ok(permission)
}

pub async fn delete_permission(store: &dyn DocumentStore, id: &str) -> ApiResult<()> {
    store.delete(PERMISSIONS, id).await?;
    Ok(())
}
