use crate::api::middleware::{ApiError, ApiResult};
use crate::models::{CreateUserRequest, Session, UpdateUserRequest, User, UserView};
use crate::services::identity::{IdentityError, IdentityProvider};
use crate::services::{permission_service, resolver};
use crate::store::{get_doc, list_docs, put_doc, DocumentStore};
use futures::future::join_all;
use serde_json::json;
use std::str::FromStr;

pub const USERS: &str = "users";
pub const ROLES: &str = "roles";
pub const AREAS: &str = "areas";
pub const SHIFTS: &str = "shifts";

/// Replace the user's role/area/shift references with resolved
/// summaries. The three fan-outs run concurrently; dangling references
/// come back as sentinels, never as errors.
pub async fn resolve_user(store: &dyn DocumentStore, user: &User) -> UserView {
    let (role, areas, shifts) = futures::join!(
        resolver::resolve_reference(store, ROLES, &user.role, "Role"),
        resolver::resolve_references(store, AREAS, &user.areas, "Area"),
        resolver::resolve_references(store, SHIFTS, &user.shifts, "Shift"),
    );

    UserView {
        id: user.id.clone(),
        name: user.name.clone(),
        email: user.email.clone(),
        role,
        areas,
        shifts,
        avatar: user.avatar.clone(),
        created_at: user.created_at.clone(),
        updated_at: user.updated_at.clone(),
    }
}

pub async fn find_by_email(store: &dyn DocumentStore, email: &str) -> ApiResult<Option<User>> {
    let users: Vec<User> = list_docs(store, USERS).await?;
    let email = email.to_lowercase();
    Ok(users.into_iter().find(|u| u.email == email))
}

/// Area-scoped user list: non-exempt sessions only see users whose area
/// membership intersects the session's area set.
pub async fn list_users(store: &dyn DocumentStore, session: &Session) -> ApiResult<Vec<UserView>> {
    let users: Vec<User> = list_docs(store, USERS).await?;

    let scoped: Vec<User> = users
        .into_iter()
        .filter(|u| permission_service::within_area_scope(session, &u.areas))
        .collect();

    Ok(join_all(scoped.iter().map(|u| resolve_user(store, u))).await)
}

pub async fn get_user(store: &dyn DocumentStore, id: &str) -> ApiResult<UserView> {
    let user: User = get_doc(store, USERS, id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("user {} not found", id)))?;
    Ok(resolve_user(store, &user).await)
}

/// Create the user document with its paired external identity. The
/// identity is provisioned first; a provisioning failure leaves no user
/// document behind.
pub async fn create_user(
    store: &dyn DocumentStore,
    identity: &dyn IdentityProvider,
    request: CreateUserRequest,
) -> ApiResult<UserView> {
    if request.name.trim().is_empty() {
        return Err(ApiError::BadRequest("name is required".to_string()));
    }
    if email_address::EmailAddress::from_str(&request.email).is_err() {
        return Err(ApiError::BadRequest("invalid email address".to_string()));
    }
    if find_by_email(store, &request.email).await?.is_some() {
        return Err(ApiError::Conflict("email already exists".to_string()));
    }

    let mut user = User::new(request.name, request.email, request.role);
    user.areas = request.areas;
    user.shifts = request.shifts;

    identity
        .provision(&user.id, &user.email, &request.password)
        .await
        .map_err(|e| ApiError::Internal(format!("identity provisioning failed: {}", e)))?;

    put_doc(store, USERS, &user.id, &user).await?;
    Ok(resolve_user(store, &user).await)
}

pub async fn update_user(
    store: &dyn DocumentStore,
    id: &str,
    request: UpdateUserRequest,
) -> ApiResult<UserView> {
    let existing: User = get_doc(store, USERS, id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("user {} not found", id)))?;

    let mut fields = serde_json::Map::new();
    if let Some(name) = request.name {
        fields.insert("name".to_string(), json!(name));
    }
    if let Some(role) = request.role {
        fields.insert("role".to_string(), json!(role));
    }
    if let Some(areas) = request.areas {
        fields.insert("areas".to_string(), json!(areas));
    }
    if let Some(shifts) = request.shifts {
        fields.insert("shifts".to_string(), json!(shifts));
    }
    if let Some(avatar) = request.avatar {
        fields.insert("avatar".to_string(), json!(avatar));
    }
    fields.insert("updatedAt".to_string(), json!(crate::models::now_rfc3339()));

    store
        .patch(USERS, id, &serde_json::Value::Object(fields))
        .await?;

    let updated: User = get_doc(store, USERS, id)
        .await?
        .unwrap_or(existing);
    Ok(resolve_user(store, &updated).await)
}

/// Two-phase best-effort delete: the external identity goes first. A
/// not-found identity is treated as already satisfied; any other
/// identity failure aborts the document delete.
pub async fn delete_user(
    store: &dyn DocumentStore,
    identity: &dyn IdentityProvider,
    id: &str,
) -> ApiResult<()> {
    match identity.deprovision(id).await {
        Ok(()) => {}
        Err(IdentityError::NotFound(_)) => {
            tracing::info!(user_id = id, "identity already absent, proceeding with delete");
        }
        Err(err) => {
            return Err(ApiError::Internal(format!(
                "identity deprovisioning failed: {}",
                err
            )));
        }
    }

    store.delete(USERS, id).await?;
    Ok(())
}
