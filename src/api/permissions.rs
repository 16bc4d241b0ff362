use crate::{
    api::middleware::{ApiResult, AppState},
    api::{ok, ok_empty, Envelope},
    models::*,
    services::{permission_service, role_service},
};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Extension, Json,
};

pub async fn list_permissions(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
) -> ApiResult<Json<Envelope<Vec<Permission>>>> {
    permission_service::require(&session, "permissions", Action::Read)?;
    let permissions = role_service::list_permissions(state.store.as_ref()).await?;
    Ok(ok("permissions fetched", permissions))
}

pub async fn get_permission(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
    Path(id): Path<String>,
) -> ApiResult<Json<Envelope<Permission>>> {
    permission_service::require(&session, "permissions", Action::Read)?;
    let permission = role_service::get_permission(state.store.as_ref(), &id).await?;
    Ok(ok("permission fetched", permission))
}

pub async fn create_permission(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
    Json(request): Json<CreatePermissionRequest>,
) -> ApiResult<(StatusCode, Json<Envelope<Permission>>)> {
    permission_service::require(&session, "permissions", Action::Create)?;
    let permission = role_service::create_permission(state.store.as_ref(), request).await?;
    Ok((StatusCode::CREATED, ok("permission created", permission)))
}

pub async fn update_permission(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
    Path(id): Path<String>,
    Json(request): Json<UpdatePermissionRequest>,
) -> ApiResult<Json<Envelope<Permission>>> {
    permission_service::require(&session, "permissions", Action::Edit)?;
    let permission = role_service::update_permission(state.store.as_ref(), &id, request).await?;
    Ok(ok("permission updated", permission))
}

pub async fn delete_permission(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
    Path(id): Path<String>,
) -> ApiResult<Json<Envelope<serde_json::Value>>> {
    permission_service::require(&session, "permissions", Action::Delete)?;
    role_service::delete_permission(state.store.as_ref(), &id).await?;
    Ok(ok_empty("permission deleted"))
}
