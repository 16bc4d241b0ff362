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

pub async fn list_roles(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
) -> ApiResult<Json<Envelope<Vec<Role>>>> {
    permission_service::require(&session, "roles", Action::Read)?;
    let roles = role_service::list_roles(state.store.as_ref()).await?;
    Ok(ok("roles fetched", roles))
}

pub async fn get_role(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
    Path(id): Path<String>,
) -> ApiResult<Json<Envelope<Role>>> {
    permission_service::require(&session, "roles", Action::Read)?;
    let role = role_service::get_role(state.store.as_ref(), &id).await?;
    Ok(ok("role fetched", role))
}

pub async fn create_role(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
    Json(request): Json<CreateRoleRequest>,
) -> ApiResult<(StatusCode, Json<Envelope<Role>>)> {
    permission_service::require(&session, "roles", Action::Create)?;
    let role = role_service::create_role(state.store.as_ref(), request).await?;
    Ok((StatusCode::CREATED, ok("role created", role)))
}

pub async fn update_role(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
    Path(id): Path<String>,
    Json(request): Json<UpdateRoleRequest>,
) -> ApiResult<Json<Envelope<Role>>> {
    permission_service::require(&session, "roles", Action::Edit)?;
    let role = role_service::update_role(state.store.as_ref(), &id, request).await?;
    Ok(ok("role updated", role))
}

pub async fn delete_role(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
    Path(id): Path<String>,
) -> ApiResult<Json<Envelope<serde_json::Value>>> {
    permission_service::require(&session, "roles", Action::Delete)?;
    role_service::delete_role(state.store.as_ref(), &id).await?;
    Ok(ok_empty("role deleted"))
}
