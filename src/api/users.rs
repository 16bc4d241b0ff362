use crate::{
    api::middleware::{ApiResult, AppState},
    api::{ok, ok_empty, Envelope},
    models::*,
    services::{permission_service, user_service},
};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Extension, Json,
};

pub async fn list_users(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
) -> ApiResult<Json<Envelope<Vec<UserView>>>> {
    permission_service::require(&session, "users", Action::Read)?;
    let users = user_service::list_users(state.store.as_ref(), &session).await?;
    Ok(ok("users fetched", users))
}

pub async fn get_user(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
    Path(id): Path<String>,
) -> ApiResult<Json<Envelope<UserView>>> {
    permission_service::require(&session, "users", Action::Read)?;
    let user = user_service::get_user(state.store.as_ref(), &id).await?;
    Ok(ok("user fetched", user))
}

pub async fn create_user(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
    Json(request): Json<CreateUserRequest>,
) -> ApiResult<(StatusCode, Json<Envelope<UserView>>)> {
    permission_service::require(&session, "users", Action::Create)?;
    let user =
        user_service::create_user(state.store.as_ref(), state.identity.as_ref(), request).await?;
    Ok((StatusCode::CREATED, ok("user created", user)))
}

pub async fn update_user(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
    Path(id): Path<String>,
    Json(request): Json<UpdateUserRequest>,
) -> ApiResult<Json<Envelope<UserView>>> {
    permission_service::require(&session, "users", Action::Edit)?;
    let user = user_service::update_user(state.store.as_ref(), &id, request).await?;
    Ok(ok("user updated", user))
}

pub async fn delete_user(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
    Path(id): Path<String>,
) -> ApiResult<Json<Envelope<serde_json::Value>>> {
    permission_service::require(&session, "users", Action::Delete)?;
    user_service::delete_user(state.store.as_ref(), state.identity.as_ref(), &id).await?;
    Ok(ok_empty("user deleted"))
}
