use crate::{
    api::middleware::{ApiResult, AppState},
    api::{ok, ok_empty, Envelope},
    models::*,
    services::{permission_service, shift_service},
};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Extension, Json,
};

pub async fn list_shifts(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
) -> ApiResult<Json<Envelope<Vec<Shift>>>> {
    permission_service::require(&session, "shifts", Action::Read)?;
    let shifts = shift_service::list_shifts(state.store.as_ref()).await?;
    Ok(ok("shifts fetched", shifts))
}

pub async fn get_shift(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
    Path(id): Path<String>,
) -> ApiResult<Json<Envelope<Shift>>> {
    permission_service::require(&session, "shifts", Action::Read)?;
    let shift = shift_service::get_shift(state.store.as_ref(), &id).await?;
    Ok(ok("shift fetched", shift))
}

pub async fn create_shift(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
    Json(request): Json<CreateShiftRequest>,
) -> ApiResult<(StatusCode, Json<Envelope<Shift>>)> {
    permission_service::require(&session, "shifts", Action::Create)?;
    let shift = shift_service::create_shift(state.store.as_ref(), request).await?;
    Ok((StatusCode::CREATED, ok("shift created", shift)))
}

pub async fn update_shift(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
    Path(id): Path<String>,
    Json(request): Json<UpdateShiftRequest>,
) -> ApiResult<Json<Envelope<Shift>>> {
    permission_service::require(&session, "shifts", Action::Edit)?;
    let shift = shift_service::update_shift(state.store.as_ref(), &id, request).await?;
    Ok(ok("shift updated", shift))
}

pub async fn delete_shift(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
    Path(id): Path<String>,
) -> ApiResult<Json<Envelope<serde_json::Value>>> {
    permission_service::require(&session, "shifts", Action::Delete)?;
    shift_service::delete_shift(state.store.as_ref(), &id).await?;
    Ok(ok_empty("shift deleted"))
}
