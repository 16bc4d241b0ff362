use crate::{
    api::middleware::{ApiResult, AppState},
    api::{ok, Envelope},
    models::*,
    services::{permission_service, request_service},
};
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Extension, Json,
};

pub async fn list_requests(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
    Query(query): Query<CorrectionListQuery>,
) -> ApiResult<Json<Envelope<Vec<CorrectionRequest>>>> {
    permission_service::require(&session, "requests", Action::Read)?;
    let requests = request_service::list_requests(state.store.as_ref(), &query).await?;
    Ok(ok("requests fetched", requests))
}

pub async fn get_request(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
    Path(id): Path<String>,
) -> ApiResult<Json<Envelope<CorrectionRequest>>> {
    permission_service::require(&session, "requests", Action::Read)?;
    let request = request_service::get_request(state.store.as_ref(), &id).await?;
    Ok(ok("request fetched", request))
}

pub async fn create_request(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
    Json(payload): Json<CreateCorrectionRequest>,
) -> ApiResult<(StatusCode, Json<Envelope<CorrectionRequest>>)> {
    permission_service::require(&session, "requests", Action::Create)?;
    let request = request_service::create_request(state.store.as_ref(), payload).await?;
    Ok((StatusCode::CREATED, ok("request created", request)))
}

pub async fn update_request(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
    Path(id): Path<String>,
    Json(payload): Json<UpdateCorrectionRequest>,
) -> ApiResult<Json<Envelope<CorrectionRequest>>> {
    permission_service::require(&session, "requests", Action::Edit)?;
    let request = request_service::update_request(state.store.as_ref(), &id, payload).await?;
    Ok(ok("request updated", request))
}

pub async fn review_request(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
    Path(id): Path<String>,
    Json(payload): Json<ReviewCorrectionRequest>,
) -> ApiResult<Json<Envelope<CorrectionRequest>>> {
    permission_service::require(&session, "requests", Action::Edit)?;
    let request = request_service::review_request(
        state.store.as_ref(),
        state.bridge.as_ref(),
        &id,
        payload.action,
        &session.user_id,
        &session.user_name,
        payload.note,
    )
    .await?;
    Ok(ok("review applied", request))
}
