use crate::{
    api::middleware::{ApiResult, AppState},
    api::{ok, Envelope},
    models::*,
    services::{overtime_service, permission_service},
};
use axum::{
    extract::{Path, Query, State},
    Extension, Json,
};

pub async fn list_overtime(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
    Query(query): Query<OvertimeListQuery>,
) -> ApiResult<Json<OvertimeListResponse>> {
    permission_service::require(&session, "overtime", Action::Read)?;
    let response =
        overtime_service::list_overtime(state.store.as_ref(), &state.cache, &session, &query)
            .await?;
    Ok(Json(response))
}

pub async fn get_overtime(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
    Path(id): Path<String>,
) -> ApiResult<Json<Envelope<OvertimeRequest>>> {
    permission_service::require(&session, "overtime", Action::Read)?;
    let request = overtime_service::get_overtime(state.store.as_ref(), &state.cache, &id).await?;
    Ok(ok("overtime fetched", request))
}

/// Admin decision endpoint. Approver identity comes from the session;
/// approval also projects the request into the attendance record and
/// signals the owner's mobile client.
pub async fn decide_overtime(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
    Path(id): Path<String>,
    Json(request): Json<DecideOvertimeRequest>,
) -> ApiResult<Json<Envelope<OvertimeRequest>>> {
    permission_service::require(&session, "overtime", Action::Edit)?;
    let decided = overtime_service::decide(
        state.store.as_ref(),
        state.bridge.as_ref(),
        &state.cache,
        &id,
        request.action,
        &session.user_id,
        &session.user_name,
        request.note,
    )
    .await?;
    Ok(ok("decision applied", decided))
}
