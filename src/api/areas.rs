use crate::{
    api::middleware::{ApiResult, AppState},
    api::{ok, ok_empty, Envelope},
    models::*,
    services::{area_service, permission_service},
};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Extension, Json,
};

pub async fn list_areas(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
) -> ApiResult<Json<Envelope<Vec<Area>>>> {
    permission_service::require(&session, "areas", Action::Read)?;
    let areas = area_service::list_areas(state.store.as_ref()).await?;
    Ok(ok("areas fetched", areas))
}

pub async fn get_area(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
    Path(id): Path<String>,
) -> ApiResult<Json<Envelope<Area>>> {
    permission_service::require(&session, "areas", Action::Read)?;
    let area = area_service::get_area(state.store.as_ref(), &id).await?;
    Ok(ok("area fetched", area))
}

pub async fn create_area(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
    Json(request): Json<CreateAreaRequest>,
) -> ApiResult<(StatusCode, Json<Envelope<Area>>)> {
    permission_service::require(&session, "areas", Action::Create)?;
    let area = area_service::create_area(state.store.as_ref(), request).await?;
    Ok((StatusCode::CREATED, ok("area created", area)))
}

pub async fn update_area(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
    Path(id): Path<String>,
    Json(request): Json<UpdateAreaRequest>,
) -> ApiResult<Json<Envelope<Area>>> {
    permission_service::require(&session, "areas", Action::Edit)?;
    let area = area_service::update_area(state.store.as_ref(), &id, request).await?;
    Ok(ok("area updated", area))
}

pub async fn delete_area(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
    Path(id): Path<String>,
) -> ApiResult<Json<Envelope<serde_json::Value>>> {
    permission_service::require(&session, "areas", Action::Delete)?;
    area_service::delete_area(state.store.as_ref(), &id).await?;
    Ok(ok_empty("area deleted"))
}
