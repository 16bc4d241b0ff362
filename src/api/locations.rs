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

pub async fn list_locations(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
) -> ApiResult<Json<Envelope<Vec<Location>>>> {
    permission_service::require(&session, "locations", Action::Read)?;
    let locations = area_service::list_locations(state.store.as_ref()).await?;
    Ok(ok("locations fetched", locations))
}

pub async fn get_location(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
    Path(id): Path<String>,
) -> ApiResult<Json<Envelope<Location>>> {
    permission_service::require(&session, "locations", Action::Read)?;
    let location = area_service::get_location(state.store.as_ref(), &id).await?;
    Ok(ok("location fetched", location))
}

pub async fn create_location(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
    Json(request): Json<CreateLocationRequest>,
) -> ApiResult<(StatusCode, Json<Envelope<Location>>)> {
    permission_service::require(&session, "locations", Action::Create)?;
    let location = area_service::create_location(state.store.as_ref(), request).await?;
    Ok((StatusCode::CREATED, ok("location created", location)))
}

pub async fn update_location(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
    Path(id): Path<String>,
    Json(request): Json<UpdateLocationRequest>,
) -> ApiResult<Json<Envelope<Location>>> {
    permission_service::require(&session, "locations", Action::Edit)?;
    let location = area_service::update_location(state.store.as_ref(), &id, request).await?;
    Ok(ok("location updated", location))
}

pub async fn delete_location(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
    Path(id): Path<String>,
) -> ApiResult<Json<Envelope<serde_json::Value>>> {
    permission_service::require(&session, "locations", Action::Delete)?;
    area_service::delete_location(state.store.as_ref(), &id).await?;
    Ok(ok_empty("location deleted"))
}
