use crate::{
    api::middleware::{ApiResult, AppState},
    api::{ok, Envelope},
    models::*,
    services::{attendance_service, permission_service},
};
use axum::{
    extract::{Path, Query, State},
    Extension, Json,
};

pub async fn list_attendance(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
    Query(query): Query<AttendanceListQuery>,
) -> ApiResult<Json<Envelope<Vec<AttendanceRecord>>>> {
    permission_service::require(&session, "attendance", Action::Read)?;
    let records = attendance_service::list_for_user(
        state.store.as_ref(),
        &query.user_id,
        query.date_from.as_deref(),
        query.date_to.as_deref(),
    )
    .await?;
    Ok(ok("attendance fetched", records))
}

pub async fn get_attendance(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
    Path((user_id, date)): Path<(String, String)>,
) -> ApiResult<Json<Envelope<AttendanceRecord>>> {
    permission_service::require(&session, "attendance", Action::Read)?;
    let record = attendance_service::get_record_or_404(state.store.as_ref(), &user_id, &date).await?;
    Ok(ok("attendance fetched", record))
}
