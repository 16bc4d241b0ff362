use crate::api::middleware::{ApiError, ApiResult};
use crate::models::{is_valid_hhmm, CreateShiftRequest, Shift, UpdateShiftRequest};
use crate::store::{get_doc, list_docs, put_doc, DocumentStore};

pub const SHIFTS: &str = "shifts";

pub async fn list_shifts(store: &dyn DocumentStore) -> ApiResult<Vec<Shift>> {
    Ok(list_docs(store, SHIFTS).await?)
}

pub async fn get_shift(store: &dyn DocumentStore, id: &str) -> ApiResult<Shift> {
    get_doc(store, SHIFTS, id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("shift {} not found", id)))
}

pub async fn create_shift(
    store: &dyn DocumentStore,
    request: CreateShiftRequest,
) -> ApiResult<Shift> {
    if request.name.trim().is_empty() {
        return Err(ApiError::BadRequest("name is required".to_string()));
    }
    if !is_valid_hhmm(&request.start_time) || !is_valid_hhmm(&request.end_time) {
        return Err(ApiError::BadRequest(
            "start and end times must be HH:mm".to_string(),
        ));
    }

    let shift = Shift::new(request.name, request.start_time, request.end_time);
    put_doc(store, SHIFTS, &shift.id, &shift).await?;
    Ok(shift)
}

pub async fn update_shift(
    store: &dyn DocumentStore,
    id: &str,
    request: UpdateShiftRequest,
) -> ApiResult<Shift> {
    let mut shift = get_shift(store, id).await?;

    if let Some(name) = request.name {
        shift.name = name;
    }
    if let Some(start_time) = request.start_time {
        shift.start_time = start_time;
    }
    if let Some(end_time) = request.end_time {
        shift.end_time = end_time;
    }
    if !is_valid_hhmm(&shift.start_time) || !is_valid_hhmm(&shift.end_time) {
        return Err(ApiError::BadRequest(
            "start and end times must be HH:mm".to_string(),
        ));
    }
    shift.updated_at = crate::models::now_rfc3339();

    put_doc(store, SHIFTS, &shift.id, &shift).await?;
    Ok(shift)
}

pub async fn delete_shift(store: &dyn DocumentStore, id: &str) -> ApiResult<()> {
    store.delete(SHIFTS, id).await?;
    Ok(())
}
