use crate::api::middleware::{ApiError, ApiResult};
use crate::models::{
    CorrectionListQuery, CorrectionRequest, CorrectionStatus, CreateCorrectionRequest, Location,
    LocationSnapshot, Notification, ReviewAction, UpdateCorrectionRequest,
};
use crate::services::{area_service, sync_service};
use crate::store::{get_doc, list_docs, put_doc, DocumentStore};
use serde_json::json;

pub const REQUESTS: &str = "requests";

pub async fn list_requests(
    store: &dyn DocumentStore,
    query: &CorrectionListQuery,
) -> ApiResult<Vec<CorrectionRequest>> {
    let mut requests: Vec<CorrectionRequest> = list_docs(store, REQUESTS).await?;

    if let Some(employee_id) = &query.employee_id {
        requests.retain(|r| &r.employee_id == employee_id);
    }
    if let Some(status) = query.status {
        requests.retain(|r| r.status == status);
    }
    requests.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    Ok(requests)
}

pub async fn get_request(store: &dyn DocumentStore, id: &str) -> ApiResult<CorrectionRequest> {
    get_doc(store, REQUESTS, id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("request {} not found", id)))
}

/// Create a correction request. The referenced location is snapshotted
/// into the document at submission time so later edits to the location
/// do not rewrite history.
pub async fn create_request(
    store: &dyn DocumentStore,
    payload: CreateCorrectionRequest,
) -> ApiResult<CorrectionRequest> {
    if payload.employee_id.trim().is_empty() {
        return Err(ApiError::BadRequest("employeeId is required".to_string()));
    }
    if payload.reason.trim().is_empty() {
        return Err(ApiError::BadRequest("reason is required".to_string()));
    }

    let mut request = CorrectionRequest::new(
        payload.employee_id,
        payload.correction_type,
        payload.date,
        payload.reason,
    );
    request.subtype = payload.subtype;
    request.requested_check_in = payload.requested_check_in;
    request.requested_check_out = payload.requested_check_out;
    request.attachments = payload.attachments;
    request.location_id = payload.location_id.clone();

    if let Some(location_id) = &payload.location_id {
        request.location_snapshot = snapshot_location(store, location_id).await;
    }

    put_doc(store, REQUESTS, &request.id, &request).await?;
    Ok(request)
}

async fn snapshot_location(store: &dyn DocumentStore, location_id: &str) -> Option<LocationSnapshot> {
    match get_doc::<Location>(store, area_service::LOCATIONS, location_id).await {
        Ok(Some(location)) => Some(LocationSnapshot {
            id: location.id,
            name: location.name,
            latitude: location.latitude,
            longitude: location.longitude,
            radius: location.radius,
        }),
        Ok(None) => {
            tracing::warn!(location_id, "snapshot skipped: location missing at submission");
            None
        }
        Err(err) => {
            tracing::warn!(location_id, error = %err, "snapshot skipped: location unreadable");
            None
        }
    }
}

/// Edit an undecided correction request. Allowed from SUBMITTED and
/// NEEDS_REVISION only; editing a NEEDS_REVISION request re-submits it.
/// A changed location reference refreshes the snapshot.
pub async fn update_request(
    store: &dyn DocumentStore,
    id: &str,
    payload: UpdateCorrectionRequest,
) -> ApiResult<CorrectionRequest> {
    let mut request = get_request(store, id).await?;

    match request.status {
        CorrectionStatus::Submitted | CorrectionStatus::NeedsRevision => {}
        status => {
            return Err(ApiError::Conflict(format!(
                "cannot edit a request in status {:?}",
                status
            )));
        }
    }

    if let Some(subtype) = payload.subtype {
        request.subtype = Some(subtype);
    }
    if let Some(check_in) = payload.requested_check_in {
        request.requested_check_in = Some(check_in);
    }
    if let Some(check_out) = payload.requested_check_out {
        request.requested_check_out = Some(check_out);
    }
    if let Some(reason) = payload.reason {
        if reason.trim().is_empty() {
            return Err(ApiError::BadRequest("reason is required".to_string()));
        }
        request.reason = reason;
    }
    if let Some(attachments) = payload.attachments {
        request.attachments = attachments;
    }
    if let Some(location_id) = payload.location_id {
        request.location_snapshot = snapshot_location(store, &location_id).await;
        request.location_id = Some(location_id);
    }

    if request.status == CorrectionStatus::NeedsRevision {
        request.status = CorrectionStatus::Submitted;
        request.reviewer_id = None;
        request.reviewer_name = None;
        request.reviewer_note = None;
        request.reviewed_at = None;
    }
    request.updated_at = crate::models::now_rfc3339();

    put_doc(store, REQUESTS, id, &request).await?;
    Ok(request)
}

/// Review a submitted correction request. Mirrors the overtime decide
/// path: strict SUBMITTED precondition, reviewer fields, best-effort
/// notification toward the employee's device.
pub async fn review_request(
    store: &dyn DocumentStore,
    bridge: &dyn sync_service::SyncBridge,
    id: &str,
    action: ReviewAction,
    reviewer_id: &str,
    reviewer_name: &str,
    note: Option<String>,
) -> ApiResult<CorrectionRequest> {
    let mut request = get_request(store, id).await?;

    if request.status != CorrectionStatus::Submitted {
        return Err(ApiError::Conflict(format!(
            "cannot review a request in status {:?}",
            request.status
        )));
    }

    let now = crate::models::now_rfc3339();
    request.status = action.target_status();
    request.reviewer_id = Some(reviewer_id.to_string());
    request.reviewer_name = Some(reviewer_name.to_string());
    request.reviewer_note = note;
    request.reviewed_at = Some(now.clone());
    request.updated_at = now;

    put_doc(store, REQUESTS, id, &request).await?;

    let (title, body) = match action {
        ReviewAction::Approve => (
            "Pengajuan koreksi disetujui",
            format!("Koreksi absensi tanggal {} telah disetujui.", request.date),
        ),
        ReviewAction::Reject => (
            "Pengajuan koreksi ditolak",
            format!("Koreksi absensi tanggal {} ditolak.", request.date),
        ),
        ReviewAction::NeedsRevision => (
            "Pengajuan koreksi perlu revisi",
            format!("Koreksi absensi tanggal {} perlu diperbaiki.", request.date),
        ),
    };
    let notification = Notification::new(
        "correction_review",
        title.to_string(),
        body,
        json!({
            "requestId": request.id,
            "date": request.date,
            "status": request.status,
        }),
    );
    sync_service::notify_best_effort(bridge, &request.employee_id, notification).await;

    Ok(request)
}
