use crate::api::middleware::{ApiError, ApiResult};
use crate::models::{
    AttendanceMark, AttendanceRecord, DecisionAction, LemburDetail, Notification, OvertimeListQuery,
    OvertimeListResponse, OvertimeRequest, OvertimeStats, OvertimeStatus, Session, User,
};
use crate::services::cache::ViewCache;
use crate::services::{attendance_service, permission_service, sync_service, user_service};
use crate::store::{get_doc, list_docs, put_doc, DocumentStore, StoreResult};
use serde_json::json;
use std::collections::HashMap;

pub const OVERTIME: &str = "overtime";

#[derive(Debug, thiserror::Error)]
pub enum WorkflowError {
    #[error("overtime request {0} not found")]
    NotFound(String),

    #[error("cannot apply a decision to a request in status {status:?}")]
    InvalidState { status: OvertimeStatus },
}

impl From<WorkflowError> for ApiError {
    fn from(err: WorkflowError) -> Self {
        match err {
            WorkflowError::NotFound(id) => {
                ApiError::NotFound(format!("overtime request {} not found", id))
            }
            WorkflowError::InvalidState { .. } => ApiError::Conflict(err.to_string()),
        }
    }
}

/// Decisions apply to submitted requests only. Terminal states
/// (approved, rejected, cancelled) and draft/revision states reject the
/// transition outright rather than silently accepting a re-decision.
pub fn validate_decision(
    current: OvertimeStatus,
    _action: DecisionAction,
) -> Result<(), WorkflowError> {
    match current {
        OvertimeStatus::Submitted => Ok(()),
        status => Err(WorkflowError::InvalidState { status }),
    }
}

pub async fn get_overtime(
    store: &dyn DocumentStore,
    cache: &ViewCache,
    id: &str,
) -> ApiResult<OvertimeRequest> {
    let cache_key = format!("overtime:{}", id);
    if let Some(value) = cache.get(&cache_key) {
        if let Ok(request) = serde_json::from_value::<OvertimeRequest>(value) {
            return Ok(request);
        }
    }

    let request: OvertimeRequest = get_doc(store, OVERTIME, id)
        .await?
        .ok_or_else(|| WorkflowError::NotFound(id.to_string()))?;

    if let Ok(value) = serde_json::to_value(&request) {
        cache.set(&cache_key, value);
    }
    Ok(request)
}

/// Apply an admin decision to a submitted overtime request.
///
/// Write order: decision fields first, then (approve only) the
/// attendance projection, then the best-effort mobile signals. The
/// steps are not transactional; a projection failure surfaces as an
/// error while the decision write stands, and the signal steps never
/// fail the call at all.
pub async fn decide(
    store: &dyn DocumentStore,
    bridge: &dyn sync_service::SyncBridge,
    cache: &ViewCache,
    id: &str,
    action: DecisionAction,
    approver_id: &str,
    approver_name: &str,
    note: Option<String>,
) -> ApiResult<OvertimeRequest> {
    let mut request: OvertimeRequest = get_doc(store, OVERTIME, id)
        .await?
        .ok_or_else(|| WorkflowError::NotFound(id.to_string()))?;

    validate_decision(request.status, action)?;

    let now = crate::models::now_rfc3339();
    request.status = action.target_status();
    request.approver_id = Some(approver_id.to_string());
    request.approver_name = Some(approver_name.to_string());
    request.approver_note = note;
    request.decided_at = Some(now.clone());
    request.updated_at = now.clone();

    let cache_key = format!("overtime:{}", id);
    let update_id = cache.optimistic_update(
        &cache_key,
        serde_json::to_value(&request).map_err(crate::store::StoreError::from)?,
        crate::services::cache::MutationKind::Update,
    );

    if let Err(err) = put_doc(store, OVERTIME, id, &request).await {
        cache.revert(&update_id);
        return Err(err.into());
    }
    cache.confirm(&update_id, None);

    if action == DecisionAction::Approve {
        // The decision is already persisted; a projection failure is a
        // known inconsistency window surfaced to the caller.
        project_into_attendance(store, &request, &now).await?;
    }

    let notification = decision_notification(&request, action);
    sync_service::notify_best_effort(bridge, &request.user_id, notification).await;
    sync_service::refresh_best_effort(bridge, &request.user_id, trigger_cause(action)).await;

    Ok(request)
}

fn trigger_cause(action: DecisionAction) -> &'static str {
    match action {
        DecisionAction::Approve => "overtime_approved",
        DecisionAction::Reject => "overtime_rejected",
        DecisionAction::RevisionRequested => "overtime_revision_requested",
    }
}

fn decision_notification(request: &OvertimeRequest, action: DecisionAction) -> Notification {
    let (title, body) = match action {
        DecisionAction::Approve => (
            "Lembur disetujui".to_string(),
            format!("Pengajuan lembur tanggal {} telah disetujui.", request.date),
        ),
        DecisionAction::Reject => (
            "Lembur ditolak".to_string(),
            format!("Pengajuan lembur tanggal {} ditolak.", request.date),
        ),
        DecisionAction::RevisionRequested => (
            "Lembur perlu revisi".to_string(),
            format!(
                "Pengajuan lembur tanggal {} perlu diperbaiki dan diajukan ulang.",
                request.date
            ),
        ),
    };

    Notification::new(
        "overtime_decision",
        title,
        body,
        json!({
            "overtimeId": request.id,
            "date": request.date,
            "status": request.status,
        }),
    )
}

/// Project an approved overtime request into the daily attendance
/// aggregate at (userId, date).
///
/// An existing record is patched in place: check-in/out fields are left
/// untouched, only the overtime fields change. With no record present a
/// virtual one is created with zeroed marks and status "overtime".
pub async fn project_into_attendance(
    store: &dyn DocumentStore,
    request: &OvertimeRequest,
    approved_at: &str,
) -> StoreResult<()> {
    let duration_minutes = request.duration_minutes.unwrap_or(0);
    let detail = LemburDetail {
        overtime_id: request.id.clone(),
        start_at: request.start_at,
        end_at: request.end_at,
        duration_minutes,
        reason: request.reason.clone().unwrap_or_default(),
        approved_at: approved_at.to_string(),
        approved_by: request.approver_id.clone().unwrap_or_default(),
        approver_name: request.approver_name.clone().unwrap_or_default(),
        cross_midnight: request.cross_midnight,
    };

    let collection = attendance_service::day_collection(&request.user_id);
    let existing: Option<AttendanceRecord> = get_doc(store, &collection, &request.date).await?;

    match existing {
        Some(_) => {
            store
                .patch(
                    &collection,
                    &request.date,
                    &json!({
                        "statusLembur": true,
                        "lemburDetail": detail,
                        "updatedAt": crate::models::now_rfc3339(),
                    }),
                )
                .await
        }
        None => {
            let now = crate::models::now_rfc3339();
            let record = AttendanceRecord {
                user_id: request.user_id.clone(),
                date: request.date.clone(),
                user_name: request
                    .user_name
                    .clone()
                    .unwrap_or_else(|| "Unknown".to_string()),
                user_avatar: request.user_avatar.clone().unwrap_or_default(),
                check_in: Some(AttendanceMark::empty()),
                check_out: Some(AttendanceMark::empty()),
                status: "overtime".to_string(),
                late_by: 0,
                early_leave_by: 0,
                working_hours: duration_minutes as f64 / 60.0,
                status_lembur: true,
                lembur_detail: Some(detail),
                created_at: now.clone(),
                updated_at: now,
            };
            put_doc(store, &collection, &request.date, &record).await
        }
    }
}

/// Rollback helper: unset the overtime projection on an attendance
/// record. Safe to call when no record exists; that case is a no-op.
pub async fn remove_overtime_from_attendance(
    store: &dyn DocumentStore,
    user_id: &str,
    date: &str,
) -> StoreResult<()> {
    let collection = attendance_service::day_collection(user_id);
    if get_doc::<AttendanceRecord>(store, &collection, date)
        .await?
        .is_none()
    {
        return Ok(());
    }

    store
        .patch(
            &collection,
            date,
            &json!({
                "statusLembur": false,
                "lemburDetail": serde_json::Value::Null,
                "updatedAt": crate::models::now_rfc3339(),
            }),
        )
        .await
}

/// Filtered overtime list with aggregate stats. Stats and total cover
/// the whole filtered set before the limit is applied; stats are served
/// from the view cache while fresh. Non-exempt sessions only see
/// requests from users inside their area scope.
pub async fn list_overtime(
    store: &dyn DocumentStore,
    cache: &ViewCache,
    session: &Session,
    query: &OvertimeListQuery,
) -> ApiResult<OvertimeListResponse> {
    let requests: Vec<OvertimeRequest> = list_docs(store, OVERTIME).await?;

    // Owner area lookup, needed for both the area filter and scoping.
    let needs_areas = query.area.is_some() || !permission_service::is_area_exempt(session);
    let user_areas: HashMap<String, Vec<String>> = if needs_areas {
        let users: Vec<User> = list_docs(store, user_service::USERS).await?;
        users.into_iter().map(|u| (u.id, u.areas)).collect()
    } else {
        HashMap::new()
    };

    let empty: Vec<String> = Vec::new();
    let mut filtered: Vec<OvertimeRequest> = requests
        .into_iter()
        .filter(|r| {
            let areas = user_areas.get(&r.user_id).unwrap_or(&empty);

            if !permission_service::is_area_exempt(session)
                && !permission_service::within_area_scope(session, areas)
            {
                return false;
            }
            if let Some(status) = query.status {
                if r.status != status {
                    return false;
                }
            }
            if let Some(from) = &query.date_from {
                if r.date.as_str() < from.as_str() {
                    return false;
                }
            }
            if let Some(to) = &query.date_to {
                if r.date.as_str() > to.as_str() {
                    return false;
                }
            }
            if let Some(user_id) = &query.user_id {
                if &r.user_id != user_id {
                    return false;
                }
            }
            if let Some(area) = &query.area {
                if !areas.contains(area) {
                    return false;
                }
            }
            if let Some(search) = &query.search {
                let needle = search.to_lowercase();
                let name_hit = r
                    .user_name
                    .as_deref()
                    .map(|n| n.to_lowercase().contains(&needle))
                    .unwrap_or(false);
                let reason_hit = r
                    .reason
                    .as_deref()
                    .map(|n| n.to_lowercase().contains(&needle))
                    .unwrap_or(false);
                if !name_hit && !reason_hit {
                    return false;
                }
            }
            true
        })
        .collect();

    filtered.sort_by(|a, b| b.created_at.cmp(&a.created_at));

    let total = filtered.len();
    let stats = match cached_stats(cache, query) {
        Some(stats) => stats,
        None => {
            let stats = compute_stats(&filtered);
            cache_stats(cache, query, &stats);
            stats
        }
    };

    if let Some(limit) = query.limit {
        filtered.truncate(limit);
    }

    Ok(OvertimeListResponse {
        data: filtered,
        stats,
        total,
    })
}

pub fn compute_stats(requests: &[OvertimeRequest]) -> OvertimeStats {
    let total = requests.len();
    let submitted = requests
        .iter()
        .filter(|r| r.status == OvertimeStatus::Submitted)
        .count();
    let approved = requests
        .iter()
        .filter(|r| r.status == OvertimeStatus::Approved)
        .count();
    let rejected = requests
        .iter()
        .filter(|r| r.status == OvertimeStatus::Rejected)
        .count();

    let total_hours: f64 = requests
        .iter()
        .map(|r| r.duration_minutes.unwrap_or(0) as f64 / 60.0)
        .sum();
    let average_hours = if total > 0 {
        total_hours / total as f64
    } else {
        0.0
    };

    OvertimeStats {
        total,
        submitted,
        approved,
        rejected,
        total_hours,
        average_hours,
    }
}

fn stats_cache_key(query: &OvertimeListQuery) -> String {
    format!(
        "overtime-stats:{}:{}:{}:{}:{}:{}",
        query
            .status
            .map(|s| format!("{:?}", s))
            .unwrap_or_default(),
        query.date_from.clone().unwrap_or_default(),
        query.date_to.clone().unwrap_or_default(),
        query.user_id.clone().unwrap_or_default(),
        query.area.clone().unwrap_or_default(),
        query.search.clone().unwrap_or_default(),
    )
}

/// Cached aggregate for this filter combination, if still within its
/// TTL. The dashboard stats widgets tolerate aggregates a TTL window
/// stale; entries age out rather than being invalidated on writes.
fn cached_stats(cache: &ViewCache, query: &OvertimeListQuery) -> Option<OvertimeStats> {
    cache
        .get(&stats_cache_key(query))
        .and_then(|value| serde_json::from_value(value).ok())
}

fn cache_stats(cache: &ViewCache, query: &OvertimeListQuery, stats: &OvertimeStats) {
    if let Ok(value) = serde_json::to_value(stats) {
        cache.set(&stats_cache_key(query), value);
    }
}
