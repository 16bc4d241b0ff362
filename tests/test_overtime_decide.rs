mod helpers;

use presensi::api::middleware::ApiError;
use presensi::models::*;
use presensi::services::cache::ViewCache;
use presensi::services::sync_service::{self, DocumentSyncBridge, SyncBridge};
use presensi::services::overtime_service;
use presensi::store::{get_doc, StoreError, StoreResult};

/// Bridge double whose every call fails, for exercising the best-effort
/// signal path.
struct BrokenBridge;

#[async_trait::async_trait]
impl SyncBridge for BrokenBridge {
    async fn notify(&self, _user_id: &str, _notification: Notification) -> StoreResult<()> {
        Err(StoreError::Backend("bridge offline".to_string()))
    }

    async fn trigger_refresh(&self, _user_id: &str, _cause: &str) -> StoreResult<()> {
        Err(StoreError::Backend("bridge offline".to_string()))
    }
}

#[tokio::test]
async fn test_approve_creates_virtual_attendance_record() {
    let store = helpers::test_store();
    let bridge = DocumentSyncBridge::new(store.clone());
    let cache = ViewCache::default();
    helpers::seed_overtime(&store, "ot1", "u1", "2025-03-10", OvertimeStatus::Submitted).await;

    let decided = overtime_service::decide(
        store.as_ref(),
        &bridge,
        &cache,
        "ot1",
        DecisionAction::Approve,
        "admin1",
        "Admin One",
        Some("ok".to_string()),
    )
    .await
    .unwrap();

    assert_eq!(decided.status, OvertimeStatus::Approved);
    assert_eq!(decided.approver_id.as_deref(), Some("admin1"));
    assert!(decided.decided_at.is_some());

    let record: AttendanceRecord = get_doc(store.as_ref(), "attendance/u1/day", "2025-03-10")
        .await
        .unwrap()
        .expect("projection should create an attendance record");
    assert_eq!(record.status, "overtime");
    assert!(record.status_lembur);
    assert_eq!(record.working_hours, 2.0);
    assert_eq!(record.check_in, Some(AttendanceMark::empty()));

    let detail = record.lembur_detail.expect("detail must be set");
    assert_eq!(detail.overtime_id, "ot1");
    assert_eq!(detail.duration_minutes, 120);
    assert_eq!(detail.approved_by, "admin1");
}

#[tokio::test]
async fn test_approve_preserves_existing_check_marks() {
    let store = helpers::test_store();
    let bridge = DocumentSyncBridge::new(store.clone());
    let cache = ViewCache::default();
    helpers::seed_overtime(&store, "ot1", "u1", "2025-03-10", OvertimeStatus::Submitted).await;
    helpers::seed_attendance(&store, "u1", "2025-03-10", "08:00").await;

    overtime_service::decide(
        store.as_ref(),
        &bridge,
        &cache,
        "ot1",
        DecisionAction::Approve,
        "admin1",
        "Admin One",
        None,
    )
    .await
    .unwrap();

    let record: AttendanceRecord = get_doc(store.as_ref(), "attendance/u1/day", "2025-03-10")
        .await
        .unwrap()
        .unwrap();
    // Only the overtime fields change on an existing record.
    assert_eq!(record.check_in.unwrap().time, "08:00");
    assert_eq!(record.status, "present");
    assert!(record.status_lembur);
    assert_eq!(record.lembur_detail.unwrap().overtime_id, "ot1");
}

#[tokio::test]
async fn test_decided_request_rejects_second_decision() {
    let store = helpers::test_store();
    let bridge = DocumentSyncBridge::new(store.clone());
    let cache = ViewCache::default();
    helpers::seed_overtime(&store, "ot1", "u1", "2025-03-10", OvertimeStatus::Submitted).await;

    overtime_service::decide(
        store.as_ref(),
        &bridge,
        &cache,
        "ot1",
        DecisionAction::Approve,
        "admin1",
        "Admin One",
        None,
    )
    .await
    .unwrap();

    let err = overtime_service::decide(
        store.as_ref(),
        &bridge,
        &cache,
        "ot1",
        DecisionAction::Reject,
        "admin1",
        "Admin One",
        None,
    )
    .await
    .unwrap_err();
    assert!(matches!(err, ApiError::Conflict(_)));
}

#[tokio::test]
async fn test_reject_does_not_touch_attendance() {
    let store = helpers::test_store();
    let bridge = DocumentSyncBridge::new(store.clone());
    let cache = ViewCache::default();
    helpers::seed_overtime(&store, "ot1", "u1", "2025-03-10", OvertimeStatus::Submitted).await;

    let decided = overtime_service::decide(
        store.as_ref(),
        &bridge,
        &cache,
        "ot1",
        DecisionAction::Reject,
        "admin1",
        "Admin One",
        Some("di luar jadwal".to_string()),
    )
    .await
    .unwrap();

    assert_eq!(decided.status, OvertimeStatus::Rejected);
    let record: Option<AttendanceRecord> =
        get_doc(store.as_ref(), "attendance/u1/day", "2025-03-10")
            .await
            .unwrap();
    assert!(record.is_none());
}

#[tokio::test]
async fn test_approve_emits_notification_and_sync_trigger() {
    let store = helpers::test_store();
    let bridge = DocumentSyncBridge::new(store.clone());
    let cache = ViewCache::default();
    helpers::seed_overtime(&store, "ot1", "u1", "2025-03-10", OvertimeStatus::Submitted).await;

    overtime_service::decide(
        store.as_ref(),
        &bridge,
        &cache,
        "ot1",
        DecisionAction::Approve,
        "admin1",
        "Admin One",
        None,
    )
    .await
    .unwrap();

    let notifications = sync_service::list_notifications(store.as_ref(), "u1")
        .await
        .unwrap();
    assert_eq!(notifications.len(), 1);
    assert_eq!(notifications[0].kind, "overtime_decision");

    let sync: SyncDoc = get_doc(store.as_ref(), "userSync", "u1")
        .await
        .unwrap()
        .unwrap();
    assert!(sync.needs_refresh);
    assert_eq!(sync.last_sync_trigger, "overtime_approved");
}

#[tokio::test]
async fn test_decision_survives_broken_bridge() {
    let store = helpers::test_store();
    let cache = ViewCache::default();
    helpers::seed_overtime(&store, "ot1", "u1", "2025-03-10", OvertimeStatus::Submitted).await;

    // Signal failures are logged, not propagated.
    let decided = overtime_service::decide(
        store.as_ref(),
        &BrokenBridge,
        &cache,
        "ot1",
        DecisionAction::Approve,
        "admin1",
        "Admin One",
        None,
    )
    .await
    .unwrap();
    assert_eq!(decided.status, OvertimeStatus::Approved);

    let stored: OvertimeRequest = get_doc(store.as_ref(), "overtime", "ot1")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(stored.status, OvertimeStatus::Approved);
}

#[tokio::test]
async fn test_projection_removal_is_idempotent() {
    let store = helpers::test_store();

    // No record yet: removal is a no-op, not an error.
    overtime_service::remove_overtime_from_attendance(store.as_ref(), "u1", "2025-03-10")
        .await
        .unwrap();

    let request = helpers::overtime_request("ot1", "u1", "2025-03-10", OvertimeStatus::Approved);
    overtime_service::project_into_attendance(store.as_ref(), &request, &now_rfc3339())
        .await
        .unwrap();

    overtime_service::remove_overtime_from_attendance(store.as_ref(), "u1", "2025-03-10")
        .await
        .unwrap();
    let record: AttendanceRecord = get_doc(store.as_ref(), "attendance/u1/day", "2025-03-10")
        .await
        .unwrap()
        .unwrap();
    assert!(!record.status_lembur);
    assert!(record.lembur_detail.is_none());

    // Re-projection restores the overtime fields.
    overtime_service::project_into_attendance(store.as_ref(), &request, &now_rfc3339())
        .await
        .unwrap();
    let record: AttendanceRecord = get_doc(store.as_ref(), "attendance/u1/day", "2025-03-10")
        .await
        .unwrap()
        .unwrap();
    assert!(record.status_lembur);
}
