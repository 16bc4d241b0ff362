#![allow(dead_code)]

use presensi::models::*;
use presensi::store::{put_doc, MemoryStore};
use std::collections::HashMap;
use std::sync::Arc;

pub fn test_store() -> Arc<MemoryStore> {
    Arc::new(MemoryStore::new())
}

/// Session with the wildcard permission, matching the seeded Admin role.
pub fn admin_session() -> Session {
    let mut permissions = HashMap::new();
    permissions.insert("*".to_string(), Action::ALL.to_vec());
    Session::new(
        "admin-token".to_string(),
        "admin1".to_string(),
        "Admin One".to_string(),
        "admin@example.com".to_string(),
        RoleSnapshot {
            name: "Admin".to_string(),
            permissions,
        },
        Vec::new(),
        8,
    )
}

/// Session restricted to the given permission grants and area scope.
pub fn scoped_session(grants: &[(&str, &[Action])], areas: &[&str]) -> Session {
    let permissions: HashMap<String, Vec<Action>> = grants
        .iter()
        .map(|(id, actions)| (id.to_string(), actions.to_vec()))
        .collect();
    Session::new(
        "scoped-token".to_string(),
        "supervisor1".to_string(),
        "Supervisor".to_string(),
        "supervisor@example.com".to_string(),
        RoleSnapshot {
            name: "Supervisor".to_string(),
            permissions,
        },
        areas.iter().map(|a| a.to_string()).collect(),
        8,
    )
}

pub async fn seed_user(
    store: &MemoryStore,
    id: &str,
    name: &str,
    role: &str,
    areas: &[&str],
) -> User {
    let mut user = User::new(name.to_string(), format!("{}@example.com", id), role.to_string());
    user.id = id.to_string();
    user.areas = areas.iter().map(|a| a.to_string()).collect();
    put_doc(store, "users", &user.id, &user).await.unwrap();
    user
}

pub async fn seed_role(store: &MemoryStore, id: &str, name: &str, grants: Vec<PermissionGrant>) -> Role {
    let mut role = Role::new(name.to_string(), grants);
    role.id = id.to_string();
    put_doc(store, "roles", &role.id, &role).await.unwrap();
    role
}

pub fn overtime_request(id: &str, user_id: &str, date: &str, status: OvertimeStatus) -> OvertimeRequest {
    let now = now_rfc3339();
    OvertimeRequest {
        id: id.to_string(),
        user_id: user_id.to_string(),
        user_name: Some("Budi Santoso".to_string()),
        user_avatar: None,
        date: date.to_string(),
        start_at: 64_800_000,
        end_at: 72_000_000,
        duration_minutes: Some(120),
        break_minutes: 0,
        overtime_type: OvertimeType::Weekday,
        compensation_type: CompensationType::Cash,
        reason: Some("deadline".to_string()),
        attachments: Vec::new(),
        cross_midnight: false,
        status,
        approver_id: None,
        approver_name: None,
        approver_note: None,
        decided_at: None,
        payroll_posted: false,
        created_at: now.clone(),
        updated_at: now,
    }
}

pub async fn seed_overtime(
    store: &MemoryStore,
    id: &str,
    user_id: &str,
    date: &str,
    status: OvertimeStatus,
) -> OvertimeRequest {
    let request = overtime_request(id, user_id, date, status);
    put_doc(store, "overtime", id, &request).await.unwrap();
    request
}

pub async fn seed_attendance(
    store: &MemoryStore,
    user_id: &str,
    date: &str,
    check_in_time: &str,
) -> AttendanceRecord {
    let now = now_rfc3339();
    let record = AttendanceRecord {
        user_id: user_id.to_string(),
        date: date.to_string(),
        user_name: "Budi Santoso".to_string(),
        user_avatar: String::new(),
        check_in: Some(AttendanceMark {
            time: check_in_time.to_string(),
            latitude: -6.2,
            longitude: 106.8,
            face_verified: true,
        }),
        check_out: Some(AttendanceMark {
            time: "17:00".to_string(),
            latitude: -6.2,
            longitude: 106.8,
            face_verified: true,
        }),
        status: "present".to_string(),
        late_by: 0,
        early_leave_by: 0,
        working_hours: 8.0,
        status_lembur: false,
        lembur_detail: None,
        created_at: now.clone(),
        updated_at: now,
    };
    put_doc(store, &format!("attendance/{}/day", user_id), date, &record)
        .await
        .unwrap();
    record
}
