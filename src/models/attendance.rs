use serde::{Deserialize, Serialize};

/// A single check-in or check-out mark.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttendanceMark {
    pub time: String,
    pub latitude: f64,
    pub longitude: f64,
    pub face_verified: bool,
}

impl AttendanceMark {
    /// Zeroed placeholder used by virtual attendance records created by
    /// the overtime projection.
    pub fn empty() -> Self {
        Self {
            time: String::new(),
            latitude: 0.0,
            longitude: 0.0,
            face_verified: false,
        }
    }
}

/// Overtime details projected onto an attendance record when the
/// corresponding overtime request is approved.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LemburDetail {
    pub overtime_id: String,
    pub start_at: i64,
    pub end_at: i64,
    pub duration_minutes: i64,
    pub reason: String,
    pub approved_at: String,
    pub approved_by: String,
    pub approver_name: String,
    pub cross_midnight: bool,
}

/// Daily attendance record, keyed by (userId, date). Stored under the
/// per-user day collection with the date as document id.
///
/// Invariant: `lembur_detail` is present if and only if `status_lembur`
/// is true.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttendanceRecord {
    pub user_id: String,
    pub date: String,
    pub user_name: String,
    #[serde(default)]
    pub user_avatar: String,
    #[serde(default)]
    pub check_in: Option<AttendanceMark>,
    #[serde(default)]
    pub check_out: Option<AttendanceMark>,
    pub status: String,
    #[serde(default)]
    pub late_by: i64,
    #[serde(default)]
    pub early_leave_by: i64,
    #[serde(default)]
    pub working_hours: f64,
    #[serde(default)]
    pub status_lembur: bool,
    #[serde(default)]
    pub lembur_detail: Option<LemburDetail>,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttendanceListQuery {
    pub user_id: String,
    pub date_from: Option<String>,
    pub date_to: Option<String>,
}
