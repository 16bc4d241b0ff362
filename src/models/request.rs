use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Attendance correction request types: a forgotten check-in/out, or a
/// correction of recorded times.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CorrectionType {
    LupaAbsen,
    KoreksiJam,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CorrectionStatus {
    Submitted,
    NeedsRevision,
    Approved,
    Rejected,
    Canceled,
}

/// Location fields captured at submission time so historical display
/// stays stable even if the location document changes later.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocationSnapshot {
    pub id: String,
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
    pub radius: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CorrectionRequest {
    pub id: String,
    pub employee_id: String,
    #[serde(rename = "type")]
    pub correction_type: CorrectionType,
    #[serde(default)]
    pub subtype: Option<String>,
    pub date: String,
    #[serde(default)]
    pub requested_check_in: Option<String>,
    #[serde(default)]
    pub requested_check_out: Option<String>,
    pub reason: String,
    #[serde(default)]
    pub attachments: Vec<String>,
    pub status: CorrectionStatus,
    #[serde(default)]
    pub reviewer_id: Option<String>,
    #[serde(default)]
    pub reviewer_name: Option<String>,
    #[serde(default)]
    pub reviewer_note: Option<String>,
    #[serde(default)]
    pub reviewed_at: Option<String>,
    #[serde(default)]
    pub location_id: Option<String>,
    #[serde(default)]
    pub location_snapshot: Option<LocationSnapshot>,
    pub created_at: String,
    pub updated_at: String,
}

impl CorrectionRequest {
    pub fn new(
        employee_id: String,
        correction_type: CorrectionType,
        date: String,
        reason: String,
    ) -> Self {
        let now = crate::models::now_rfc3339();
        Self {
            id: Uuid::new_v4().to_string(),
            employee_id,
            correction_type,
            subtype: None,
            date,
            requested_check_in: None,
            requested_check_out: None,
            reason,
            attachments: Vec::new(),
            status: CorrectionStatus::Submitted,
            reviewer_id: None,
            reviewer_name: None,
            reviewer_note: None,
            reviewed_at: None,
            location_id: None,
            location_snapshot: None,
            created_at: now.clone(),
            updated_at: now,
        }
    }
}

// DTOs for API

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateCorrectionRequest {
    pub employee_id: String,
    #[serde(rename = "type")]
    pub correction_type: CorrectionType,
    pub subtype: Option<String>,
    pub date: String,
    pub requested_check_in: Option<String>,
    pub requested_check_out: Option<String>,
    pub reason: String,
    #[serde(default)]
    pub attachments: Vec<String>,
    pub location_id: Option<String>,
}

/// Employee-side edit of a request that has not been decided yet.
/// Editing a NEEDS_REVISION request re-submits it.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCorrectionRequest {
    pub subtype: Option<String>,
    pub requested_check_in: Option<String>,
    pub requested_check_out: Option<String>,
    pub reason: Option<String>,
    pub attachments: Option<Vec<String>>,
    pub location_id: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReviewAction {
    Approve,
    Reject,
    NeedsRevision,
}

impl ReviewAction {
    pub fn target_status(&self) -> CorrectionStatus {
        match self {
            ReviewAction::Approve => CorrectionStatus::Approved,
            ReviewAction::Reject => CorrectionStatus::Rejected,
            ReviewAction::NeedsRevision => CorrectionStatus::NeedsRevision,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct ReviewCorrectionRequest {
    pub action: ReviewAction,
    pub note: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CorrectionListQuery {
    pub employee_id: Option<String>,
    pub status: Option<CorrectionStatus>,
}
