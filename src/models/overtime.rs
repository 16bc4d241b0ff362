use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OvertimeStatus {
    Draft,
    Submitted,
    Approved,
    Rejected,
    RevisionRequested,
    Cancelled,
}

impl OvertimeStatus {
    /// Approved, rejected and cancelled requests accept no further
    /// transitions. `revision_requested` is re-enterable to submitted
    /// by the employee-side flow.
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            OvertimeStatus::Approved | OvertimeStatus::Rejected | OvertimeStatus::Cancelled
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OvertimeType {
    Weekday,
    Weekend,
    Holiday,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CompensationType {
    Cash,
    Toil,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OvertimeRequest {
    pub id: String,
    pub user_id: String,
    #[serde(default)]
    pub user_name: Option<String>,
    #[serde(default)]
    pub user_avatar: Option<String>,
    pub date: String,
    /// Epoch milliseconds.
    pub start_at: i64,
    pub end_at: i64,
    #[serde(default)]
    pub duration_minutes: Option<i64>,
    #[serde(default)]
    pub break_minutes: i64,
    #[serde(rename = "type")]
    pub overtime_type: OvertimeType,
    pub compensation_type: CompensationType,
    #[serde(default)]
    pub reason: Option<String>,
    #[serde(default)]
    pub attachments: Vec<String>,
    #[serde(default)]
    pub cross_midnight: bool,
    pub status: OvertimeStatus,
    #[serde(default)]
    pub approver_id: Option<String>,
    #[serde(default)]
    pub approver_name: Option<String>,
    #[serde(default)]
    pub approver_note: Option<String>,
    #[serde(default)]
    pub decided_at: Option<String>,
    #[serde(default)]
    pub payroll_posted: bool,
    pub created_at: String,
    pub updated_at: String,
}

/// Admin decision on a submitted overtime request. `cancelled` is
/// employee-initiated and not a decision action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DecisionAction {
    Approve,
    Reject,
    RevisionRequested,
}

impl DecisionAction {
    pub fn target_status(&self) -> OvertimeStatus {
        match self {
            DecisionAction::Approve => OvertimeStatus::Approved,
            DecisionAction::Reject => OvertimeStatus::Rejected,
            DecisionAction::RevisionRequested => OvertimeStatus::RevisionRequested,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct DecideOvertimeRequest {
    pub action: DecisionAction,
    pub note: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OvertimeListQuery {
    pub status: Option<OvertimeStatus>,
    pub date_from: Option<String>,
    pub date_to: Option<String>,
    pub user_id: Option<String>,
    pub area: Option<String>,
    pub search: Option<String>,
    pub limit: Option<usize>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OvertimeStats {
    pub total: usize,
    pub submitted: usize,
    pub approved: usize,
    pub rejected: usize,
    pub total_hours: f64,
    pub average_hours: f64,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OvertimeListResponse {
    pub data: Vec<OvertimeRequest>,
    pub stats: OvertimeStats,
    pub total: usize,
}
