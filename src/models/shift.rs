use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Work shift. Times are local `HH:mm` strings with no timezone
/// encoding, a known limitation of the data model.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Shift {
    pub id: String,
    pub name: String,
    pub start_time: String,
    pub end_time: String,
    pub created_at: String,
    pub updated_at: String,
}

impl Shift {
    pub fn new(name: String, start_time: String, end_time: String) -> Self {
        let now = crate::models::now_rfc3339();
        Self {
            id: Uuid::new_v4().to_string(),
            name,
            start_time,
            end_time,
            created_at: now.clone(),
            updated_at: now,
        }
    }
}

pub fn is_valid_hhmm(value: &str) -> bool {
    let re = regex::Regex::new(r"^([01]\d|2[0-3]):[0-5]\d$").unwrap();
    re.is_match(value)
}

// DTOs for API

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateShiftRequest {
    pub name: String,
    pub start_time: String,
    pub end_time: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateShiftRequest {
    pub name: Option<String>,
    pub start_time: Option<String>,
    pub end_time: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hhmm_accepts_valid_times() {
        assert!(is_valid_hhmm("00:00"));
        assert!(is_valid_hhmm("08:30"));
        assert!(is_valid_hhmm("23:59"));
    }

    #[test]
    fn test_hhmm_rejects_invalid_times() {
        assert!(!is_valid_hhmm("24:00"));
        assert!(!is_valid_hhmm("8:30"));
        assert!(!is_valid_hhmm("08:60"));
        assert!(!is_valid_hhmm("0830"));
        assert!(!is_valid_hhmm(""));
    }
}
