use crate::api::middleware::{ApiError, ApiResult};
use crate::models::AttendanceRecord;
use crate::store::{get_doc, DocumentStore};

/// Attendance records live in a per-user day collection keyed by date,
/// `attendance/{userId}/day/{date}`.
pub fn day_collection(user_id: &str) -> String {
    format!("attendance/{}/day", user_id)
}

pub async fn get_record(
    store: &dyn DocumentStore,
    user_id: &str,
    date: &str,
) -> ApiResult<Option<AttendanceRecord>> {
    Ok(get_doc(store, &day_collection(user_id), date).await?)
}

pub async fn get_record_or_404(
    store: &dyn DocumentStore,
    user_id: &str,
    date: &str,
) -> ApiResult<AttendanceRecord> {
    get_record(store, user_id, date).await?.ok_or_else(|| {
        ApiError::NotFound(format!("no attendance for {} on {}", user_id, date))
    })
}

/// Attendance rows for one user, optionally bounded by an inclusive
/// date range. ISO dates sort lexicographically, so the range check is
/// a plain string comparison on the document id.
pub async fn list_for_user(
    store: &dyn DocumentStore,
    user_id: &str,
    date_from: Option<&str>,
    date_to: Option<&str>,
) -> ApiResult<Vec<AttendanceRecord>> {
    let rows = store.list(&day_collection(user_id)).await?;

    let mut records = Vec::new();
    for (date, doc) in rows {
        if let Some(from) = date_from {
            if date.as_str() < from {
                continue;
            }
        }
        if let Some(to) = date_to {
            if date.as_str() > to {
                continue;
            }
        }
        records.push(serde_json::from_value(doc).map_err(crate::store::StoreError::from)?);
    }
    Ok(records)
}
