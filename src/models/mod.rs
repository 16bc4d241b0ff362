pub mod area;
pub mod attendance;
pub mod notification;
pub mod overtime;
pub mod request;
pub mod role;
pub mod session;
pub mod shift;
pub mod sync;
pub mod user;

pub use area::*;
pub use attendance::*;
pub use notification::*;
pub use overtime::*;
pub use request::*;
pub use role::*;
pub use session::*;
pub use shift::*;
pub use sync::*;
pub use user::*;

use serde::{Deserialize, Serialize};

/// Current wall-clock time as an RFC 3339 string, the timestamp format
/// used by every document in the store.
pub fn now_rfc3339() -> String {
    time::OffsetDateTime::now_utc()
        .format(&time::format_description::well_known::Rfc3339)
        .unwrap()
}

/// Epoch milliseconds, the format used by overtime start/end markers.
pub fn now_epoch_ms() -> i64 {
    (time::OffsetDateTime::now_utc().unix_timestamp_nanos() / 1_000_000) as i64
}

/// Resolved view of a document reference. When the target document is
/// missing or unreadable, `unknown` stands in so a dangling reference
/// never fails the parent read.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RefSummary {
    pub id: String,
    pub name: String,
}

impl RefSummary {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }

    pub fn unknown(kind: &str) -> Self {
        Self {
            id: String::new(),
            name: format!("Unknown {}", kind),
        }
    }
}
