pub mod area_service;
pub mod attendance_service;
pub mod auth;
pub mod cache;
pub mod identity;
pub mod overtime_service;
pub mod permission_service;
pub mod request_service;
pub mod resolver;
pub mod role_service;
pub mod session_service;
pub mod shift_service;
pub mod sync_service;
pub mod user_service;

pub use cache::ViewCache;
pub use identity::{IdentityProvider, LocalIdentityProvider};
pub use sync_service::{DocumentSyncBridge, SyncBridge};
