use crate::{
    api::middleware::error::ApiError,
    services::{cache::ViewCache, session_service, IdentityProvider, SyncBridge},
    store::DocumentStore,
};
use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn DocumentStore>,
    pub identity: Arc<dyn IdentityProvider>,
    pub bridge: Arc<dyn SyncBridge>,
    pub cache: Arc<ViewCache>,
    pub session_duration_hours: i64,
}

/// Extract and validate the Bearer session token. The session document
/// already carries the role snapshot resolved at sign-in; no per-request
/// re-resolution happens here.
pub async fn require_auth(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let auth_header = request
        .headers()
        .get("Authorization")
        .and_then(|h| h.to_str().ok());

    let token = match auth_header.and_then(|v| v.strip_prefix("Bearer ")) {
        Some(token) => token,
        None => return Err(ApiError::Unauthorized),
    };

    let session = session_service::get_session_by_token(state.store.as_ref(), token)
        .await?
        .ok_or(ApiError::Unauthorized)?;

    if session.is_expired() {
        if let Err(err) = session_service::delete_session(state.store.as_ref(), token).await {
            tracing::warn!(error = %err, "stale session cleanup failed, continuing");
        }
        return Err(ApiError::Unauthorized);
    }

    request.extensions_mut().insert(session);
    Ok(next.run(request).await)
}
