use crate::{
    api::middleware::{ApiError, ApiResult, AppState},
    api::{ok, Envelope},
    models::*,
    services::{permission_service, sync_service},
};
use axum::{
    extract::{Query, State},
    Extension, Json,
};

/// Idempotent setup of the per-user sync document, or a manual refresh
/// trigger, depending on `action`.
pub async fn post_sync(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
    Json(command): Json<SyncCommand>,
) -> ApiResult<Json<Envelope<SyncInfo>>> {
    permission_service::require(&session, "overtime", Action::Edit)?;
    if command.user_id.trim().is_empty() {
        return Err(ApiError::BadRequest("userId is required".to_string()));
    }

    let (action, message) = match command.action {
        SyncAction::Setup => {
            sync_service::setup_sync(state.store.as_ref(), &command.user_id).await?;
            ("setup", "sync document ready")
        }
        SyncAction::Refresh => {
            // Same best-effort policy as the workflow engine: a bridge
            // failure is logged, never surfaced to the caller.
            sync_service::refresh_best_effort(
                state.bridge.as_ref(),
                &command.user_id,
                "manual_refresh",
            )
            .await;
            ("refresh", "refresh triggered")
        }
    };

    Ok(ok(
        message,
        SyncInfo {
            user_id: command.user_id,
            action: action.to_string(),
            timestamp: crate::models::now_rfc3339(),
        },
    ))
}

/// Force a refresh trigger for the given user.
pub async fn get_sync(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
    Query(query): Query<SyncQuery>,
) -> ApiResult<Json<Envelope<SyncInfo>>> {
    permission_service::require(&session, "overtime", Action::Edit)?;
    sync_service::refresh_best_effort(state.bridge.as_ref(), &query.user_id, "forced_refresh")
        .await;

    Ok(ok(
        "refresh triggered",
        SyncInfo {
            user_id: query.user_id,
            action: "refresh".to_string(),
            timestamp: crate::models::now_rfc3339(),
        },
    ))
}

/// Reset the sync document's needsRefresh flag.
pub async fn delete_sync(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
    Query(query): Query<SyncQuery>,
) -> ApiResult<Json<Envelope<SyncInfo>>> {
    permission_service::require(&session, "overtime", Action::Edit)?;
    sync_service::reset_refresh(state.store.as_ref(), &query.user_id).await?;

    Ok(ok(
        "refresh flag reset",
        SyncInfo {
            user_id: query.user_id,
            action: "reset".to_string(),
            timestamp: crate::models::now_rfc3339(),
        },
    ))
}
