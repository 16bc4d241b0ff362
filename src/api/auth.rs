use crate::{
    api::middleware::{ApiResult, AppState},
    models::*,
    services::{auth, session_service},
};
use axum::{extract::State, http::StatusCode, Extension, Json};

pub async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> ApiResult<Json<LoginResponse>> {
    let result = auth::sign_in(
        state.store.as_ref(),
        state.identity.as_ref(),
        &request.email,
        &request.password,
        state.session_duration_hours,
    )
    .await?;

    Ok(Json(LoginResponse {
        token: result.session.token.clone(),
        expires_at: result.session.expires_at.clone(),
        user: result.user,
        role: result.session.role,
        area_ids: result.session.area_ids,
    }))
}

pub async fn logout(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
) -> ApiResult<StatusCode> {
    session_service::delete_session(state.store.as_ref(), &session.token).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn get_session(
    Extension(session): Extension<Session>,
) -> ApiResult<Json<SessionResponse>> {
    Ok(Json(SessionResponse {
        user_id: session.user_id,
        user_name: session.user_name,
        email: session.email,
        role: session.role,
        area_ids: session.area_ids,
        expires_at: session.expires_at,
    }))
}
