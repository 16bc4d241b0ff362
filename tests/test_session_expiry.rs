mod helpers;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use presensi::api::build_router;
use presensi::api::middleware::AppState;
use presensi::models::*;
use presensi::services::cache::ViewCache;
use presensi::services::identity::LocalIdentityProvider;
use presensi::services::sync_service::DocumentSyncBridge;
use presensi::store::{get_doc, put_doc, MemoryStore};
use std::sync::Arc;
use tower::ServiceExt;

fn app_state(store: Arc<MemoryStore>) -> AppState {
    AppState {
        identity: Arc::new(LocalIdentityProvider::new(store.clone())),
        bridge: Arc::new(DocumentSyncBridge::new(store.clone())),
        cache: Arc::new(ViewCache::default()),
        store,
        session_duration_hours: 9,
    }
}

fn session_request(token: Option<&str>) -> Request<Body> {
    let builder = Request::builder().uri("/api/auth/session");
    let builder = match token {
        Some(token) => builder.header("Authorization", format!("Bearer {}", token)),
        None => builder,
    };
    builder.body(Body::empty()).unwrap()
}

#[tokio::test]
async fn test_expired_session_is_rejected_and_removed() {
    let store = helpers::test_store();
    // Negative duration puts the expiry in the past.
    let session = Session::new(
        "stale-token".to_string(),
        "u1".to_string(),
        "Budi".to_string(),
        "u1@example.com".to_string(),
        RoleSnapshot::empty("Admin"),
        Vec::new(),
        -1,
    );
    put_doc(store.as_ref(), "sessions", "stale-token", &session)
        .await
        .unwrap();

    let app = build_router(app_state(store.clone()));
    let response = app.oneshot(session_request(Some("stale-token"))).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    // The stale session document is cleaned up on rejection.
    let gone: Option<Session> = get_doc(store.as_ref(), "sessions", "stale-token")
        .await
        .unwrap();
    assert!(gone.is_none());
}

#[tokio::test]
async fn test_live_session_passes_the_middleware() {
    let store = helpers::test_store();
    let session = helpers::admin_session();
    put_doc(store.as_ref(), "sessions", &session.token, &session)
        .await
        .unwrap();

    let app = build_router(app_state(store.clone()));
    let response = app
        .oneshot(session_request(Some(&session.token)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_missing_bearer_token_is_rejected() {
    let app = build_router(app_state(helpers::test_store()));
    let response = app.oneshot(session_request(None)).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_unknown_token_is_rejected() {
    let app = build_router(app_state(helpers::test_store()));
    let response = app.oneshot(session_request(Some("no-such-token"))).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}
