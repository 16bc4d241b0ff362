mod helpers;

use presensi::api::middleware::ApiError;
use presensi::bootstrap;
use presensi::config::Config;
use presensi::models::*;
use presensi::services::identity::{IdentityProvider, LocalIdentityProvider};
use presensi::services::{auth, session_service};
use presensi::store::list_docs;

fn test_config() -> Config {
    Config {
        database_url: "sqlite::memory:".to_string(),
        server_host: "127.0.0.1".to_string(),
        server_port: 0,
        admin_email: "admin@example.com".to_string(),
        admin_password: "RahasiaAdmin1!".to_string(),
        admin_name: "Administrator".to_string(),
        session_duration_hours: 9,
    }
}

#[tokio::test]
async fn test_sign_in_embeds_role_snapshot() {
    let store = helpers::test_store();
    let identity = LocalIdentityProvider::new(store.clone());
    helpers::seed_role(
        &store,
        "r1",
        "Supervisor",
        vec![PermissionGrant {
            id: "overtime".to_string(),
            actions: vec![Action::Read, Action::Edit],
        }],
    )
    .await;
    let user = helpers::seed_user(&store, "u1", "Budi", "r1", &["a1"]).await;
    identity
        .provision(&user.id, &user.email, "Rahasia123!")
        .await
        .unwrap();

    let result = auth::sign_in(
        store.as_ref(),
        &identity,
        "u1@example.com",
        "Rahasia123!",
        9,
    )
    .await
    .unwrap();

    assert_eq!(result.session.role.name, "Supervisor");
    assert_eq!(result.session.area_ids, vec!["a1"]);
    assert!(result.session.role.permissions.contains_key("overtime"));
    assert!(!result.session.is_expired());

    // The session document is retrievable by its token.
    let stored = session_service::get_session_by_token(store.as_ref(), &result.session.token)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(stored.user_id, "u1");
}

#[tokio::test]
async fn test_sign_in_rejects_wrong_password() {
    let store = helpers::test_store();
    let identity = LocalIdentityProvider::new(store.clone());
    let user = helpers::seed_user(&store, "u1", "Budi", "r1", &[]).await;
    identity
        .provision(&user.id, &user.email, "Rahasia123!")
        .await
        .unwrap();

    let err = auth::sign_in(store.as_ref(), &identity, "u1@example.com", "salah", 9)
        .await
        .unwrap_err();
    assert!(matches!(err, ApiError::Unauthorized));
}

#[tokio::test]
async fn test_sign_in_with_dangling_role_grants_nothing() {
    let store = helpers::test_store();
    let identity = LocalIdentityProvider::new(store.clone());
    let user = helpers::seed_user(&store, "u1", "Budi", "r-deleted", &[]).await;
    identity
        .provision(&user.id, &user.email, "Rahasia123!")
        .await
        .unwrap();

    let result = auth::sign_in(
        store.as_ref(),
        &identity,
        "u1@example.com",
        "Rahasia123!",
        9,
    )
    .await
    .unwrap();

    assert_eq!(result.session.role.name, "Unknown Role");
    assert!(result.session.role.permissions.is_empty());
}

#[tokio::test]
async fn test_logout_invalidates_token() {
    let store = helpers::test_store();
    let identity = LocalIdentityProvider::new(store.clone());
    let user = helpers::seed_user(&store, "u1", "Budi", "r1", &[]).await;
    identity
        .provision(&user.id, &user.email, "Rahasia123!")
        .await
        .unwrap();

    let result = auth::sign_in(
        store.as_ref(),
        &identity,
        "u1@example.com",
        "Rahasia123!",
        9,
    )
    .await
    .unwrap();

    session_service::delete_session(store.as_ref(), &result.session.token)
        .await
        .unwrap();
    let gone = session_service::get_session_by_token(store.as_ref(), &result.session.token)
        .await
        .unwrap();
    assert!(gone.is_none());
}

#[tokio::test]
async fn test_bootstrap_seeding_is_idempotent() {
    let store = helpers::test_store();
    let identity = LocalIdentityProvider::new(store.clone());
    let config = test_config();

    bootstrap::initialize_admin(store.as_ref(), &identity, &config)
        .await
        .unwrap();
    bootstrap::initialize_admin(store.as_ref(), &identity, &config)
        .await
        .unwrap();

    let permissions: Vec<Permission> = list_docs(store.as_ref(), "permissions").await.unwrap();
    assert_eq!(permissions.len(), 9);
    let roles: Vec<Role> = list_docs(store.as_ref(), "roles").await.unwrap();
    assert_eq!(roles.len(), 1);
    assert_eq!(roles[0].name, "Admin");
    let users: Vec<User> = list_docs(store.as_ref(), "users").await.unwrap();
    assert_eq!(users.len(), 1);

    // The seeded admin can sign in and is wildcard-exempt.
    let result = auth::sign_in(
        store.as_ref(),
        &identity,
        &config.admin_email,
        &config.admin_password,
        config.session_duration_hours,
    )
    .await
    .unwrap();
    assert!(presensi::services::permission_service::is_area_exempt(
        &result.session
    ));
}
