use crate::api::middleware::{ApiError, ApiResult};
use crate::models::{Role, RoleSnapshot, Session, UserView};
use crate::services::identity::{IdentityError, IdentityProvider};
use crate::services::{session_service, user_service};
use crate::store::{get_doc, DocumentStore};

#[derive(Debug)]
pub struct AuthResult {
    pub session: Session,
    pub user: UserView,
}

/// Sign in with email and password. Resolves the user's full role chain
/// once and embeds the snapshot in the session; access checks for the
/// lifetime of the session read that snapshot, not the live role
/// document.
pub async fn sign_in(
    store: &dyn DocumentStore,
    identity: &dyn IdentityProvider,
    email: &str,
    password: &str,
    session_duration_hours: i64,
) -> ApiResult<AuthResult> {
    let user = user_service::find_by_email(store, email)
        .await?
        .ok_or(ApiError::Unauthorized)?;

    let verified = match identity.verify(&user.id, password).await {
        Ok(ok) => ok,
        Err(IdentityError::NotFound(_)) => false,
        Err(err) => return Err(ApiError::Internal(err.to_string())),
    };
    if !verified {
        return Err(ApiError::Unauthorized);
    }

    let role = resolve_role_snapshot(store, &user.role).await;

    let session = Session::new(
        session_service::generate_token(),
        user.id.clone(),
        user.name.clone(),
        user.email.clone(),
        role,
        user.areas.clone(),
        session_duration_hours,
    );
    session_service::create_session(store, &session).await?;

    let view = user_service::resolve_user(store, &user).await;

    Ok(AuthResult {
        session,
        user: view,
    })
}

/// Role reference -> claims snapshot. A dangling role reference yields
/// an empty snapshot named with the resolver sentinel, so login still
/// succeeds with no permissions.
pub async fn resolve_role_snapshot(store: &dyn DocumentStore, role_id: &str) -> RoleSnapshot {
    let role: Option<Role> = match get_doc(store, user_service::ROLES, role_id).await {
        Ok(role) => role,
        Err(err) => {
            tracing::warn!(role_id, error = %err, "role snapshot resolution failed");
            None
        }
    };

    match role {
        Some(role) => RoleSnapshot {
            name: role.name,
            permissions: role
                .permissions
                .into_iter()
                .map(|grant| (grant.id, grant.actions))
                .collect(),
        },
        None => RoleSnapshot::empty("Unknown Role"),
    }
}
