use crate::api::middleware::AppState;
use crate::config::Config;
use crate::models::{Action, Permission, PermissionGrant, Role, User};
use crate::services::{
    cache::ViewCache, identity::IdentityProvider, permission_service::WILDCARD_PERMISSION,
    role_service, user_service, DocumentSyncBridge, LocalIdentityProvider,
};
use crate::store::{list_docs, put_doc, DocumentStore};
use std::sync::Arc;

pub const ADMIN_ROLE_NAME: &str = "Admin";

/// Canonical permission documents seeded on first start. Each carries
/// the full action set; roles grant subsets of them.
const SEED_PERMISSIONS: [(&str, &str); 9] = [
    ("users", "Manage users"),
    ("roles", "Manage roles"),
    ("permissions", "Manage permissions"),
    ("areas", "Manage areas"),
    ("locations", "Manage locations"),
    ("shifts", "Manage shifts"),
    ("attendance", "View attendance"),
    ("overtime", "Manage overtime requests"),
    ("requests", "Manage correction requests"),
];

/// Seed the canonical permissions, the wildcard Admin role and the
/// admin user with its paired identity. Every step is idempotent so a
/// restart changes nothing.
pub async fn initialize_admin(
    store: &dyn DocumentStore,
    identity: &dyn IdentityProvider,
    config: &Config,
) -> anyhow::Result<()> {
    let existing: Vec<Permission> = list_docs(store, role_service::PERMISSIONS).await?;
    if existing.is_empty() {
        for (id, name) in SEED_PERMISSIONS {
            let permission =
                Permission::new(id.to_string(), name.to_string(), Action::ALL.to_vec());
            put_doc(store, role_service::PERMISSIONS, id, &permission).await?;
        }
        tracing::info!("seeded {} canonical permissions", SEED_PERMISSIONS.len());
    }

    let roles: Vec<Role> = list_docs(store, role_service::ROLES).await?;
    let admin_role = match roles.into_iter().find(|r| r.name == ADMIN_ROLE_NAME) {
        Some(role) => role,
        None => {
            let role = Role::new(
                ADMIN_ROLE_NAME.to_string(),
                vec![PermissionGrant {
                    id: WILDCARD_PERMISSION.to_string(),
                    actions: Action::ALL.to_vec(),
                }],
            );
            put_doc(store, role_service::ROLES, &role.id, &role).await?;
            tracing::info!(role_id = %role.id, "created Admin role");
            role
        }
    };

    if user_service::find_by_email(store, &config.admin_email)
        .await?
        .is_none()
    {
        let user = User::new(
            config.admin_name.clone(),
            config.admin_email.clone(),
            admin_role.id.clone(),
        );
        identity
            .provision(&user.id, &user.email, &config.admin_password)
            .await?;
        put_doc(store, user_service::USERS, &user.id, &user).await?;
        tracing::info!(user_id = %user.id, "created admin user");
    }

    Ok(())
}

pub fn build_app_state(store: Arc<dyn DocumentStore>, config: &Config) -> AppState {
    AppState {
        identity: Arc::new(LocalIdentityProvider::new(store.clone())),
        bridge: Arc::new(DocumentSyncBridge::new(store.clone())),
        cache: Arc::new(ViewCache::default()),
        store,
        session_duration_hours: config.session_duration_hours,
    }
}
