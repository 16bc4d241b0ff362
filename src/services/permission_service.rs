use crate::api::middleware::{ApiError, ApiResult};
use crate::models::{Action, Session};

/// Permission id granted to the seeded Admin role. A session whose role
/// snapshot carries it passes every action check and is exempt from area
/// scoping.
pub const WILDCARD_PERMISSION: &str = "*";

/// Action-on-permission check against the session's role snapshot.
pub fn can_perform(session: &Session, permission_id: &str, action: Action) -> bool {
    if session.role.permissions.contains_key(WILDCARD_PERMISSION) {
        return true;
    }

    session
        .role
        .permissions
        .get(permission_id)
        .map(|actions| actions.contains(&action))
        .unwrap_or(false)
}

/// Handler-side guard: `can_perform` or a 403.
pub fn require(session: &Session, permission_id: &str, action: Action) -> ApiResult<()> {
    if can_perform(session, permission_id, action) {
        return Ok(());
    }
    Err(ApiError::Forbidden(format!(
        "requires {:?} on '{}'",
        action, permission_id
    )))
}

/// Sessions holding the wildcard permission see all areas; everyone else
/// is restricted to rows intersecting their own area set.
pub fn is_area_exempt(session: &Session) -> bool {
    session.role.permissions.contains_key(WILDCARD_PERMISSION)
}

/// Area-scope check for one row, given the row's area membership.
pub fn within_area_scope(session: &Session, row_areas: &[String]) -> bool {
    if is_area_exempt(session) {
        return true;
    }
    row_areas.iter().any(|a| session.area_ids.contains(a))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::RoleSnapshot;
    use std::collections::HashMap;

    fn session_with(permissions: HashMap<String, Vec<Action>>, areas: Vec<&str>) -> Session {
        Session::new(
            "tok".to_string(),
            "u1".to_string(),
            "Test".to_string(),
            "t@example.com".to_string(),
            RoleSnapshot {
                name: "Tester".to_string(),
                permissions,
            },
            areas.into_iter().map(String::from).collect(),
            1,
        )
    }

    #[test]
    fn test_grant_allows_listed_action_only() {
        let mut perms = HashMap::new();
        perms.insert("users".to_string(), vec![Action::Read]);
        let session = session_with(perms, vec![]);

        assert!(can_perform(&session, "users", Action::Read));
        assert!(!can_perform(&session, "users", Action::Delete));
        assert!(!can_perform(&session, "roles", Action::Read));
    }

    #[test]
    fn test_wildcard_allows_everything() {
        let mut perms = HashMap::new();
        perms.insert(WILDCARD_PERMISSION.to_string(), vec![]);
        let session = session_with(perms, vec![]);

        assert!(can_perform(&session, "users", Action::Delete));
        assert!(can_perform(&session, "anything", Action::Create));
        assert!(is_area_exempt(&session));
    }

    #[test]
    fn test_area_scope_intersection() {
        let session = session_with(HashMap::new(), vec!["a1", "a2"]);

        assert!(within_area_scope(&session, &["a2".to_string()]));
        assert!(!within_area_scope(&session, &["a9".to_string()]));
        assert!(!within_area_scope(&session, &[]));
    }

    #[test]
    fn test_require_rejects_with_forbidden() {
        let session = session_with(HashMap::new(), vec![]);
        assert!(require(&session, "users", Action::Read).is_err());
    }
}
