use crate::api::{
    self,
    middleware::{require_auth, AppState},
};
use axum::{
    routing::{delete, get, post, put},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

pub fn build_router(state: AppState) -> Router {
    let protected = Router::new()
        .route("/api/auth/logout", post(api::auth::logout))
        .route("/api/auth/session", get(api::auth::get_session))
        // Users
        .route("/api/users", get(api::users::list_users))
        .route("/api/users", post(api::users::create_user))
        .route("/api/users/:id", get(api::users::get_user))
        .route("/api/users/:id", put(api::users::update_user))
        .route("/api/users/:id", delete(api::users::delete_user))
        // Roles and permissions
        .route("/api/roles", get(api::roles::list_roles))
        .route("/api/roles", post(api::roles::create_role))
        .route("/api/roles/:id", get(api::roles::get_role))
        .route("/api/roles/:id", put(api::roles::update_role))
        .route("/api/roles/:id", delete(api::roles::delete_role))
        .route("/api/permissions", get(api::permissions::list_permissions))
        .route("/api/permissions", post(api::permissions::create_permission))
        .route("/api/permissions/:id", get(api::permissions::get_permission))
        .route("/api/permissions/:id", put(api::permissions::update_permission))
        .route(
            "/api/permissions/:id",
            delete(api::permissions::delete_permission),
        )
        // Areas and locations
        .route("/api/areas", get(api::areas::list_areas))
        .route("/api/areas", post(api::areas::create_area))
        .route("/api/areas/:id", get(api::areas::get_area))
        .route("/api/areas/:id", put(api::areas::update_area))
        .route("/api/areas/:id", delete(api::areas::delete_area))
        .route("/api/locations", get(api::locations::list_locations))
        .route("/api/locations", post(api::locations::create_location))
        .route("/api/locations/:id", get(api::locations::get_location))
        .route("/api/locations/:id", put(api::locations::update_location))
        .route("/api/locations/:id", delete(api::locations::delete_location))
        // Shifts
        .route("/api/shifts", get(api::shifts::list_shifts))
        .route("/api/shifts", post(api::shifts::create_shift))
        .route("/api/shifts/:id", get(api::shifts::get_shift))
        .route("/api/shifts/:id", put(api::shifts::update_shift))
        .route("/api/shifts/:id", delete(api::shifts::delete_shift))
        // Attendance
        .route("/api/attendance", get(api::attendance::list_attendance))
        .route(
            "/api/attendance/:userId/:date",
            get(api::attendance::get_attendance),
        )
        // Overtime workflow
        .route("/api/overtime", get(api::overtime::list_overtime))
        .route("/api/overtime/:id", get(api::overtime::get_overtime))
        .route("/api/overtime/:id/decide", post(api::overtime::decide_overtime))
        // Correction requests
        .route("/api/requests", get(api::requests::list_requests))
        .route("/api/requests", post(api::requests::create_request))
        .route("/api/requests/:id", get(api::requests::get_request))
        .route("/api/requests/:id", put(api::requests::update_request))
        .route("/api/requests/:id/review", post(api::requests::review_request))
        // Mobile sync bridge
        .route("/api/mobile/sync", post(api::mobile_sync::post_sync))
        .route("/api/mobile/sync", get(api::mobile_sync::get_sync))
        .route("/api/mobile/sync", delete(api::mobile_sync::delete_sync))
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            require_auth,
        ));

    Router::new()
        .route("/api/auth/login", post(api::auth::login))
        .merge(protected)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
