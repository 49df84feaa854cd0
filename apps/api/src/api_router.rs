use axum::Router;
use axum::routing::{get, post};
use mentor_core::AppError;
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::state::AppState;

mod cors;

pub fn build_router(app_state: AppState, frontend_url: &str) -> Result<Router, AppError> {
    let role_routes = Router::new()
        .route(
            "/api/roles",
            get(handlers::roles::list_roles_handler).post(handlers::roles::create_role_handler),
        )
        .route(
            "/api/roles/{role_id}",
            get(handlers::roles::get_role_handler).delete(handlers::roles::remove_role_handler),
        )
        .route(
            "/api/roles/{role_id}/permissions",
            get(handlers::roles::list_role_permissions_handler),
        )
        .route(
            "/api/roles/{role_id}/permissions/{permission_id}",
            post(handlers::roles::add_role_permission_handler)
                .delete(handlers::roles::remove_role_permission_handler),
        );

    let permission_routes = Router::new()
        .route(
            "/api/permissions",
            get(handlers::permissions::list_permissions_handler)
                .post(handlers::permissions::create_permission_handler),
        )
        .route(
            "/api/permissions/{permission_id}",
            get(handlers::permissions::get_permission_handler),
        );

    let user_routes = Router::new()
        .route(
            "/api/users",
            get(handlers::users::list_users_handler).post(handlers::users::create_user_handler),
        )
        .route(
            "/api/users/role",
            post(handlers::users::change_user_role_handler),
        )
        .route(
            "/api/users/message",
            post(handlers::users::send_user_message_handler),
        )
        .route(
            "/api/users/export",
            get(handlers::users::export_users_handler),
        )
        .route(
            "/api/users/{user_id}",
            get(handlers::users::get_user_handler)
                .put(handlers::users::update_user_handler)
                .delete(handlers::users::remove_user_handler),
        )
        .route(
            "/api/users/{user_id}/permissions/{permission_id}",
            post(handlers::users::grant_user_permission_handler)
                .delete(handlers::users::revoke_user_permission_handler),
        );

    Ok(Router::new()
        .route("/health", get(handlers::health::health_handler))
        .merge(role_routes)
        .merge(permission_routes)
        .merge(user_routes)
        .layer(TraceLayer::new_for_http())
        .layer(cors::build_cors_layer(frontend_url)?)
        .with_state(app_state))
}
