pub mod applications;
pub mod auth;
pub mod candidate_routes;
pub mod clients;
pub mod docs;
pub mod health;
pub mod users;

use axum::{
    routing::{get, post},
    Router,
};

use crate::middleware::{
    auth::{require_admin, require_auth},
    rate_limit::{rps_middleware, RateLimiter},
};
use crate::AppState;

/// Assembles every route with its auth and rate-limit layers. Layers added
/// last run first, so `require_auth` wraps `require_admin`.
pub fn build_router(state: AppState) -> Router {
    let config = state.config.clone();

    let base_routes = Router::new()
        .route("/health", get(health::health))
        .route("/api/openapi.json", get(docs::openapi_json));

    let public_api = Router::new()
        .route("/api/auth/login", post(auth::login))
        .route("/api/applications", post(applications::submit_application))
        .layer(axum::middleware::from_fn_with_state(
            RateLimiter::new(config.public_rps),
            rps_middleware,
        ));

    let staff_api = Router::new()
        .route("/api/auth/me", get(auth::me))
        .route("/api/auth/change-password", post(auth::change_password))
        .route(
            "/api/clients",
            get(clients::list_clients).post(clients::create_client),
        )
        .route(
            "/api/clients/:id",
            get(clients::get_client)
                .put(clients::update_client)
                .delete(clients::delete_client),
        )
        .route(
            "/api/candidates",
            get(candidate_routes::list_candidates).post(candidate_routes::create_candidate),
        )
        .route(
            "/api/candidates/:id",
            get(candidate_routes::get_candidate)
                .put(candidate_routes::update_candidate)
                .delete(candidate_routes::delete_candidate),
        )
        .route(
            "/api/candidates/:id/cv-preview",
            get(candidate_routes::get_cv_preview),
        )
        .route("/api/applications", get(applications::list_applications))
        .route(
            "/api/applications/:id",
            get(applications::get_application)
                .put(applications::update_application_status)
                .delete(applications::delete_application),
        )
        .route(
            "/api/applications/:id/approve",
            post(applications::approve_application),
        )
        .route(
            "/api/applications/:id/reject",
            post(applications::reject_application),
        )
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            require_auth,
        ));

    let admin_api = Router::new()
        .route("/api/users", get(users::list_users).post(users::create_user))
        .route(
            "/api/users/:id",
            get(users::get_user)
                .put(users::update_user)
                .delete(users::delete_user),
        )
        .route("/api/leads", post(clients::create_lead))
        .layer(axum::middleware::from_fn(require_admin))
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            require_auth,
        ));

    let protected_api = staff_api.merge(admin_api).layer(axum::middleware::from_fn_with_state(
        RateLimiter::new(config.api_rps),
        rps_middleware,
    ));

    base_routes
        .merge(public_api)
        .merge(protected_api)
        .with_state(state)
}
