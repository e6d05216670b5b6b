use crate::features::users::handlers;
use crate::features::users::services::UserService;
use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;

/// Registration and token endpoints (no authentication required)
pub fn public_routes(service: Arc<UserService>) -> Router {
    Router::new()
        .route("/users", post(handlers::create_user))
        .route("/users/token", post(handlers::login))
        .route("/users/refresh-token", post(handlers::refresh_token))
        .with_state(service)
}

/// Account endpoints (require a bearer access token)
pub fn protected_routes(service: Arc<UserService>) -> Router {
    Router::new()
        .route("/users/me", get(handlers::get_me))
        .with_state(service)
}
