use crate::features::auth::handlers;
use crate::features::auth::services::AuthService;
use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;

/// Public auth routes (no authentication required)
pub fn public_routes(service: Arc<AuthService>) -> Router {
    Router::new()
        .route("/auth", post(handlers::login))
        .with_state(service)
}

/// Protected auth routes (require a valid access token)
pub fn protected_routes(service: Arc<AuthService>) -> Router {
    Router::new()
        .route("/auth", get(handlers::check).delete(handlers::logout))
        .with_state(service)
}
