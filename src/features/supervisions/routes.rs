use crate::features::supervisions::handlers;
use crate::features::supervisions::services::SupervisionService;
use axum::{
    routing::{get, put},
    Router,
};
use std::sync::Arc;

/// Supervision routes (require a valid access token)
pub fn routes(service: Arc<SupervisionService>) -> Router {
    Router::new()
        .route(
            "/supervisions",
            get(handlers::list_supervisions).post(handlers::create_supervision),
        )
        .route(
            "/supervisions/{id}",
            get(handlers::get_supervision)
                .put(handlers::update_supervision)
                .delete(handlers::delete_supervision),
        )
        .route("/take_in_ks", put(handlers::take_in_ks))
        .with_state(service)
}
