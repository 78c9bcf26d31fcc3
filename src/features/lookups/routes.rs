use std::sync::Arc;

use axum::{routing::get, Router};

use crate::features::lookups::handlers;
use crate::features::lookups::services::LookupService;

pub fn routes(service: Arc<LookupService>) -> Router {
    Router::new()
        .route("/lists", get(handlers::get_lists))
        .with_state(service)
}
