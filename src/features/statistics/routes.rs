use std::sync::Arc;

use axum::{routing::get, Router};

use crate::features::statistics::handlers;
use crate::features::statistics::services::StatisticsService;

pub fn routes(service: Arc<StatisticsService>) -> Router {
    Router::new()
        .route(
            "/supervisions_count_info",
            get(handlers::supervisions_count_info),
        )
        .with_state(service)
}
