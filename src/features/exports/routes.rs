use std::sync::Arc;

use axum::{routing::get, Router};

use crate::features::exports::handlers;
use crate::features::exports::services::ExportService;

pub fn routes(service: Arc<ExportService>) -> Router {
    Router::new()
        .route("/excel_load", get(handlers::excel_load))
        .with_state(service)
}
