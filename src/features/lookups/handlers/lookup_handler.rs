use std::sync::Arc;

use axum::{extract::State, Json};

use crate::core::error::Result;
use crate::features::lookups::dtos::ListsResponseDto;
use crate::features::lookups::services::LookupService;
use crate::shared::types::ApiResponse;

/// Get the contents of all dropdown lists
#[utoipa::path(
    get,
    path = "/api/lists",
    responses(
        (status = 200, description = "Reference table contents", body = ApiResponse<ListsResponseDto>),
        (status = 401, description = "Unauthorized")
    ),
    tag = "lists",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn get_lists(
    State(service): State<Arc<LookupService>>,
) -> Result<Json<ApiResponse<ListsResponseDto>>> {
    let lists = service.lists().await?;
    Ok(Json(ApiResponse::success(Some(lists), None, None)))
}
