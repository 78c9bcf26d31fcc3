use std::sync::Arc;

use axum::{extract::State, Json};
use validator::Validate;

use crate::core::error::{AppError, Result};
use crate::core::extractor::AppQuery;
use crate::features::statistics::dtos::{CountInfoQueryParams, CountInfoResponseDto};
use crate::features::statistics::services::StatisticsService;
use crate::shared::types::ApiResponse;

/// Get supervision counts for a year and each of its months
#[utoipa::path(
    get,
    path = "/api/supervisions_count_info",
    params(CountInfoQueryParams),
    responses(
        (status = 200, description = "Counts of active supervisions", body = ApiResponse<CountInfoResponseDto>),
        (status = 400, description = "Missing or invalid year"),
        (status = 401, description = "Unauthorized")
    ),
    tag = "statistics",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn supervisions_count_info(
    State(service): State<Arc<StatisticsService>>,
    AppQuery(params): AppQuery<CountInfoQueryParams>,
) -> Result<Json<ApiResponse<CountInfoResponseDto>>> {
    params
        .validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let info = service.count_info(params.year).await?;
    Ok(Json(ApiResponse::success(Some(info), None, None)))
}
