use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use validator::Validate;

use crate::core::error::{AppError, Result};
use crate::core::extractor::{AppJson, AppQuery};
use crate::features::auth::model::AuthenticatedUser;
use crate::features::supervisions::dtos::{
    CreateSupervisionDto, NewSupervision, SupervisionPatch, SupervisionQueryParams,
    SupervisionResponseDto, TakeInKsDto, TakeInKsResponseDto, UpdateSupervisionDto,
};
use crate::features::supervisions::filter::SupervisionFilter;
use crate::features::supervisions::services::SupervisionService;
use crate::shared::types::{ApiResponse, Meta};

/// List supervisions for a date range or a calendar month
#[utoipa::path(
    get,
    path = "/api/supervisions",
    params(SupervisionQueryParams),
    responses(
        (status = 200, description = "Matching supervisions", body = ApiResponse<Vec<SupervisionResponseDto>>),
        (status = 400, description = "Missing or contradictory filters"),
        (status = 401, description = "Unauthorized")
    ),
    tag = "supervisions",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn list_supervisions(
    State(service): State<Arc<SupervisionService>>,
    AppQuery(params): AppQuery<SupervisionQueryParams>,
) -> Result<Json<ApiResponse<Vec<SupervisionResponseDto>>>> {
    params
        .validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let filter = SupervisionFilter::try_from(&params)?;
    let supervisions = service.list(&filter).await?;
    let total = supervisions.len() as i64;

    Ok(Json(ApiResponse::success(
        Some(supervisions),
        None,
        Some(Meta { total }),
    )))
}

/// Get a supervision by id
#[utoipa::path(
    get,
    path = "/api/supervisions/{id}",
    params(
        ("id" = i32, Path, description = "Supervision ID")
    ),
    responses(
        (status = 200, description = "Supervision found", body = ApiResponse<SupervisionResponseDto>),
        (status = 400, description = "Supervision not found"),
        (status = 401, description = "Unauthorized")
    ),
    tag = "supervisions",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn get_supervision(
    State(service): State<Arc<SupervisionService>>,
    Path(id): Path<i32>,
) -> Result<Json<ApiResponse<SupervisionResponseDto>>> {
    let supervision = service.get_by_id(id).await?;
    Ok(Json(ApiResponse::success(Some(supervision), None, None)))
}

/// Create a supervision
#[utoipa::path(
    post,
    path = "/api/supervisions",
    request_body = CreateSupervisionDto,
    responses(
        (status = 201, description = "Supervision created", body = ApiResponse<SupervisionResponseDto>),
        (status = 400, description = "Validation error, invalid reference or invalid date"),
        (status = 401, description = "Unauthorized")
    ),
    tag = "supervisions",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn create_supervision(
    user: AuthenticatedUser,
    State(service): State<Arc<SupervisionService>>,
    AppJson(dto): AppJson<CreateSupervisionDto>,
) -> Result<(StatusCode, Json<ApiResponse<SupervisionResponseDto>>)> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let new = NewSupervision::try_from(dto)?;
    let supervision = service.create(new).await?;

    tracing::debug!("Supervision {} created by {}", supervision.id, user.login);

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(
            Some(supervision),
            Some("Supervision created".to_string()),
            None,
        )),
    ))
}

/// Partially update a supervision
///
/// Omitting `artist` clears the inspector of the record.
#[utoipa::path(
    put,
    path = "/api/supervisions/{id}",
    params(
        ("id" = i32, Path, description = "Supervision ID")
    ),
    request_body = UpdateSupervisionDto,
    responses(
        (status = 200, description = "Supervision updated", body = ApiResponse<SupervisionResponseDto>),
        (status = 400, description = "Validation error, unknown id, invalid reference or invalid date"),
        (status = 401, description = "Unauthorized")
    ),
    tag = "supervisions",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn update_supervision(
    user: AuthenticatedUser,
    State(service): State<Arc<SupervisionService>>,
    Path(id): Path<i32>,
    AppJson(dto): AppJson<UpdateSupervisionDto>,
) -> Result<Json<ApiResponse<SupervisionResponseDto>>> {
    let patch = SupervisionPatch::try_from(dto)?;
    let supervision = service.update(id, patch).await?;

    tracing::debug!("Supervision {} updated by {}", id, user.login);

    Ok(Json(ApiResponse::success(
        Some(supervision),
        Some("Supervision updated".to_string()),
        None,
    )))
}

/// Archive a supervision
#[utoipa::path(
    delete,
    path = "/api/supervisions/{id}",
    params(
        ("id" = i32, Path, description = "Supervision ID")
    ),
    responses(
        (status = 200, description = "Supervision archived"),
        (status = 400, description = "Supervision not found"),
        (status = 401, description = "Unauthorized")
    ),
    tag = "supervisions",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn delete_supervision(
    user: AuthenticatedUser,
    State(service): State<Arc<SupervisionService>>,
    Path(id): Path<i32>,
) -> Result<Json<ApiResponse<()>>> {
    service.archive(id).await?;

    tracing::debug!("Supervision {} archived by {}", id, user.login);

    Ok(Json(ApiResponse::success(
        None,
        Some("Supervision archived".to_string()),
        None,
    )))
}

/// Accept and reject supervisions for settlement
#[utoipa::path(
    put,
    path = "/api/take_in_ks",
    request_body = TakeInKsDto,
    responses(
        (status = 200, description = "Settlement statuses updated", body = ApiResponse<TakeInKsResponseDto>),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Unauthorized")
    ),
    tag = "supervisions",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn take_in_ks(
    State(service): State<Arc<SupervisionService>>,
    AppJson(dto): AppJson<TakeInKsDto>,
) -> Result<Json<ApiResponse<TakeInKsResponseDto>>> {
    let counts = service.take_in_ks(dto).await?;
    Ok(Json(ApiResponse::success(Some(counts), None, None)))
}
