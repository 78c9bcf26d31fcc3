use crate::core::error::{AppError, Result};
use crate::core::extractor::AppJson;
use crate::features::auth::dtos::{AuthResponseDto, CurrentUserDto, LoginRequestDto};
use crate::features::auth::model::AuthenticatedUser;
use crate::features::auth::services::AuthService;
use crate::shared::types::ApiResponse;
use axum::{extract::State, http::header, response::IntoResponse, Json};
use std::sync::Arc;
use validator::Validate;

/// Login with login and password
#[utoipa::path(
    post,
    path = "/api/auth",
    request_body = LoginRequestDto,
    responses(
        (status = 200, description = "Login successful, token also set as cookie", body = ApiResponse<AuthResponseDto>),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Invalid login or password")
    ),
    tag = "auth"
)]
pub async fn login(
    State(service): State<Arc<AuthService>>,
    AppJson(dto): AppJson<LoginRequestDto>,
) -> Result<impl IntoResponse> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let (auth_response, cookie) = service.login(dto).await?;
    Ok((
        [(header::SET_COOKIE, cookie)],
        Json(ApiResponse::success(Some(auth_response), None, None)),
    ))
}

/// Check that the current access token is valid
#[utoipa::path(
    get,
    path = "/api/auth",
    responses(
        (status = 200, description = "Token is valid", body = ApiResponse<CurrentUserDto>),
        (status = 401, description = "Unauthorized")
    ),
    tag = "auth",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn check(user: AuthenticatedUser) -> Result<Json<ApiResponse<CurrentUserDto>>> {
    Ok(Json(ApiResponse::success(Some(user.into()), None, None)))
}

/// Logout by expiring the token cookie
///
/// Tokens are stateless, so an already copied token stays valid until it expires.
#[utoipa::path(
    delete,
    path = "/api/auth",
    responses(
        (status = 200, description = "Cookie cleared"),
        (status = 401, description = "Unauthorized")
    ),
    tag = "auth",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn logout(
    user: AuthenticatedUser,
    State(service): State<Arc<AuthService>>,
) -> Result<impl IntoResponse> {
    tracing::info!("User {} logged out", user.login);
    Ok((
        [(header::SET_COOKIE, service.logout_cookie())],
        Json(ApiResponse::<()>::success(None, None, None)),
    ))
}
