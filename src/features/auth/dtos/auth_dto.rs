use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::features::auth::model::AuthenticatedUser;

/// Request DTO for login
#[derive(Debug, Serialize, Deserialize, Validate, ToSchema)]
pub struct LoginRequestDto {
    #[validate(length(min = 1, max = 255, message = "Login is required"))]
    pub login: String,

    #[validate(length(min = 1, max = 255, message = "Password is required"))]
    pub password: String,
}

/// Response DTO for a successful login
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct AuthResponseDto {
    /// Bearer token, also delivered as a cookie
    pub access_token: String,
}

/// Profile carried by the current access token
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CurrentUserDto {
    pub login: String,
    pub fio: String,
    pub access_name: String,
}

impl From<AuthenticatedUser> for CurrentUserDto {
    fn from(user: AuthenticatedUser) -> Self {
        Self {
            login: user.login,
            fio: user.fio,
            access_name: user.access_name,
        }
    }
}
