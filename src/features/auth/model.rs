use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

/// Public profile of the caller, restored from a validated access token
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AuthenticatedUser {
    pub login: String,
    pub fio: String,
    pub access_id: i32,
    pub access_name: String,
}

/// Database model for a user joined with its access level.
///
/// The password column is never selected.
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: i32,
    pub login: String,
    pub fio: String,
    pub access_id: i32,
    pub access_name: String,
}

/// Access token claims
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub login: String,
    pub fio: String,
    pub access_id: i32,
    pub access_name: String,
    pub iat: i64,
    pub exp: i64,
}

impl From<Claims> for AuthenticatedUser {
    fn from(claims: Claims) -> Self {
        Self {
            login: claims.login,
            fio: claims.fio,
            access_id: claims.access_id,
            access_name: claims.access_name,
        }
    }
}
