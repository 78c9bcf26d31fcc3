use sqlx::PgPool;
use std::sync::Arc;

use crate::core::error::{AppError, Result};
use crate::features::auth::dtos::{AuthResponseDto, LoginRequestDto};
use crate::features::auth::model::User;
use crate::features::auth::services::TokenService;

/// Service for the credential check behind `POST /auth`
pub struct AuthService {
    pool: PgPool,
    tokens: Arc<TokenService>,
}

impl AuthService {
    pub fn new(pool: PgPool, tokens: Arc<TokenService>) -> Self {
        Self { pool, tokens }
    }

    /// Match the login/password pair against stored users and issue a token.
    ///
    /// Returns the response body and the `Set-Cookie` value carrying the token.
    pub async fn login(&self, dto: LoginRequestDto) -> Result<(AuthResponseDto, String)> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT u.id, u.login, u.fio, u.access_id, a.name AS access_name
            FROM users u
            JOIN accesses a ON a.id = u.access_id
            WHERE u.login = $1 AND u.password = $2
            "#,
        )
        .bind(dto.login.trim())
        .bind(&dto.password)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to look up user: {:?}", e);
            AppError::Database(e)
        })?
        .ok_or_else(|| AppError::Unauthorized("Invalid login or password".to_string()))?;

        let access_token = self.tokens.issue_token(&user)?;
        let cookie = self.tokens.session_cookie(&access_token);

        tracing::info!("User {} (id={}) logged in", user.login, user.id);

        Ok((AuthResponseDto { access_token }, cookie))
    }

    pub fn logout_cookie(&self) -> String {
        self.tokens.logout_cookie()
    }
}
