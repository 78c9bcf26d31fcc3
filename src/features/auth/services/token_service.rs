use crate::core::config::AuthConfig;
use crate::core::error::{AppError, Result};
use crate::features::auth::cookie;
use crate::features::auth::model::{AuthenticatedUser, Claims, User};
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};

/// Issues and validates the HS256 access tokens used by every protected route
pub struct TokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    ttl: Duration,
    cookie_name: String,
    cookie_secure: bool,
}

impl std::fmt::Debug for TokenService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenService")
            .field("ttl", &self.ttl)
            .field("cookie_name", &self.cookie_name)
            .field("cookie_secure", &self.cookie_secure)
            .finish()
    }
}

impl TokenService {
    pub fn new(config: &AuthConfig) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(config.jwt_secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(config.jwt_secret.as_bytes()),
            ttl: Duration::days(config.access_token_ttl_days),
            cookie_name: config.cookie_name.clone(),
            cookie_secure: config.cookie_secure,
        }
    }

    pub fn cookie_name(&self) -> &str {
        &self.cookie_name
    }

    /// Create an access token embedding the user's public profile
    pub fn issue_token(&self, user: &User) -> Result<String> {
        let now = Utc::now();
        let claims = Claims {
            sub: user.login.clone(),
            login: user.login.clone(),
            fio: user.fio.clone(),
            access_id: user.access_id,
            access_name: user.access_name.clone(),
            iat: now.timestamp(),
            exp: (now + self.ttl).timestamp(),
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key).map_err(|e| {
            tracing::error!("Failed to sign access token: {}", e);
            AppError::Internal("Failed to create access token".to_string())
        })
    }

    /// Validate signature and expiry, returning the embedded profile
    pub fn validate_token(&self, token: &str) -> Result<AuthenticatedUser> {
        let validation = Validation::new(Algorithm::HS256);

        let token_data = decode::<Claims>(token, &self.decoding_key, &validation).map_err(|e| {
            tracing::debug!("Rejected access token: {}", e);
            AppError::Unauthorized("Invalid or expired access token".to_string())
        })?;

        Ok(token_data.claims.into())
    }

    /// `Set-Cookie` value carrying a freshly issued token
    pub fn session_cookie(&self, token: &str) -> String {
        cookie::session_cookie(
            &self.cookie_name,
            token,
            self.ttl.num_seconds(),
            self.cookie_secure,
        )
    }

    /// `Set-Cookie` value that clears the token
    pub fn logout_cookie(&self) -> String {
        cookie::expired_cookie(&self.cookie_name, self.cookie_secure)
    }
}
