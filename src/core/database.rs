use crate::core::config::DatabaseConfig;
use crate::core::error::AppError;
use sqlx::{postgres::PgPoolOptions, PgPool};
use std::time::Duration;

/// Open the connection pool handed to every service
pub async fn create_pool(config: &DatabaseConfig) -> Result<PgPool, sqlx::Error> {
    tracing::debug!(
        "Connecting to database (max_connections={}, min_connections={})",
        config.max_connections,
        config.min_connections
    );

    PgPoolOptions::new()
        .max_connections(config.max_connections)
        .min_connections(config.min_connections)
        .acquire_timeout(Duration::from_secs(config.acquire_timeout_secs))
        .idle_timeout(Duration::from_secs(config.idle_timeout_secs))
        .max_lifetime(Duration::from_secs(config.max_lifetime_secs))
        .connect(&config.url)
        .await
}

/// Apply pending schema migrations and seed rows
pub async fn run_migrations(pool: &PgPool) -> anyhow::Result<()> {
    tracing::info!("Running database migrations...");
    sqlx::migrate!("./migrations")
        .run(pool)
        .await
        .map_err(|e| anyhow::anyhow!("Migration failed: {}", e))?;
    tracing::info!("Database migrations completed successfully");
    Ok(())
}

/// Map a PostgreSQL SQLSTATE to the error reported to the client
pub fn classify_sqlstate(code: &str) -> Option<AppError> {
    match code {
        // foreign_key_violation
        "23503" => Some(AppError::InvalidReference(
            "Referenced list value does not exist".to_string(),
        )),
        // not_null_violation
        "23502" => Some(AppError::Validation(
            "A required field is missing".to_string(),
        )),
        // string_data_right_truncation
        "22001" => Some(AppError::Validation(
            "A text value is longer than the field allows".to_string(),
        )),
        // invalid_datetime_format, datetime_field_overflow
        "22007" | "22008" => Some(AppError::InvalidDate(
            "Date value is malformed or out of range".to_string(),
        )),
        _ => None,
    }
}

/// Helper to convert write failures into client-facing error kinds
pub fn handle_db_error(e: sqlx::Error) -> AppError {
    if let sqlx::Error::Database(db_err) = &e {
        if let Some(err) = db_err.code().as_deref().and_then(classify_sqlstate) {
            tracing::warn!("Rejected write: {}", db_err.message());
            return err;
        }
    }

    tracing::error!("Write failed: {:?}", e);
    AppError::Database(e)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_sqlstate() {
        assert!(matches!(
            classify_sqlstate("23503"),
            Some(AppError::InvalidReference(_))
        ));
        assert!(matches!(
            classify_sqlstate("22007"),
            Some(AppError::InvalidDate(_))
        ));
        assert!(matches!(
            classify_sqlstate("22008"),
            Some(AppError::InvalidDate(_))
        ));
        assert!(matches!(
            classify_sqlstate("23502"),
            Some(AppError::Validation(_))
        ));
        assert!(matches!(
            classify_sqlstate("22001"),
            Some(AppError::Validation(_))
        ));
        assert!(classify_sqlstate("40001").is_none());
    }

    #[test]
    fn test_non_database_errors_stay_internal() {
        assert!(matches!(
            handle_db_error(sqlx::Error::RowNotFound),
            AppError::Database(_)
        ));
    }
}
