use sqlx::{FromRow, PgConnection, PgPool};

use crate::core::database::handle_db_error;
use crate::core::error::{AppError, Result};
use crate::features::artists::models::Artist;

#[derive(Debug, FromRow)]
struct ResolvedArtist {
    id: i32,
    inserted: bool,
}

/// Service for inspector records
pub struct ArtistService {
    pool: PgPool,
}

impl ArtistService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// List all inspectors
    pub async fn list(&self) -> Result<Vec<Artist>> {
        sqlx::query_as::<_, Artist>("SELECT id, fio FROM artists ORDER BY id")
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to list artists: {:?}", e);
                AppError::Database(e)
            })
    }

    /// Return the id of the inspector with exactly this name, creating it when unknown.
    ///
    /// Runs on the caller's connection so it joins the caller's transaction.
    pub async fn resolve_or_create(&self, conn: &mut PgConnection, fio: &str) -> Result<i32> {
        let resolved = sqlx::query_as::<_, ResolvedArtist>(
            r#"
            INSERT INTO artists (fio)
            VALUES ($1)
            ON CONFLICT (fio) DO UPDATE SET fio = EXCLUDED.fio
            RETURNING id, (xmax = 0) AS inserted
            "#,
        )
        .bind(fio)
        .fetch_one(conn)
        .await
        .map_err(handle_db_error)?;

        if resolved.inserted {
            tracing::info!("Created artist '{}' with id {}", fio, resolved.id);
        }

        Ok(resolved.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fake::faker::name::raw::Name;
    use fake::locales::EN;
    use fake::Fake;

    #[sqlx::test(migrations = "./migrations")]
    #[ignore = "requires DATABASE_URL pointing at a PostgreSQL server"]
    async fn test_resolve_or_create_reuses_existing_name(pool: PgPool) {
        let service = ArtistService::new(pool.clone());
        let fio: String = Name(EN).fake();
        let mut conn = pool.acquire().await.unwrap();

        let first = service.resolve_or_create(&mut conn, &fio).await.unwrap();
        let second = service.resolve_or_create(&mut conn, &fio).await.unwrap();
        assert_eq!(first, second);

        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM artists WHERE fio = $1")
            .bind(&fio)
            .fetch_one(&pool)
            .await
            .unwrap();
        assert_eq!(count, 1);
    }

    #[sqlx::test(migrations = "./migrations")]
    #[ignore = "requires DATABASE_URL pointing at a PostgreSQL server"]
    async fn test_resolve_or_create_adds_unseen_name(pool: PgPool) {
        let service = ArtistService::new(pool.clone());
        let mut conn = pool.acquire().await.unwrap();

        service
            .resolve_or_create(&mut conn, "Петров Пётр Петрович")
            .await
            .unwrap();
        service
            .resolve_or_create(&mut conn, "Сидоров Сидор Сидорович")
            .await
            .unwrap();

        let artists = service.list().await.unwrap();
        assert_eq!(artists.len(), 2);
        assert_eq!(artists[0].fio, "Петров Пётр Петрович");
    }
}
