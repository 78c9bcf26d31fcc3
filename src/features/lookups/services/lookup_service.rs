use sqlx::PgPool;
use std::sync::Arc;

use crate::core::error::{AppError, Result};
use crate::features::artists::ArtistService;
use crate::features::lookups::dtos::{ListsResponseDto, LookupItemDto};
use crate::features::lookups::models::{Contractor, LookupItem, LookupTable};

/// Service for reference table contents
pub struct LookupService {
    pool: PgPool,
    artists: Arc<ArtistService>,
}

impl LookupService {
    pub fn new(pool: PgPool, artists: Arc<ArtistService>) -> Self {
        Self { pool, artists }
    }

    /// Contents of every reference table, contractors without archived ones
    pub async fn lists(&self) -> Result<ListsResponseDto> {
        let artists = self.artists.list().await?;
        let contractors = self.list_active_contractors().await?;

        Ok(ListsResponseDto {
            artists: artists.into_iter().map(Into::into).collect(),
            contractors: contractors.into_iter().map(Into::into).collect(),
            day_types: self.list_table(LookupTable::DayTypes).await?,
            paid_statuses: self.list_table(LookupTable::PaidStatuses).await?,
            statuses_execution: self.list_table(LookupTable::StatusesExecution).await?,
            statuses_ks: self.list_table(LookupTable::StatusesKs).await?,
            responsible_departments: self
                .list_table(LookupTable::ResponsibleDepartments)
                .await?,
        })
    }

    async fn list_table(&self, table: LookupTable) -> Result<Vec<LookupItemDto>> {
        let query = format!("SELECT id, name FROM {} ORDER BY id", table.as_sql());

        let items: Vec<LookupItem> = sqlx::query_as(&query)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to list {}: {:?}", table.as_sql(), e);
                AppError::Database(e)
            })?;

        Ok(items.into_iter().map(Into::into).collect())
    }

    async fn list_active_contractors(&self) -> Result<Vec<Contractor>> {
        sqlx::query_as::<_, Contractor>(
            r#"
            SELECT id, name, is_archived
            FROM contractors
            WHERE is_archived = FALSE
            ORDER BY id
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to list contractors: {:?}", e);
            AppError::Database(e)
        })
    }
}
