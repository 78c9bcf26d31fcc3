use std::sync::Arc;

use crate::core::error::Result;
use crate::features::exports::dtos::LoadType;
use crate::features::exports::xlsx;
use crate::features::supervisions::SupervisionService;

/// Service building spreadsheet exports
pub struct ExportService {
    supervisions: Arc<SupervisionService>,
}

impl ExportService {
    pub fn new(supervisions: Arc<SupervisionService>) -> Self {
        Self { supervisions }
    }

    /// Build a workbook of the requested supervisions.
    ///
    /// Rows follow the order the store returns them in, unknown ids are skipped.
    pub async fn export(&self, ids: &[i32], layout: LoadType) -> Result<Vec<u8>> {
        let supervisions = self.supervisions.find_by_ids(ids).await?;

        if supervisions.len() < ids.len() {
            tracing::warn!(
                "Export requested {} supervisions, found {}",
                ids.len(),
                supervisions.len()
            );
        }

        let bytes = xlsx::build_workbook(&supervisions, layout)?;

        tracing::info!(
            "Exported {} supervisions ({:?} layout, {} bytes)",
            supervisions.len(),
            layout,
            bytes.len()
        );

        Ok(bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::artists::ArtistService;
    use sqlx::PgPool;

    #[sqlx::test(migrations = "./migrations")]
    #[ignore = "requires DATABASE_URL pointing at a PostgreSQL server"]
    async fn test_export_of_unknown_ids_is_an_empty_sheet(pool: PgPool) {
        let artists = Arc::new(ArtistService::new(pool.clone()));
        let supervisions = Arc::new(SupervisionService::new(pool, artists));
        let service = ExportService::new(supervisions);

        let bytes = service.export(&[41, 42], LoadType::Inside).await.unwrap();
        assert!(bytes.starts_with(b"PK"));
    }
}
