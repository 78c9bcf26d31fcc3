use chrono::{NaiveDate, NaiveTime};
use sqlx::PgPool;
use std::collections::BTreeMap;

use crate::core::error::{AppError, Result};
use crate::features::statistics::dtos::{CountInfoResponseDto, CountsDto};
use crate::features::statistics::models::MonthCount;
use crate::shared::constants::{STATUS_EXECUTION_COMPLETED, STATUS_KS_TAKEN_IN};

/// Fold per-month rows into yearly totals and a twelve month breakdown
pub fn assemble(rows: &[MonthCount]) -> CountInfoResponseDto {
    let mut count_months: BTreeMap<String, CountsDto> = (1..=12)
        .map(|month| (format!("{:02}", month), CountsDto::default()))
        .collect();

    let mut total = CountsDto::default();
    for row in rows {
        total.all_count += row.all_count;
        total.completed += row.completed;
        total.take_in_ks += row.take_in_ks;
        count_months.insert(format!("{:02}", row.month), row.into());
    }

    CountInfoResponseDto {
        all_count: total.all_count,
        completed: total.completed,
        take_in_ks: total.take_in_ks,
        count_months,
    }
}

/// Service for aggregate supervision counts
pub struct StatisticsService {
    pool: PgPool,
}

impl StatisticsService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Counts of active supervisions starting in `year`
    pub async fn count_info(&self, year: i32) -> Result<CountInfoResponseDto> {
        let invalid = || AppError::Validation(format!("Invalid year {}", year));
        let from = NaiveDate::from_ymd_opt(year, 1, 1)
            .ok_or_else(invalid)?
            .and_time(NaiveTime::MIN);
        let until = NaiveDate::from_ymd_opt(year + 1, 1, 1)
            .ok_or_else(invalid)?
            .and_time(NaiveTime::MIN);

        let rows = sqlx::query_as::<_, MonthCount>(
            r#"
            SELECT EXTRACT(MONTH FROM s.datetime_start)::INT4 AS month,
                   COUNT(*) AS all_count,
                   COUNT(*) FILTER (WHERE s.status_execution_id = $3) AS completed,
                   COUNT(*) FILTER (WHERE s.status_ks_id = $4) AS take_in_ks
            FROM supervisions s
            WHERE s.is_archived = FALSE
              AND s.datetime_start >= $1
              AND s.datetime_start < $2
            GROUP BY 1
            ORDER BY 1
            "#,
        )
        .bind(from)
        .bind(until)
        .bind(STATUS_EXECUTION_COMPLETED)
        .bind(STATUS_KS_TAKEN_IN)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to count supervisions for {}: {:?}", year, e);
            AppError::Database(e)
        })?;

        Ok(assemble(&rows))
    }
}
