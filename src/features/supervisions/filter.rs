use chrono::{NaiveDate, NaiveDateTime};
use sqlx::{Postgres, QueryBuilder};

use crate::core::error::{AppError, Result};
use crate::features::supervisions::dtos::{SortDirection, SortKey, SupervisionQueryParams};
use crate::shared::datetime::{end_of_day, parse_date};

/// Time window a listing is restricted to
#[derive(Debug, Clone, PartialEq)]
pub enum Period {
    /// Inclusive on both ends, `date_start 00:00` to `date_end 23:59`
    Dates {
        from: NaiveDateTime,
        to: NaiveDateTime,
    },
    /// Half-open calendar month
    Month {
        from: NaiveDateTime,
        until: NaiveDateTime,
    },
}

/// Resolved listing filter, built before any database access
#[derive(Debug, Clone, PartialEq)]
pub struct SupervisionFilter {
    pub period: Period,
    pub contractor_id: Option<i32>,
    pub status_ks_id: Option<i32>,
    pub status_execution_id: Option<i32>,
    pub sort: Option<(SortKey, SortDirection)>,
}

fn month_bounds(year: i32, month: u32) -> Result<Period> {
    let invalid = || AppError::Validation(format!("Invalid period {}-{:02}", year, month));

    let first = NaiveDate::from_ymd_opt(year, month, 1).ok_or_else(invalid)?;
    let next = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)
    }
    .ok_or_else(invalid)?;

    Ok(Period::Month {
        from: first.and_time(chrono::NaiveTime::MIN),
        until: next.and_time(chrono::NaiveTime::MIN),
    })
}

impl TryFrom<&SupervisionQueryParams> for SupervisionFilter {
    type Error = AppError;

    fn try_from(params: &SupervisionQueryParams) -> Result<Self> {
        // A date range wins over year + month when both are sent
        let period = match (
            params.date_start.as_deref(),
            params.date_end.as_deref(),
            params.year,
            params.month,
        ) {
            (Some(start), Some(end), _, _) => {
                let start = parse_date("date_start", start)?;
                let end = parse_date("date_end", end)?;
                if start > end {
                    return Err(AppError::Validation(
                        "date_start must not be after date_end".to_string(),
                    ));
                }
                Period::Dates {
                    from: start.and_time(chrono::NaiveTime::MIN),
                    to: end_of_day(end),
                }
            }
            (_, _, Some(year), Some(month)) => month_bounds(year, month)?,
            _ => {
                return Err(AppError::Validation(
                    "Missing parameters: provide date_start and date_end or year and month"
                        .to_string(),
                ))
            }
        };

        let sort = params
            .sort_key
            .map(|key| (key, params.sort_by.unwrap_or_default()));

        Ok(Self {
            period,
            contractor_id: params.contractor_id,
            status_ks_id: params.status_ks_id,
            status_execution_id: params.status_execution_id,
            sort,
        })
    }
}

impl SupervisionFilter {
    /// Append the WHERE and ORDER BY clauses to a query selecting from `supervisions s`
    pub fn apply(&self, qb: &mut QueryBuilder<'_, Postgres>) {
        qb.push(" WHERE s.is_archived = FALSE");

        match self.period {
            Period::Dates { from, to } => {
                qb.push(" AND s.datetime_start BETWEEN ");
                qb.push_bind(from);
                qb.push(" AND ");
                qb.push_bind(to);
            }
            Period::Month { from, until } => {
                qb.push(" AND s.datetime_start >= ");
                qb.push_bind(from);
                qb.push(" AND s.datetime_start < ");
                qb.push_bind(until);
            }
        }

        for (column, value) in [
            ("s.contractor_id", self.contractor_id),
            ("s.status_ks_id", self.status_ks_id),
            ("s.status_execution_id", self.status_execution_id),
        ] {
            if let Some(value) = value {
                qb.push(format!(" AND {} = ", column));
                qb.push_bind(value);
            }
        }

        match self.sort {
            Some((key, direction)) => {
                qb.push(format!(" ORDER BY {} {}", key.as_sql(), direction.as_sql()));
            }
            None => {
                qb.push(" ORDER BY s.id");
            }
        }
    }
}
