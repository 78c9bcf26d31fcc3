use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::features::statistics::models::MonthCount;

#[derive(Debug, Clone, Deserialize, Validate, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct CountInfoQueryParams {
    #[validate(range(min = 1, max = 9998, message = "year must be between 1 and 9998"))]
    pub year: i32,
}

/// Total, completed and settled counts
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct CountsDto {
    pub all_count: i64,
    /// Supervisions with the completed execution status
    pub completed: i64,
    /// Supervisions taken into settlement
    pub take_in_ks: i64,
}

impl From<&MonthCount> for CountsDto {
    fn from(row: &MonthCount) -> Self {
        Self {
            all_count: row.all_count,
            completed: row.completed,
            take_in_ks: row.take_in_ks,
        }
    }
}

/// Counts for a year, with a breakdown keyed `"01"` to `"12"`
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CountInfoResponseDto {
    pub all_count: i64,
    pub completed: i64,
    pub take_in_ks: i64,
    pub count_months: BTreeMap<String, CountsDto>,
}
