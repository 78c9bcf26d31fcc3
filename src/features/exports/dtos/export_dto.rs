use serde::Deserialize;
use utoipa::{IntoParams, ToSchema};

use crate::core::error::{AppError, Result};

/// Spreadsheet layout variant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum LoadType {
    /// Internal layout with the responsible department column
    Inside,
    /// Layout handed to outside parties
    Outside,
}

/// Query params for the export download
#[derive(Debug, Clone, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ExportQueryParams {
    /// Comma separated supervision ids, e.g. `1,2,3`
    pub supervision_ids: String,
    pub load_type: LoadType,
}

/// Split a comma separated id list, naming the first token that is not an integer
pub fn parse_ids(raw: &str) -> Result<Vec<i32>> {
    raw.split(',')
        .map(str::trim)
        .map(|token| {
            token.parse::<i32>().map_err(|_| {
                AppError::BadRequest(format!("Cannot convert string '{}' to number", token))
            })
        })
        .collect()
}
