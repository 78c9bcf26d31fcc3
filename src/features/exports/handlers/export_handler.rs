use std::sync::Arc;

use axum::{extract::State, http::header, response::IntoResponse};

use crate::core::error::Result;
use crate::core::extractor::AppQuery;
use crate::features::exports::dtos::{parse_ids, ExportQueryParams};
use crate::features::exports::services::ExportService;

const XLSX_CONTENT_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";
const DOWNLOAD_NAME: &str = "Выгрузка.xlsx";

/// `Content-Disposition` with an ASCII fallback and the RFC 5987 UTF-8 name
fn attachment_disposition(filename: &str) -> String {
    format!(
        "attachment; filename=\"export.xlsx\"; filename*=UTF-8''{}",
        urlencoding::encode(filename)
    )
}

/// Download supervisions as an xlsx spreadsheet
#[utoipa::path(
    get,
    path = "/api/excel_load",
    params(ExportQueryParams),
    responses(
        (status = 200, description = "Spreadsheet file", content_type = "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet", body = Vec<u8>),
        (status = 400, description = "Id list contains a value that is not an integer"),
        (status = 401, description = "Unauthorized")
    ),
    tag = "exports",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn excel_load(
    State(service): State<Arc<ExportService>>,
    AppQuery(params): AppQuery<ExportQueryParams>,
) -> Result<impl IntoResponse> {
    let ids = parse_ids(&params.supervision_ids)?;
    let bytes = service.export(&ids, params.load_type).await?;

    Ok((
        [
            (header::CONTENT_TYPE, XLSX_CONTENT_TYPE.to_string()),
            (
                header::CONTENT_DISPOSITION,
                attachment_disposition(DOWNLOAD_NAME),
            ),
        ],
        bytes,
    ))
}
