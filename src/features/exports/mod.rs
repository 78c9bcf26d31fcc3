//! Spreadsheet export of supervision records (`GET /excel_load`).
//!
//! Two layouts exist: `inside` adds the responsible department column that the
//! `outside` layout leaves out.

pub mod dtos;
pub mod handlers;
pub mod routes;
pub mod services;
pub mod xlsx;

pub use services::ExportService;
