//! Reference tables backing the dropdowns of the client (`GET /lists`).

pub mod dtos;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod services;

pub use services::LookupService;
