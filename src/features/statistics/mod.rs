//! Yearly and monthly supervision counts (`GET /supervisions_count_info`).

pub mod dtos;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod services;

pub use services::StatisticsService;
