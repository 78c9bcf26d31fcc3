//! Technical supervision records.
//!
//! ## Endpoints
//!
//! | Method | Endpoint | Description |
//! |--------|----------|-------------|
//! | GET | `/supervisions` | Filtered, optionally sorted list of active records |
//! | GET | `/supervisions/{id}` | Single record, archived ones included |
//! | POST | `/supervisions` | Create a record |
//! | PUT | `/supervisions/{id}` | Partial update |
//! | DELETE | `/supervisions/{id}` | Archive (soft delete) |
//! | PUT | `/take_in_ks` | Bulk settlement status flip |
//!
//! Archived records never appear in listings or counts but stay addressable by id.

pub mod dtos;
pub mod filter;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod services;

pub use services::SupervisionService;
