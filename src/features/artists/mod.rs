//! Inspectors (artists) performing technical supervision.
//!
//! Artists have no endpoints of their own: they are listed through
//! `GET /lists` and created on demand when a supervision names one.

pub mod models;
pub mod services;

pub use services::ArtistService;
