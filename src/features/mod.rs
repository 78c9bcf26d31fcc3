pub mod artists;
pub mod auth;
pub mod exports;
pub mod lookups;
pub mod statistics;
pub mod supervisions;
