//! Login gate: credential check, access token issuance and validation.
//!
//! Tokens are stateless HS256 JWTs delivered both in the response body and
//! as a cookie; logout only expires the cookie on the client.

pub mod cookie;
pub mod dtos;
pub mod handlers;
pub mod model;
pub mod routes;
pub mod services;

pub use services::TokenService;
