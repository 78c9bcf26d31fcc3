pub mod auth_handler;

pub use auth_handler::{__path_check, __path_login, __path_logout, check, login, logout};
