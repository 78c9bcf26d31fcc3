pub mod lookup_handler;

pub use lookup_handler::{__path_get_lists, get_lists};
