pub mod export_handler;

pub use export_handler::{__path_excel_load, excel_load};
