pub mod statistics_handler;

pub use statistics_handler::{__path_supervisions_count_info, supervisions_count_info};
