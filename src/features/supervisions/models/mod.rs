mod supervision;

pub use supervision::Supervision;
