mod supervision_dto;

pub use supervision_dto::*;
