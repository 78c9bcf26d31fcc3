mod supervision_service;

pub use supervision_service::SupervisionService;
