pub mod supervision_handler;

pub use supervision_handler::{
    __path_create_supervision, __path_delete_supervision, __path_get_supervision,
    __path_list_supervisions, __path_take_in_ks, __path_update_supervision, create_supervision,
    delete_supervision, get_supervision, list_supervisions, take_in_ks, update_supervision,
};
