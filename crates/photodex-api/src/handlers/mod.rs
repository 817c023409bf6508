pub mod image_create;
pub mod image_delete;
pub mod image_get;
pub mod image_update;
