pub mod image;
pub mod response;

pub use image::{CreateImageInput, Image, ImageFields, UpdateImageInput};
pub use response::{DeletedResponse, ImageListResponse, ImageResponse};
