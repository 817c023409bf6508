//! OpenAPI documentation, served at `/api/openapi.json` and rendered at `/docs`.

use utoipa::OpenApi;

use crate::error;
use crate::handlers;
use photodex_core::models;

/// Returns the OpenAPI spec for the catalogue.
pub fn get_openapi_spec() -> utoipa::openapi::OpenApi {
    ApiDoc::openapi()
}

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Photodex API",
        version = "0.1.0",
        description = "Image catalogue. Register image files by path; name, type, dimensions, sizes and capture date are read from the file itself."
    ),
    paths(
        handlers::image_get::list_images,
        handlers::image_get::get_image,
        handlers::image_create::create_image,
        handlers::image_update::update_image,
        handlers::image_delete::delete_image,
    ),
    components(
        schemas(
            models::Image,
            models::CreateImageInput,
            models::UpdateImageInput,
            models::ImageResponse,
            models::ImageListResponse,
            models::DeletedResponse,
            error::ErrorResponse,
        )
    ),
    tags(
        (name = "images", description = "Catalogued image records")
    )
)]
pub struct ApiDoc;
