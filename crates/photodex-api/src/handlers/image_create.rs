use crate::error::{ErrorResponse, HttpAppError, ValidatedJson};
use crate::state::AppState;
use axum::{extract::State, response::IntoResponse, Json};
use photodex_core::models::{CreateImageInput, ImageResponse};
use std::sync::Arc;
use validator::Validate;

/// Catalogue an image file.
///
/// The file at `imagedirlocation` must exist and be an image. Its name, type,
/// dimensions, sizes and capture date are read from the file and take
/// precedence over the request body.
#[utoipa::path(
    post,
    path = "/images",
    tag = "images",
    request_body = CreateImageInput,
    responses(
        (status = 200, description = "Image catalogued", body = ImageResponse),
        (status = 400, description = "Invalid request, unreadable file, or duplicate file name", body = ErrorResponse)
    )
)]
#[tracing::instrument(
    skip(state, input),
    fields(path = %input.dir_location, operation = "create_image")
)]
pub async fn create_image(
    State(state): State<Arc<AppState>>,
    ValidatedJson(input): ValidatedJson<CreateImageInput>,
) -> Result<impl IntoResponse, HttpAppError> {
    input.validate()?;

    let normalized = state.normalizer.normalize(input).await?;
    let image = state
        .db
        .image_repository
        .create_image(&normalized.fields)
        .await?;

    tracing::info!(
        image_id = image.id,
        file_name = %image.file_name,
        date_parsed = normalized.date_warning.is_none(),
        "Image created"
    );

    Ok(Json(ImageResponse::from(image)))
}
