use crate::error::{ErrorResponse, HttpAppError, ValidatedJson, ValidatedPath};
use crate::state::AppState;
use axum::{extract::State, response::IntoResponse, Json};
use photodex_core::models::{ImageFields, ImageResponse, UpdateImageInput};
use std::sync::Arc;

/// Replace an image record.
///
/// Every field is overwritten; fields missing from the body are reset to
/// zero, empty or null. The file is not re-read.
#[utoipa::path(
    patch,
    path = "/images/{id}",
    tag = "images",
    params(
        ("id" = i64, Path, description = "Image ID")
    ),
    request_body = UpdateImageInput,
    responses(
        (status = 200, description = "Image updated", body = ImageResponse),
        (status = 400, description = "Record not found or invalid body", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip(state, input), fields(image_id = id, operation = "update_image"))]
pub async fn update_image(
    ValidatedPath(id): ValidatedPath<i64>,
    State(state): State<Arc<AppState>>,
    ValidatedJson(input): ValidatedJson<UpdateImageInput>,
) -> Result<impl IntoResponse, HttpAppError> {
    let fields = ImageFields::from(input);
    let image = state
        .db
        .image_repository
        .update_image(id, &fields)
        .await?
        .ok_or_else(HttpAppError::not_found)?;

    tracing::info!(image_id = image.id, "Image updated");
    Ok(Json(ImageResponse::from(image)))
}
