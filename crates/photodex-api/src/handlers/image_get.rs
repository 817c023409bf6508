use crate::error::{ErrorResponse, HttpAppError, ValidatedPath};
use crate::state::AppState;
use axum::{extract::State, response::IntoResponse, Json};
use photodex_core::models::{ImageListResponse, ImageResponse};
use std::sync::Arc;

#[utoipa::path(
    get,
    path = "/images",
    tag = "images",
    responses(
        (status = 200, description = "All catalogued images, ordered by id", body = ImageListResponse),
        (status = 400, description = "Storage error", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip(state), fields(operation = "list_images"))]
pub async fn list_images(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, HttpAppError> {
    let images = state.db.image_repository.list_images().await?;

    tracing::debug!(count = images.len(), "Listed images");
    Ok(Json(ImageListResponse::from(images)))
}

#[utoipa::path(
    get,
    path = "/images/{id}",
    tag = "images",
    params(
        ("id" = i64, Path, description = "Image ID")
    ),
    responses(
        (status = 200, description = "Image found", body = ImageResponse),
        (status = 400, description = "Record not found", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip(state), fields(image_id = id, operation = "get_image"))]
pub async fn get_image(
    ValidatedPath(id): ValidatedPath<i64>,
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, HttpAppError> {
    let image = state
        .db
        .image_repository
        .get_image(id)
        .await?
        .ok_or_else(HttpAppError::not_found)?;

    Ok(Json(ImageResponse::from(image)))
}
