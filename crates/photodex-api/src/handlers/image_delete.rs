use crate::error::{ErrorResponse, HttpAppError, ValidatedPath};
use crate::state::AppState;
use axum::{extract::State, response::IntoResponse, Json};
use photodex_core::models::DeletedResponse;
use std::sync::Arc;

#[utoipa::path(
    delete,
    path = "/images/{id}",
    tag = "images",
    params(
        ("id" = i64, Path, description = "Image ID")
    ),
    responses(
        (status = 200, description = "Image deleted", body = DeletedResponse),
        (status = 400, description = "Record not found", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip(state), fields(image_id = id, operation = "delete_image"))]
pub async fn delete_image(
    ValidatedPath(id): ValidatedPath<i64>,
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, HttpAppError> {
    if !state.db.image_repository.delete_image(id).await? {
        return Err(HttpAppError::not_found());
    }

    tracing::info!(image_id = id, "Image deleted");
    Ok(Json(DeletedResponse { data: true }))
}
