//! Domain route groups.

use crate::handlers;
use crate::state::AppState;
use axum::routing::get;
use axum::Router;
use std::sync::Arc;

pub fn image_routes(state: Arc<AppState>) -> Router<Arc<AppState>> {
    Router::new()
        .route(
            "/images",
            get(handlers::image_get::list_images).post(handlers::image_create::create_image),
        )
        .route(
            "/images/{id}",
            get(handlers::image_get::get_image)
                .patch(handlers::image_update::update_image)
                .delete(handlers::image_delete::delete_image),
        )
        .with_state(state)
}
