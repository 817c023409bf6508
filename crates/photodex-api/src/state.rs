//! Shared application state handed to every handler.

use photodex_db::ImageRepository;
use photodex_processing::RecordNormalizer;

/// Database handles
#[derive(Clone)]
pub struct DbState {
    pub image_repository: ImageRepository,
}

/// Immutable after startup; shared as `Arc<AppState>`.
#[derive(Clone)]
pub struct AppState {
    pub db: DbState,
    pub normalizer: RecordNormalizer,
    pub is_production: bool,
}
