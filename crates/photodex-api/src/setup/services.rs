//! Service initialization and application state setup

use crate::state::{AppState, DbState};
use anyhow::Result;
use photodex_core::{Config, ExtractorBackend};
use photodex_db::ImageRepository;
use photodex_processing::{ExifToolExtractor, MetadataExtractor, RecordNormalizer};
use sqlx::SqlitePool;
use std::sync::Arc;
use std::time::Duration;

/// Build the configured metadata extractor
pub fn build_extractor(config: &Config) -> Result<Arc<dyn MetadataExtractor>> {
    let timeout = Duration::from_secs(config.extractor_timeout_secs());

    match config.metadata_extractor() {
        ExtractorBackend::ExifTool => {
            let extractor = ExifToolExtractor::new(config.exiftool_path(), timeout);
            tracing::info!(
                binary = %extractor.binary_path(),
                timeout_secs = timeout.as_secs(),
                "Using exiftool metadata extractor"
            );
            Ok(Arc::new(extractor))
        }
        #[cfg(feature = "native-extractor")]
        ExtractorBackend::Native => {
            tracing::info!(timeout_secs = timeout.as_secs(), "Using native metadata extractor");
            Ok(Arc::new(photodex_processing::NativeExtractor::new(timeout)))
        }
        #[cfg(not(feature = "native-extractor"))]
        ExtractorBackend::Native => Err(anyhow::anyhow!(
            "METADATA_EXTRACTOR=native requires the native-extractor feature"
        )),
    }
}

/// Initialize repositories and the normalizer, returning the application state
pub async fn initialize_services(config: &Config, pool: SqlitePool) -> Result<Arc<AppState>> {
    let extractor = build_extractor(config)?;

    let state = AppState {
        db: DbState {
            image_repository: ImageRepository::new(pool),
        },
        normalizer: RecordNormalizer::new(extractor),
        is_production: config.is_production(),
    };

    tracing::info!("Services initialized");
    Ok(Arc::new(state))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(extractor: &str) -> Config {
        Config::from_lookup(|key| match key {
            "METADATA_EXTRACTOR" => Some(extractor.to_string()),
            "EXIFTOOL_PATH" => Some("/opt/exiftool/exiftool".to_string()),
            _ => None,
        })
        .unwrap()
    }

    #[test]
    fn test_builds_exiftool_extractor() {
        let extractor = build_extractor(&config("exiftool")).unwrap();
        assert_eq!(extractor.name(), "exiftool");
    }

    #[cfg(feature = "native-extractor")]
    #[test]
    fn test_builds_native_extractor() {
        let extractor = build_extractor(&config("native")).unwrap();
        assert_eq!(extractor.name(), "native");
    }
}
