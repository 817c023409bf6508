//! Test helpers: build AppState and router for integration tests.
//!
//! Each test app gets a private in-memory SQLite database, a temporary
//! directory for image files and a scripted metadata extractor, so no
//! exiftool installation is needed.

pub mod fixtures;

use axum_test::TestServer;
use photodex_api::setup::routes;
use photodex_api::state::{AppState, DbState};
use photodex_core::Config;
use photodex_db::{ImageRepository, MIGRATOR};
use photodex_processing::test_helpers::FixedExtractor;
use photodex_processing::RecordNormalizer;
use sqlx::sqlite::SqlitePoolOptions;
use sqlx::SqlitePool;
use std::path::PathBuf;
use std::sync::Arc;
use tempfile::TempDir;

/// Test application: server, pool, extractor and owned resources.
pub struct TestApp {
    pub server: TestServer,
    pub pool: SqlitePool,
    pub extractor: Arc<FixedExtractor>,
    pub temp_dir: TempDir,
}

impl TestApp {
    pub fn client(&self) -> &TestServer {
        &self.server
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Absolute path of `name` inside the test directory.
    pub fn path(&self, name: &str) -> PathBuf {
        self.temp_dir.path().join(name)
    }

    pub async fn image_count(&self) -> i64 {
        sqlx::query_scalar("SELECT COUNT(*) FROM images")
            .fetch_one(self.pool())
            .await
            .expect("Failed to count images")
    }
}

/// Test app whose extractor reports [`fixtures::exif_fields`] for every file.
pub async fn setup_test_app() -> TestApp {
    setup_test_app_with(FixedExtractor::new(fixtures::exif_fields())).await
}

pub async fn setup_test_app_with(extractor: FixedExtractor) -> TestApp {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect("sqlite::memory:")
        .await
        .expect("Failed to open in-memory database");

    MIGRATOR
        .run(&pool)
        .await
        .expect("Failed to run migrations");

    let extractor = Arc::new(extractor);
    let state = Arc::new(AppState {
        db: DbState {
            image_repository: ImageRepository::new(pool.clone()),
        },
        normalizer: RecordNormalizer::new(extractor.clone()),
        is_production: false,
    });

    let config = Config::from_lookup(|_| None).expect("Failed to build test config");
    let app = routes::setup_routes(&config, state)
        .await
        .expect("Failed to setup routes");
    let server = TestServer::new(app).expect("Failed to create test server");

    TestApp {
        server,
        pool,
        extractor,
        temp_dir: tempfile::tempdir().expect("Failed to create temp directory"),
    }
}
