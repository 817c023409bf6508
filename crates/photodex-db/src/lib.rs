//! Persistence for the image catalogue

pub mod db;

pub use db::ImageRepository;

/// Embedded schema migrations from the workspace `migrations/` directory.
pub static MIGRATOR: sqlx::migrate::Migrator = sqlx::migrate!("../../migrations");
