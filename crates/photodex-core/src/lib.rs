//! Photodex Core Library
//!
//! Domain model, error types and configuration shared by every Photodex crate.

pub mod config;
pub mod error;
pub mod models;

// Re-export commonly used types
pub use config::{Config, ExtractorBackend};
pub use error::{AppError, ErrorMetadata, LogLevel};
