//! Metadata extraction
//!
//! An extractor turns a file path into a flat map of metadata field names to
//! JSON values, using exiftool's tag names (`CreateDate`, `ImageWidth`, ...).
//! Which fields the catalogue keeps, and with which types, is decided by
//! [`schema`], not by the extractors.

pub mod exiftool;
#[cfg(feature = "native")]
pub mod native;
pub mod schema;

use async_trait::async_trait;
use std::path::Path;
use std::time::Duration;

pub use exiftool::ExifToolExtractor;
#[cfg(feature = "native")]
pub use native::NativeExtractor;
pub use schema::{ExtractedMetadata, FieldKind};

/// Field name to value, as reported by an extractor.
pub type MetadataFields = serde_json::Map<String, serde_json::Value>;

#[derive(Debug, thiserror::Error)]
pub enum ExtractorError {
    /// The extractor could not be started at all.
    #[error("failed to start {extractor}: {reason}")]
    Unavailable {
        extractor: &'static str,
        reason: String,
    },

    /// The extractor ran but reported a problem with this file.
    #[error("{extractor} failed: {reason}")]
    File {
        extractor: &'static str,
        reason: String,
    },

    #[error("{extractor} did not finish within {}s", .timeout.as_secs())]
    Timeout {
        extractor: &'static str,
        timeout: Duration,
    },
}

/// Reads embedded metadata from a file on disk.
#[async_trait]
pub trait MetadataExtractor: Send + Sync {
    /// Short backend name for logs.
    fn name(&self) -> &'static str;

    /// Extract all metadata fields of the file at `path`.
    async fn extract(&self, path: &Path) -> Result<MetadataFields, ExtractorError>;
}
