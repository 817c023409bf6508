use crate::metadata::schema::FieldKind;

/// Why a create request could not be turned into an image record.
///
/// Every variant ends the current request; nothing is retried.
#[derive(Debug, thiserror::Error)]
pub enum NormalizeError {
    #[error("error opening file {path}: {source}")]
    FileAccess {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("not an image file: {path} (detected {})", .detected.as_deref().unwrap_or("unknown type"))]
    NotAnImage {
        path: String,
        detected: Option<String>,
    },

    #[error("error extracting metadata for file {path}: {reason}")]
    MetadataExtraction { path: String, reason: String },

    #[error("metadata field {key} has unexpected type: expected {expected}, found {found}")]
    FieldTypeMismatch {
        key: String,
        expected: FieldKind,
        found: &'static str,
    },
}
