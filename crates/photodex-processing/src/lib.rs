//! Image file inspection for the catalogue
//!
//! Validates that a path names a readable image, extracts its embedded
//! metadata through a pluggable [`MetadataExtractor`], and produces the
//! normalized field set stored for each image.

pub mod date;
pub mod error;
pub mod metadata;
pub mod normalizer;
pub mod sniff;

#[cfg(any(test, feature = "test-helpers"))]
pub mod test_helpers;

pub use date::{parse_capture_date, parse_capture_date_lenient, DateParseWarning, DateParts};
pub use error::NormalizeError;
pub use metadata::{ExifToolExtractor, ExtractorError, MetadataExtractor, MetadataFields};
#[cfg(feature = "native")]
pub use metadata::NativeExtractor;
pub use normalizer::{NormalizedImage, RecordNormalizer};
