//! Record normalizer
//!
//! Turns a create request into a complete set of image fields: the file name
//! comes from the path, format, dimensions, sizes and capture date come from
//! the metadata extractor, and latitude/longitude are kept as supplied.

use crate::date::{parse_capture_date_lenient, DateParseWarning};
use crate::error::NormalizeError;
use crate::metadata::{ExtractedMetadata, MetadataExtractor};
use crate::sniff::{self, SNIFF_LEN};
use photodex_core::models::{CreateImageInput, ImageFields};
use std::io;
use std::sync::Arc;
use tokio::fs::File;
use tokio::io::AsyncReadExt;
use tracing::{debug, warn};

/// Normalizer output. A date warning never fails the request.
#[derive(Debug, Clone)]
pub struct NormalizedImage {
    pub fields: ImageFields,
    pub date_warning: Option<DateParseWarning>,
}

#[derive(Clone)]
pub struct RecordNormalizer {
    extractor: Arc<dyn MetadataExtractor>,
}

/// Final path segment. Both `/` and `\` count as separators.
pub fn display_name(path: &str) -> &str {
    path.rsplit(|c| c == '/' || c == '\\')
        .next()
        .unwrap_or(path)
}

async fn read_header(path: &str) -> Result<Vec<u8>, NormalizeError> {
    let access = |source: io::Error| NormalizeError::FileAccess {
        path: path.to_string(),
        source,
    };

    let file = File::open(path).await.map_err(access)?;
    let meta = file.metadata().await.map_err(access)?;
    if !meta.is_file() {
        return Err(access(io::Error::new(
            io::ErrorKind::InvalidInput,
            "not a regular file",
        )));
    }

    let mut header = Vec::with_capacity(SNIFF_LEN);
    file.take(SNIFF_LEN as u64)
        .read_to_end(&mut header)
        .await
        .map_err(access)?;
    Ok(header)
}

fn overlay(fields: &mut ImageFields, extracted: ExtractedMetadata) {
    if let Some(date) = extracted.create_date {
        fields.date_time = date;
    }
    if let Some(file_type) = extracted.file_type {
        fields.image_type = file_type;
    }
    if let Some(width) = extracted.width {
        fields.width = width;
    }
    if let Some(height) = extracted.height {
        fields.height = height;
    }
    if let Some(size) = extracted.image_size {
        fields.size = size;
    }
    if extracted.megapixels.is_some() {
        fields.megapixels = extracted.megapixels;
    }
    if extracted.file_size.is_some() {
        fields.file_size = extracted.file_size;
    }
}

impl RecordNormalizer {
    pub fn new(extractor: Arc<dyn MetadataExtractor>) -> Self {
        Self { extractor }
    }

    pub fn extractor_name(&self) -> &'static str {
        self.extractor.name()
    }

    #[tracing::instrument(
        skip(self, input),
        fields(path = %input.dir_location, extractor = self.extractor.name())
    )]
    pub async fn normalize(
        &self,
        input: CreateImageInput,
    ) -> Result<NormalizedImage, NormalizeError> {
        let path = input.dir_location.clone();
        let mut fields = ImageFields::from(input);
        fields.file_name = display_name(&path).to_string();

        let header = read_header(&path).await?;
        if !sniff::is_image(&header) {
            let detected = sniff::sniff_mime(&header).map(str::to_string);
            warn!(detected = ?detected, "Rejected file that is not an image");
            return Err(NormalizeError::NotAnImage { path, detected });
        }

        let canonical = tokio::fs::canonicalize(&path)
            .await
            .map_err(|source| NormalizeError::FileAccess {
                path: path.clone(),
                source,
            })?;

        let raw = self.extractor.extract(&canonical).await.map_err(|e| {
            NormalizeError::MetadataExtraction {
                path: path.clone(),
                reason: e.to_string(),
            }
        })?;
        debug!(field_count = raw.len(), "Metadata extracted");

        overlay(&mut fields, ExtractedMetadata::from_fields(&raw)?);

        let (parts, date_warning) = parse_capture_date_lenient(&fields.date_time);
        if let Some(ref warning) = date_warning {
            warn!(%warning, "Capture date not parseable, using 0 for year/month/day");
        }
        fields.year = parts.year;
        fields.month = parts.month;
        fields.day = parts.day;

        Ok(NormalizedImage {
            fields,
            date_warning,
        })
    }
}
