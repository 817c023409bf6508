//! In-process metadata extraction.
//!
//! Reads the image header with the `image` crate and the EXIF block with
//! `kamadak-exif`, and reports the result under exiftool's tag names and value
//! types so both backends are interchangeable.

use super::schema::{CREATE_DATE, FILE_SIZE, FILE_TYPE, IMAGE_HEIGHT, IMAGE_SIZE, IMAGE_WIDTH, MEGAPIXELS};
use super::{ExtractorError, MetadataExtractor, MetadataFields};
use async_trait::async_trait;
use image::{ImageFormat, ImageReader};
use serde_json::{Number, Value};
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::debug;

const NAME: &str = "native";

pub struct NativeExtractor {
    timeout: Duration,
}

impl NativeExtractor {
    pub fn new(timeout: Duration) -> Self {
        Self { timeout }
    }
}

/// exiftool's `FileType` label for a decoded format.
fn file_type_label(format: ImageFormat) -> String {
    match format {
        ImageFormat::Jpeg => "JPEG".to_string(),
        ImageFormat::Png => "PNG".to_string(),
        ImageFormat::Gif => "GIF".to_string(),
        ImageFormat::WebP => "WEBP".to_string(),
        ImageFormat::Tiff => "TIFF".to_string(),
        ImageFormat::Bmp => "BMP".to_string(),
        ImageFormat::Ico => "ICO".to_string(),
        ImageFormat::Avif => "AVIF".to_string(),
        other => format!("{:?}", other).to_uppercase(),
    }
}

/// Human-readable size using exiftool's decimal units.
pub fn format_file_size(bytes: u64) -> String {
    let b = bytes as f64;
    match bytes {
        0..=1_999 => format!("{} bytes", bytes),
        2_000..=9_999 => format!("{:.1} kB", b / 1e3),
        10_000..=1_999_999 => format!("{:.0} kB", b / 1e3),
        2_000_000..=9_999_999 => format!("{:.1} MB", b / 1e6),
        10_000_000..=1_999_999_999 => format!("{:.0} MB", b / 1e6),
        2_000_000_000..=9_999_999_999 => format!("{:.1} GB", b / 1e9),
        _ => format!("{:.0} GB", b / 1e9),
    }
}

/// Megapixel count at exiftool's display precision.
pub fn megapixels(width: u32, height: u32) -> f64 {
    let mp = f64::from(width) * f64::from(height) / 1e6;
    let decimals = if mp >= 1.0 {
        1
    } else if mp >= 0.001 {
        3
    } else {
        6
    };
    format!("{:.*}", decimals, mp).parse().unwrap_or(mp)
}

/// EXIF `CreateDate` (DateTimeDigitized), falling back to DateTimeOriginal.
fn read_create_date(path: &Path) -> Option<String> {
    let file = File::open(path).ok()?;
    let exif = match exif::Reader::new().read_from_container(&mut BufReader::new(file)) {
        Ok(exif) => exif,
        Err(e) => {
            debug!(error = %e, "No EXIF data");
            return None;
        }
    };

    [exif::Tag::DateTimeDigitized, exif::Tag::DateTimeOriginal]
        .into_iter()
        .find_map(|tag| {
            let field = exif.get_field(tag, exif::In::PRIMARY)?;
            match field.value {
                exif::Value::Ascii(ref parts) => parts
                    .first()
                    .map(|raw| String::from_utf8_lossy(raw).trim().to_string())
                    .filter(|s| !s.is_empty()),
                _ => None,
            }
        })
}

fn file_error(reason: impl ToString) -> ExtractorError {
    ExtractorError::File {
        extractor: NAME,
        reason: reason.to_string(),
    }
}

fn read_fields(path: &Path) -> Result<MetadataFields, ExtractorError> {
    let byte_len = std::fs::metadata(path).map_err(file_error)?.len();

    let reader = ImageReader::open(path)
        .map_err(file_error)?
        .with_guessed_format()
        .map_err(file_error)?;
    let format = reader
        .format()
        .ok_or_else(|| file_error("unsupported image format"))?;
    let (width, height) = reader.into_dimensions().map_err(file_error)?;

    let mut fields = MetadataFields::new();
    fields.insert(
        "SourceFile".to_string(),
        Value::String(path.display().to_string()),
    );
    fields.insert(FILE_TYPE.to_string(), Value::String(file_type_label(format)));
    fields.insert(IMAGE_WIDTH.to_string(), Value::from(width));
    fields.insert(IMAGE_HEIGHT.to_string(), Value::from(height));
    fields.insert(
        IMAGE_SIZE.to_string(),
        Value::String(format!("{}x{}", width, height)),
    );
    if let Some(mp) = Number::from_f64(megapixels(width, height)) {
        fields.insert(MEGAPIXELS.to_string(), Value::Number(mp));
    }
    fields.insert(FILE_SIZE.to_string(), Value::String(format_file_size(byte_len)));
    if let Some(date) = read_create_date(path) {
        fields.insert(CREATE_DATE.to_string(), Value::String(date));
    }

    Ok(fields)
}

#[async_trait]
impl MetadataExtractor for NativeExtractor {
    fn name(&self) -> &'static str {
        NAME
    }

    #[tracing::instrument(skip(self), fields(extractor = NAME))]
    async fn extract(&self, path: &Path) -> Result<MetadataFields, ExtractorError> {
        let owned: PathBuf = path.to_path_buf();
        let task = tokio::task::spawn_blocking(move || read_fields(&owned));

        match tokio::time::timeout(self.timeout, task).await {
            Ok(Ok(result)) => result,
            Ok(Err(join_err)) => Err(ExtractorError::Unavailable {
                extractor: NAME,
                reason: join_err.to_string(),
            }),
            Err(_) => Err(ExtractorError::Timeout {
                extractor: NAME,
                timeout: self.timeout,
            }),
        }
    }
}
