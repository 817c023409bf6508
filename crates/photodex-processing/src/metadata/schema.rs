//! The metadata fields the catalogue understands, and their expected types.
//!
//! Extractors return loosely typed values. Each known key is checked against
//! its declared [`FieldKind`] exactly once; a mismatch becomes a
//! [`NormalizeError::FieldTypeMismatch`] naming the key.

use super::MetadataFields;
use crate::error::NormalizeError;
use serde_json::Value;
use std::fmt;

/// Expected JSON type of a known metadata field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// String value
    Text,
    /// Number, truncated towards zero
    Integer,
    /// Number, kept as is
    Float,
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldKind::Text => write!(f, "string"),
            FieldKind::Integer => write!(f, "integer"),
            FieldKind::Float => write!(f, "number"),
        }
    }
}

pub const CREATE_DATE: &str = "CreateDate";
pub const FILE_TYPE: &str = "FileType";
pub const IMAGE_WIDTH: &str = "ImageWidth";
pub const IMAGE_HEIGHT: &str = "ImageHeight";
pub const IMAGE_SIZE: &str = "ImageSize";
pub const MEGAPIXELS: &str = "Megapixels";
pub const FILE_SIZE: &str = "FileSize";

/// Every key the catalogue maps, with its expected type.
pub const KNOWN_FIELDS: &[(&str, FieldKind)] = &[
    (CREATE_DATE, FieldKind::Text),
    (FILE_TYPE, FieldKind::Text),
    (IMAGE_WIDTH, FieldKind::Integer),
    (IMAGE_HEIGHT, FieldKind::Integer),
    (IMAGE_SIZE, FieldKind::Text),
    (MEGAPIXELS, FieldKind::Float),
    (FILE_SIZE, FieldKind::Text),
];

/// Typed view of the known fields an extractor reported.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExtractedMetadata {
    pub create_date: Option<String>,
    pub file_type: Option<String>,
    pub width: Option<i32>,
    pub height: Option<i32>,
    pub image_size: Option<String>,
    pub megapixels: Option<f64>,
    pub file_size: Option<String>,
}

enum TypedValue {
    Text(String),
    Integer(i32),
    Float(f64),
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

fn check(key: &str, kind: FieldKind, value: &Value) -> Result<TypedValue, NormalizeError> {
    let typed = match (kind, value) {
        (FieldKind::Text, Value::String(s)) => Some(TypedValue::Text(s.clone())),
        (FieldKind::Integer, Value::Number(n)) => {
            n.as_f64().map(|f| TypedValue::Integer(f.trunc() as i32))
        }
        (FieldKind::Float, Value::Number(n)) => n.as_f64().map(TypedValue::Float),
        _ => None,
    };

    typed.ok_or_else(|| NormalizeError::FieldTypeMismatch {
        key: key.to_string(),
        expected: kind,
        found: json_type_name(value),
    })
}

impl ExtractedMetadata {
    /// Validate the known keys of `fields`. Unknown keys are ignored.
    pub fn from_fields(fields: &MetadataFields) -> Result<Self, NormalizeError> {
        let mut extracted = ExtractedMetadata::default();

        for (key, kind) in KNOWN_FIELDS {
            let Some(value) = fields.get(*key) else {
                continue;
            };

            match (*key, check(key, *kind, value)?) {
                (CREATE_DATE, TypedValue::Text(s)) => extracted.create_date = Some(s),
                (FILE_TYPE, TypedValue::Text(s)) => extracted.file_type = Some(s),
                (IMAGE_WIDTH, TypedValue::Integer(n)) => extracted.width = Some(n),
                (IMAGE_HEIGHT, TypedValue::Integer(n)) => extracted.height = Some(n),
                (IMAGE_SIZE, TypedValue::Text(s)) => extracted.image_size = Some(s),
                (MEGAPIXELS, TypedValue::Float(f)) => extracted.megapixels = Some(f),
                (FILE_SIZE, TypedValue::Text(s)) => extracted.file_size = Some(s),
                _ => {}
            }
        }

        Ok(extracted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn fields(value: Value) -> MetadataFields {
        match value {
            Value::Object(map) => map,
            _ => panic!("expected an object"),
        }
    }

    #[test]
    fn test_maps_all_known_fields() {
        let extracted = ExtractedMetadata::from_fields(&fields(json!({
            "SourceFile": "/photos/a.jpg",
            "CreateDate": "2023:04:05 10:00:00",
            "FileType": "JPEG",
            "ImageWidth": 640,
            "ImageHeight": 480,
            "ImageSize": "640x480",
            "Megapixels": 0.307,
            "FileSize": "12 kB"
        })))
        .unwrap();

        assert_eq!(extracted.create_date.as_deref(), Some("2023:04:05 10:00:00"));
        assert_eq!(extracted.file_type.as_deref(), Some("JPEG"));
        assert_eq!(extracted.width, Some(640));
        assert_eq!(extracted.height, Some(480));
        assert_eq!(extracted.image_size.as_deref(), Some("640x480"));
        assert_eq!(extracted.megapixels, Some(0.307));
        assert_eq!(extracted.file_size.as_deref(), Some("12 kB"));
    }

    #[test]
    fn test_dimensions_are_truncated_not_rounded() {
        let extracted = ExtractedMetadata::from_fields(&fields(json!({
            "ImageWidth": 640.9,
            "ImageHeight": 479.5
        })))
        .unwrap();
        assert_eq!(extracted.width, Some(640));
        assert_eq!(extracted.height, Some(479));
    }

    #[test]
    fn test_missing_and_unknown_keys() {
        let extracted = ExtractedMetadata::from_fields(&fields(json!({
            "Make": "Canon",
            "ExifToolVersion": 12.76
        })))
        .unwrap();
        assert_eq!(extracted, ExtractedMetadata::default());
    }

    #[test]
    fn test_string_where_number_expected() {
        let err = ExtractedMetadata::from_fields(&fields(json!({ "ImageWidth": "640" })))
            .unwrap_err();
        match err {
            NormalizeError::FieldTypeMismatch {
                key,
                expected,
                found,
            } => {
                assert_eq!(key, "ImageWidth");
                assert_eq!(expected, FieldKind::Integer);
                assert_eq!(found, "string");
            }
            other => panic!("Expected FieldTypeMismatch, got {other:?}"),
        }
    }

    #[test]
    fn test_number_where_string_expected() {
        let err =
            ExtractedMetadata::from_fields(&fields(json!({ "CreateDate": 20230405 }))).unwrap_err();
        assert!(err.to_string().contains("CreateDate"));
        assert!(err.to_string().contains("expected string, found number"));
    }

    #[test]
    fn test_null_is_a_mismatch() {
        let err = ExtractedMetadata::from_fields(&fields(json!({ "Megapixels": null }))).unwrap_err();
        assert!(matches!(
            err,
            NormalizeError::FieldTypeMismatch { found: "null", .. }
        ));
    }
}
