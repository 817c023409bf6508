//! Capture timestamp parsing.
//!
//! Timestamps arrive in EXIF form, `YYYY:MM:DD HH:MM:SS`. Only the date part is
//! used. Parsing is lenient: a bad timestamp never fails a request, it yields
//! zeroed parts and a [`DateParseWarning`].

/// Calendar date derived from a capture timestamp.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DateParts {
    pub year: i32,
    pub month: i32,
    pub day: i32,
}

/// A timestamp that could not be split into year, month and day.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("capture timestamp {timestamp:?} is not in YYYY:MM:DD form: {reason}")]
pub struct DateParseWarning {
    pub timestamp: String,
    pub reason: String,
}

impl DateParseWarning {
    fn new(timestamp: &str, reason: impl Into<String>) -> Self {
        Self {
            timestamp: timestamp.to_string(),
            reason: reason.into(),
        }
    }
}

/// Split `timestamp` into its date parts.
pub fn parse_capture_date(timestamp: &str) -> Result<DateParts, DateParseWarning> {
    let date = timestamp.split(' ').next().unwrap_or_default();
    if date.is_empty() {
        return Err(DateParseWarning::new(timestamp, "timestamp is empty"));
    }

    let tokens: Vec<&str> = date.split(':').collect();
    let [year, month, day] = tokens.as_slice() else {
        return Err(DateParseWarning::new(
            timestamp,
            format!("expected 3 date components, found {}", tokens.len()),
        ));
    };

    let parse = |token: &str, name: &str| {
        token
            .parse::<i32>()
            .map_err(|_| DateParseWarning::new(timestamp, format!("{name} {token:?} is not a number")))
    };

    Ok(DateParts {
        year: parse(*year, "year")?,
        month: parse(*month, "month")?,
        day: parse(*day, "day")?,
    })
}

/// Like [`parse_capture_date`], but falls back to zeroed parts.
pub fn parse_capture_date_lenient(timestamp: &str) -> (DateParts, Option<DateParseWarning>) {
    match parse_capture_date(timestamp) {
        Ok(parts) => (parts, None),
        Err(warning) => (DateParts::default(), Some(warning)),
    }
}
