//! Content type sniffing from a file's leading bytes.

/// How many leading bytes are inspected.
pub const SNIFF_LEN: usize = 8192;

/// Detect the MIME type of `header`, if it is recognised at all.
pub fn sniff_mime(header: &[u8]) -> Option<&'static str> {
    infer::get(header).map(|kind| kind.mime_type())
}

/// Top-level category of a MIME type (`image` for `image/png`).
pub fn top_level_type(mime: &str) -> &str {
    mime.split('/').next().unwrap_or_default()
}

/// Whether `header` looks like an image.
pub fn is_image(header: &[u8]) -> bool {
    sniff_mime(header).is_some_and(|mime| top_level_type(mime) == "image")
}
