use image::{ImageBuffer, ImageFormat, Rgb};
use serde_json::{json, Value};
use std::path::{Path, PathBuf};

/// What exiftool reports for a 640x480 JPEG taken on 2023-04-05.
pub fn exif_fields() -> Value {
    json!({
        "SourceFile": "/ignored",
        "ExifToolVersion": 12.76,
        "CreateDate": "2023:04:05 10:00:00",
        "FileType": "JPEG",
        "ImageWidth": 640,
        "ImageHeight": 480,
        "ImageSize": "640x480",
        "Megapixels": 0.307,
        "FileSize": "12 kB"
    })
}

/// Write a small real PNG and return its path.
pub fn write_png(path: &Path) -> PathBuf {
    let img: ImageBuffer<Rgb<u8>, Vec<u8>> = ImageBuffer::from_pixel(8, 8, Rgb([20, 120, 220]));
    img.save_with_format(path, ImageFormat::Png)
        .expect("Failed to write PNG fixture");
    path.to_path_buf()
}

pub fn write_text(path: &Path) -> PathBuf {
    std::fs::write(path, "definitely not an image").expect("Failed to write text fixture");
    path.to_path_buf()
}

/// A create body for `path` with client-supplied coordinates.
pub fn create_body(path: &Path) -> Value {
    json!({
        "imagefilename": "whatever-the-client-says.png",
        "imagedatetime": "1999:12:31 23:59:59",
        "imagedirlocation": path.display().to_string(),
        "imagelat": "38.7223",
        "imagelon": "-9.1393"
    })
}
