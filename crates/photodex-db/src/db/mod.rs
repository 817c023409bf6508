//! Database repositories
//!
//! One repository per table; each owns a clone of the pool and maps driver
//! errors onto `AppError`.

pub mod image;

pub use image::ImageRepository;
