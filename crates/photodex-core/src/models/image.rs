use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

/// A catalogued image as stored and returned by the API.
///
/// JSON keys keep the flat lowercase names clients already send
/// (`imagefilename`, `imagedatetime`, ...).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Image {
    #[serde(rename = "imageid")]
    pub id: i64,
    #[serde(rename = "imagefilename")]
    pub file_name: String,
    /// Capture timestamp, `YYYY:MM:DD HH:MM:SS`
    #[serde(rename = "imagedatetime")]
    pub date_time: String,
    #[serde(rename = "imageyear")]
    pub year: i32,
    #[serde(rename = "imagemonth")]
    pub month: i32,
    #[serde(rename = "imageday")]
    pub day: i32,
    #[serde(rename = "imagedirlocation")]
    pub dir_location: String,
    #[serde(rename = "imagewidth")]
    pub width: i32,
    #[serde(rename = "imageheight")]
    pub height: i32,
    #[serde(rename = "imagelat")]
    pub lat: String,
    #[serde(rename = "imagelon")]
    pub lon: String,
    #[serde(rename = "imagesize")]
    pub size: String,
    #[serde(rename = "imagetype")]
    pub image_type: String,
    #[serde(rename = "imagemegapixels")]
    pub megapixels: Option<f64>,
    #[serde(rename = "imagefilesize")]
    pub file_size: Option<String>,
}

/// Every mutable column of an image. Written as a whole on create and update.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ImageFields {
    pub file_name: String,
    pub date_time: String,
    pub year: i32,
    pub month: i32,
    pub day: i32,
    pub dir_location: String,
    pub width: i32,
    pub height: i32,
    pub lat: String,
    pub lon: String,
    pub size: String,
    pub image_type: String,
    pub megapixels: Option<f64>,
    pub file_size: Option<String>,
}

impl Image {
    pub fn fields(&self) -> ImageFields {
        ImageFields {
            file_name: self.file_name.clone(),
            date_time: self.date_time.clone(),
            year: self.year,
            month: self.month,
            day: self.day,
            dir_location: self.dir_location.clone(),
            width: self.width,
            height: self.height,
            lat: self.lat.clone(),
            lon: self.lon.clone(),
            size: self.size.clone(),
            image_type: self.image_type.clone(),
            megapixels: self.megapixels,
            file_size: self.file_size.clone(),
        }
    }
}

/// Body of `POST /images`.
///
/// Only the file name, capture timestamp and path are required; the normalizer
/// fills in the rest from the file itself.
#[derive(Debug, Clone, Deserialize, ToSchema, Validate)]
pub struct CreateImageInput {
    #[serde(rename = "imagefilename")]
    #[validate(length(min = 1, message = "imagefilename is required"))]
    pub file_name: String,
    #[serde(rename = "imagedatetime")]
    #[validate(length(min = 1, message = "imagedatetime is required"))]
    pub date_time: String,
    #[serde(rename = "imagedirlocation")]
    #[validate(length(min = 1, message = "imagedirlocation is required"))]
    pub dir_location: String,
    #[serde(rename = "imageyear", default)]
    pub year: i32,
    #[serde(rename = "imagemonth", default)]
    pub month: i32,
    #[serde(rename = "imageday", default)]
    pub day: i32,
    #[serde(rename = "imagewidth", default)]
    pub width: i32,
    #[serde(rename = "imageheight", default)]
    pub height: i32,
    #[serde(rename = "imagelat", default)]
    pub lat: String,
    #[serde(rename = "imagelon", default)]
    pub lon: String,
    #[serde(rename = "imagesize", default)]
    pub size: String,
    #[serde(rename = "imagetype", default)]
    pub image_type: String,
    #[serde(rename = "imagemegapixels", default)]
    pub megapixels: Option<f64>,
    #[serde(rename = "imagefilesize", default)]
    pub file_size: Option<String>,
}

impl From<CreateImageInput> for ImageFields {
    fn from(input: CreateImageInput) -> Self {
        ImageFields {
            file_name: input.file_name,
            date_time: input.date_time,
            year: input.year,
            month: input.month,
            day: input.day,
            dir_location: input.dir_location,
            width: input.width,
            height: input.height,
            lat: input.lat,
            lon: input.lon,
            size: input.size,
            image_type: input.image_type,
            megapixels: input.megapixels,
            file_size: input.file_size,
        }
    }
}

/// Body of `PATCH /images/{id}`.
///
/// The update replaces the whole record: anything the client leaves out is
/// written back as zero, empty or null.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(default)]
pub struct UpdateImageInput {
    #[serde(rename = "imagefilename")]
    pub file_name: String,
    #[serde(rename = "imagedatetime")]
    pub date_time: String,
    #[serde(rename = "imagedirlocation")]
    pub dir_location: String,
    #[serde(rename = "imageyear")]
    pub year: i32,
    #[serde(rename = "imagemonth")]
    pub month: i32,
    #[serde(rename = "imageday")]
    pub day: i32,
    #[serde(rename = "imagewidth")]
    pub width: i32,
    #[serde(rename = "imageheight")]
    pub height: i32,
    #[serde(rename = "imagelat")]
    pub lat: String,
    #[serde(rename = "imagelon")]
    pub lon: String,
    #[serde(rename = "imagesize")]
    pub size: String,
    #[serde(rename = "imagetype")]
    pub image_type: String,
    #[serde(rename = "imagemegapixels")]
    pub megapixels: Option<f64>,
    #[serde(rename = "imagefilesize")]
    pub file_size: Option<String>,
}

impl From<UpdateImageInput> for ImageFields {
    fn from(input: UpdateImageInput) -> Self {
        ImageFields {
            file_name: input.file_name,
            date_time: input.date_time,
            year: input.year,
            month: input.month,
            day: input.day,
            dir_location: input.dir_location,
            width: input.width,
            height: input.height,
            lat: input.lat,
            lon: input.lon,
            size: input.size,
            image_type: input.image_type,
            megapixels: input.megapixels,
            file_size: input.file_size,
        }
    }
}
