//! Response envelopes. Every successful body is `{"data": ...}`.

use super::Image;
use serde::Serialize;
use utoipa::ToSchema;

#[derive(Debug, Serialize, ToSchema)]
pub struct ImageResponse {
    pub data: Image,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ImageListResponse {
    pub data: Vec<Image>,
}

/// Body of a successful delete, always `{"data": true}`
#[derive(Debug, Serialize, ToSchema)]
pub struct DeletedResponse {
    pub data: bool,
}

impl From<Image> for ImageResponse {
    fn from(data: Image) -> Self {
        Self { data }
    }
}

impl From<Vec<Image>> for ImageListResponse {
    fn from(data: Vec<Image>) -> Self {
        Self { data }
    }
}
