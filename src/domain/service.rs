use serde::Serialize;

use crate::domain::AssemblyError;
use crate::domain::identifiers::IdentifierUrls;
use crate::domain::records::ImagePage;
use crate::domain::sizes::{SizeEntry, compute_sizes};

pub const IMAGE_CONTEXT: &str = "http://iiif.io/api/image/2/context.json";
pub const IMAGE_PROTOCOL: &str = "http://iiif.io/api/image";
pub const LEVEL0_PROFILE: &str = "http://iiif.io/api/image/2/level0.json";

/// IIIF Image API v2 level-0 service descriptor for one asset. Level 0
/// means clients may only request the enumerated sizes, which map onto
/// pre-rendered Commons thumbnails.
#[derive(Debug, Clone, Serialize)]
pub struct ImageService {
    #[serde(rename = "@context")]
    pub context: &'static str,
    #[serde(rename = "@id")]
    pub id: String,
    pub protocol: &'static str,
    pub width: u32,
    pub height: u32,
    pub profile: [&'static str; 1],
    pub sizes: Vec<SizeEntry>,
}

impl ImageService {
    pub fn new(id: String, width: u32, height: u32) -> Self {
        Self {
            context: IMAGE_CONTEXT,
            id,
            protocol: IMAGE_PROTOCOL,
            width,
            height,
            profile: [LEVEL0_PROFILE],
            sizes: compute_sizes(width, height),
        }
    }
}

/// Build the image service for the first JPEG record in a
/// native-resolution page set, addressed by the requested path segments.
pub fn compute_image_service(
    p1: &str,
    p2: &str,
    file: &str,
    pages: &[ImagePage],
    urls: &dyn IdentifierUrls,
) -> Result<ImageService, AssemblyError> {
    for page in pages {
        if let Some(info) = page.info()
            && info.is_jpeg()
            && let Some((width, height)) = info.thumb_dimensions()
        {
            return Ok(ImageService::new(
                urls.image_service_id(p1, p2, file),
                width,
                height,
            ));
        }
    }
    Err(AssemblyError::NoJpegRepresentation)
}
