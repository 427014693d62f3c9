use serde::Serialize;

use crate::domain::identifiers::IdentifierUrls;
use crate::domain::records::{ImagePage, MetadataKey};
use crate::domain::renditions::hash_prefixes;
use crate::domain::sanitize::Sanitizer;
use crate::domain::service::ImageService;

/// One page's structural unit within a manifest: dimensions, the painting
/// annotation carrying the image content, and descriptive metadata.
#[derive(Debug, Clone, Serialize)]
pub struct Canvas {
    #[serde(rename = "@id")]
    pub id: String,
    #[serde(rename = "@type")]
    pub type_: &'static str,
    pub label: String,
    pub height: u32,
    pub width: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub license: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub metadata: Vec<MetadataEntry>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thumbnail: Option<Thumbnail>,
    pub images: Vec<PaintingAnnotation>,
}

#[derive(Debug, Clone, Serialize)]
pub struct MetadataEntry {
    pub label: String,
    pub value: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct Thumbnail {
    #[serde(rename = "@id")]
    pub id: String,
    #[serde(rename = "@type")]
    pub type_: &'static str,
    pub format: &'static str,
    pub height: u32,
    pub width: u32,
}

/// Associates a canvas with the image content that fills it.
#[derive(Debug, Clone, Serialize)]
pub struct PaintingAnnotation {
    #[serde(rename = "@id")]
    pub id: String,
    #[serde(rename = "@type")]
    pub type_: &'static str,
    pub motivation: &'static str,
    pub resource: ImageResource,
    pub on: String,
}

/// The image resource painted onto a canvas: a direct (non-IIIF) reference
/// to the full-resolution asset, with its image service embedded.
#[derive(Debug, Clone, Serialize)]
pub struct ImageResource {
    #[serde(rename = "@id")]
    pub id: String,
    #[serde(rename = "@type")]
    pub type_: &'static str,
    pub format: &'static str,
    pub height: u32,
    pub width: u32,
    pub service: ImageService,
}

/// Assemble one canvas from a native-resolution page record, or `None` when
/// the record is not a usable JPEG (missing imageinfo or page id, wrong MIME
/// type, unusable dimensions, or an asset URL outside the hash-prefix
/// upload convention).
pub fn assemble(
    page: &ImagePage,
    thumbnail_page: Option<&ImagePage>,
    file_name: &str,
    manifest_id: &str,
    urls: &dyn IdentifierUrls,
    sanitizer: &Sanitizer,
) -> Option<Canvas> {
    let page_id = page.pageid?;
    let info = page.info()?;
    if !info.is_jpeg() {
        return None;
    }
    let (width, height) = info.thumb_dimensions()?;

    // Under the oversized-width query this is the original asset URL.
    let asset_url = info.thumburl.as_deref()?;
    let (p1, p2) = hash_prefixes(asset_url)?;
    let service = ImageService::new(urls.image_service_id(p1, p2, file_name), width, height);

    let mut label = page.title.clone();
    let mut license = None;
    let mut metadata = Vec::new();

    if let Some(user) = &info.user {
        metadata.push(MetadataEntry {
            label: "Wikipedia user".to_string(),
            value: user.clone(),
        });
    }

    for (key, entry) in &info.extmetadata {
        match MetadataKey::classify(key) {
            // Trusted URL, not HTML; stored as-is and never as a metadata row.
            MetadataKey::LicenseUrl => license = Some(entry.value.clone()),
            // Consumed as the canvas label, not duplicated as metadata.
            MetadataKey::ImageDescription => label = sanitizer.sanitize(&entry.value),
            MetadataKey::Other(name) if !entry.value.is_empty() => {
                metadata.push(MetadataEntry {
                    label: name.to_string(),
                    value: sanitizer.sanitize(&entry.value),
                });
            }
            MetadataKey::Other(_) => {}
        }
    }

    let thumbnail = thumbnail_page
        .and_then(ImagePage::info)
        .and_then(|thumb_info| {
            let thumb_url = thumb_info.thumburl.as_deref()?;
            let (thumb_width, thumb_height) = thumb_info.thumb_dimensions()?;
            Some(Thumbnail {
                id: thumb_url.to_string(),
                type_: "dctypes:Image",
                format: "image/jpeg",
                height: thumb_height,
                width: thumb_width,
            })
        });

    let canvas_id = format!("{manifest_id}/canvas/c{page_id}");
    let annotation = PaintingAnnotation {
        id: format!("{manifest_id}/annotation/a{page_id}"),
        type_: "oa:Annotation",
        motivation: "sc:painting",
        resource: ImageResource {
            id: asset_url.to_string(),
            type_: "dctypes:Image",
            format: "image/jpeg",
            height,
            width,
            service,
        },
        on: canvas_id.clone(),
    };

    Some(Canvas {
        id: canvas_id,
        type_: "sc:Canvas",
        label,
        height,
        width,
        license,
        metadata,
        thumbnail,
        images: vec![annotation],
    })
}
