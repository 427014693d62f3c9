//! String templates for the Commons asset-hosting convention: original
//! uploads live under two hash-prefix path segments, pre-rendered
//! thumbnails under a parallel `thumb/` tree keyed by target width.

use crate::domain::sizes::MAX_LADDER_WIDTH;

const UPLOAD_BASE: &str = "https://upload.wikimedia.org/wikipedia/commons";

/// URL of the original full-resolution asset.
pub fn full_asset_url(p1: &str, p2: &str, file: &str) -> String {
    format!("{UPLOAD_BASE}/{p1}/{p2}/{file}")
}

/// URL of the pre-rendered thumbnail at `width` pixels.
pub fn thumb_asset_url(p1: &str, p2: &str, file: &str, width: u32) -> String {
    format!("{UPLOAD_BASE}/thumb/{p1}/{p2}/{file}/{width}px-{file}")
}

/// Resolve a requested rendition width to an upstream asset URL: widths
/// above the largest canonical ladder width get the original, everything
/// else a width-parameterized thumbnail.
pub fn resolve_rendition_url(p1: &str, p2: &str, file: &str, requested_width: u32) -> String {
    if requested_width > MAX_LADDER_WIDTH {
        full_asset_url(p1, p2, file)
    } else {
        thumb_asset_url(p1, p2, file, requested_width)
    }
}

/// Extract the two hash-prefix segments preceding the filename in an asset
/// URL. Returns `None` when the path does not follow the upload convention.
pub fn hash_prefixes(asset_url: &str) -> Option<(&str, &str)> {
    let mut segments = asset_url.rsplit('/');
    let _file = segments.next()?;
    let p2 = segments.next().filter(|s| !s.is_empty())?;
    let p1 = segments.next().filter(|s| !s.is_empty())?;
    Some((p1, p2))
}
