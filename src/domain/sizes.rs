use serde::Serialize;

/// Canonical rendition widths offered by Wikimedia thumbnailing, ascending.
pub const WIKI_SIZES: [u32; 6] = [320, 640, 800, 1024, 1280, 2560];

/// Largest width the thumbnailer will render; anything above resolves to
/// the original asset.
pub const MAX_LADDER_WIDTH: u32 = WIKI_SIZES[WIKI_SIZES.len() - 1];

/// A width/height pair advertised in an image service's `sizes` list.
/// Heights are always derived from the native aspect ratio, never supplied
/// independently.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SizeEntry {
    pub width: u32,
    pub height: u32,
}

/// Compute the ordered size list for an image with the given native
/// dimensions: one entry per ladder width strictly below the native width,
/// followed by the native size itself.
///
/// Scaled heights use floor(native_height * width / native_width). Callers
/// must reject non-positive dimensions before calling.
pub fn compute_sizes(native_width: u32, native_height: u32) -> Vec<SizeEntry> {
    let mut sizes: Vec<SizeEntry> = WIKI_SIZES
        .iter()
        .copied()
        .filter(|&w| w < native_width)
        .map(|w| SizeEntry {
            width: w,
            height: (u64::from(native_height) * u64::from(w) / u64::from(native_width)) as u32,
        })
        .collect();

    sizes.push(SizeEntry {
        width: native_width,
        height: native_height,
    });
    sizes
}
