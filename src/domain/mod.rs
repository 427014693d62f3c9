pub mod canvas;
pub mod identifiers;
pub mod manifest;
pub mod records;
pub mod renditions;
pub mod sanitize;
pub mod service;
pub mod sizes;

use thiserror::Error;

/// Set-level assembly failures. Per-record anomalies (missing imageinfo,
/// wrong MIME type, malformed URLs) are skipped silently and never reach
/// this enum; only an empty result set does.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum AssemblyError {
    #[error("no JPEG representation found")]
    NoJpegRepresentation,
    #[error("no displayable image found")]
    NoDisplayableImage,
}
