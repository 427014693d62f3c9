/// Constructs the externally addressable identifiers embedded in serialized
/// documents. Implemented by the boundary layer, which knows the public base
/// URL; the core never builds external URLs itself.
pub trait IdentifierUrls {
    /// Canonical identifier of the manifest for `file` (as requested,
    /// including any `File:` prefix).
    fn manifest_id(&self, file: &str) -> String;

    /// Canonical identifier of the image service for one asset, addressed by
    /// its two hash-prefix path segments and display file name.
    fn image_service_id(&self, p1: &str, p2: &str, file: &str) -> String;
}
