use serde::Serialize;

use crate::domain::AssemblyError;
use crate::domain::canvas::{self, Canvas};
use crate::domain::identifiers::IdentifierUrls;
use crate::domain::records::ImagePage;
use crate::domain::sanitize::Sanitizer;

pub const PRESENTATION_CONTEXT: &str = "http://iiif.io/api/presentation/2/context.json";

/// Top-level IIIF Presentation 2.x document for one logical work: an
/// ordered set of canvases in a single sequence.
#[derive(Debug, Clone, Serialize)]
pub struct Manifest {
    #[serde(rename = "@context")]
    pub context: &'static str,
    #[serde(rename = "@id")]
    pub id: String,
    #[serde(rename = "@type")]
    pub type_: &'static str,
    pub label: String,
    pub sequences: Vec<Sequence>,
}

#[derive(Debug, Clone, Serialize)]
pub struct Sequence {
    #[serde(rename = "@id")]
    pub id: String,
    #[serde(rename = "@type")]
    pub type_: &'static str,
    pub label: &'static str,
    pub canvases: Vec<Canvas>,
}

/// An assembled manifest plus skip diagnostics for the boundary layer.
/// Skipped records are absorbed silently during assembly; the count lets
/// the caller log upstream data-quality problems without changing the
/// document.
#[derive(Debug)]
pub struct ManifestAssembly {
    pub manifest: Manifest,
    pub skipped_records: usize,
}

/// Assemble a manifest from native-resolution page records, in input order.
///
/// Records that fail canvas assembly are skipped and counted; zero usable
/// canvases is `NoDisplayableImage`. The manifest label is the title of the
/// record backing the first canvas.
pub fn assemble(
    pages: &[ImagePage],
    thumbnail_pages: &[ImagePage],
    file: &str,
    urls: &dyn IdentifierUrls,
    sanitizer: &Sanitizer,
) -> Result<ManifestAssembly, AssemblyError> {
    let file_name = file.strip_prefix("File:").unwrap_or(file);
    let manifest_id = urls.manifest_id(file);

    let mut canvases = Vec::new();
    let mut label = None;
    let mut skipped_records = 0;

    for page in pages {
        let thumbnail_page = page
            .pageid
            .and_then(|id| thumbnail_pages.iter().find(|t| t.pageid == Some(id)));

        match canvas::assemble(page, thumbnail_page, file_name, &manifest_id, urls, sanitizer) {
            Some(canvas) => {
                if label.is_none() {
                    label = Some(page.title.clone());
                }
                canvases.push(canvas);
            }
            None => skipped_records += 1,
        }
    }

    let label = label.ok_or(AssemblyError::NoDisplayableImage)?;

    let manifest = Manifest {
        context: PRESENTATION_CONTEXT,
        id: manifest_id.clone(),
        type_: "sc:Manifest",
        label,
        sequences: vec![Sequence {
            id: format!("{manifest_id}/sequence/normal"),
            type_: "sc:Sequence",
            label: "default order",
            canvases,
        }],
    };

    Ok(ManifestAssembly {
        manifest,
        skipped_records,
    })
}
