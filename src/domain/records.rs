use std::collections::BTreeMap;
use std::fmt;

use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer};

/// One page record from a Commons `imageinfo` query. Immutable once fetched.
#[derive(Debug, Clone, Deserialize)]
pub struct ImagePage {
    pub pageid: Option<u64>,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub imageinfo: Vec<ImageInfo>,
}

impl ImagePage {
    /// The first (and in practice only) imageinfo entry, if present.
    pub fn info(&self) -> Option<&ImageInfo> {
        self.imageinfo.first()
    }
}

/// Per-revision image metadata. `thumburl`/`thumbwidth`/`thumbheight`
/// describe the rendition at the requested target width; under an oversized
/// target width they equal the original asset and its native dimensions
/// (see `QueryMode::NativeResolution`).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ImageInfo {
    pub url: Option<String>,
    pub thumburl: Option<String>,
    pub thumbwidth: Option<u32>,
    pub thumbheight: Option<u32>,
    pub mime: Option<String>,
    pub user: Option<String>,
    #[serde(default)]
    pub extmetadata: BTreeMap<String, ExtMetadataValue>,
}

impl ImageInfo {
    pub fn is_jpeg(&self) -> bool {
        self.mime.as_deref() == Some("image/jpeg")
    }

    /// Reported rendition dimensions, rejecting missing or zero values.
    pub fn thumb_dimensions(&self) -> Option<(u32, u32)> {
        match (self.thumbwidth, self.thumbheight) {
            (Some(w), Some(h)) if w > 0 && h > 0 => Some((w, h)),
            _ => None,
        }
    }
}

/// One extended-metadata entry. Commons serializes most values as strings
/// but emits bare numbers for a few keys, so `value` accepts any scalar.
#[derive(Debug, Clone, Deserialize)]
pub struct ExtMetadataValue {
    #[serde(default, deserialize_with = "scalar_to_string")]
    pub value: String,
    #[serde(default)]
    pub source: Option<String>,
}

/// Classification of an extended-metadata key. `LicenseUrl` and
/// `ImageDescription` get dedicated handling during canvas assembly;
/// everything else becomes a plain metadata row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetadataKey<'a> {
    LicenseUrl,
    ImageDescription,
    Other(&'a str),
}

impl<'a> MetadataKey<'a> {
    pub fn classify(key: &'a str) -> Self {
        match key {
            "LicenseUrl" => Self::LicenseUrl,
            "ImageDescription" => Self::ImageDescription,
            other => Self::Other(other),
        }
    }
}

/// Deserialize a scalar of any JSON type into a string.
fn scalar_to_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    struct ScalarVisitor;

    impl Visitor<'_> for ScalarVisitor {
        type Value = String;

        fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
            f.write_str("a string, number, or boolean")
        }

        fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
            Ok(v.to_string())
        }

        fn visit_i64<E: de::Error>(self, v: i64) -> Result<Self::Value, E> {
            Ok(v.to_string())
        }

        fn visit_u64<E: de::Error>(self, v: u64) -> Result<Self::Value, E> {
            Ok(v.to_string())
        }

        fn visit_f64<E: de::Error>(self, v: f64) -> Result<Self::Value, E> {
            Ok(v.to_string())
        }

        fn visit_bool<E: de::Error>(self, v: bool) -> Result<Self::Value, E> {
            Ok(v.to_string())
        }

        fn visit_none<E: de::Error>(self) -> Result<Self::Value, E> {
            Ok(String::new())
        }

        fn visit_unit<E: de::Error>(self) -> Result<Self::Value, E> {
            Ok(String::new())
        }
    }

    deserializer.deserialize_any(ScalarVisitor)
}
