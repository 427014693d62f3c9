use std::fmt;
use std::time::Duration;

use serde::de::{self, IgnoredAny, MapAccess, Visitor};
use serde::{Deserialize, Deserializer};

use crate::application::errors::AppError;
use crate::domain::records::ImagePage;

pub const COMMONS_API_URL: &str = "https://commons.wikimedia.org/w/api.php";
const USER_AGENT: &str = "wikiiif/0.1 (https://github.com/wikiiif/wikiiif)";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Which rendition width to ask the `imageinfo` API for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryMode {
    /// Request a target width far beyond any real image so the reported
    /// "thumbnail" URL and dimensions are the original asset's. An API
    /// quirk, but the only way to get native dimensions from this endpoint.
    NativeResolution,
    /// Request a genuine small thumbnail.
    Thumbnail,
}

impl QueryMode {
    fn target_width(self) -> u32 {
        match self {
            Self::NativeResolution => 30_000,
            Self::Thumbnail => 100,
        }
    }
}

/// Client for the Wikimedia Commons query API. The endpoint URL is
/// injectable so tests can stand in a mock server.
#[derive(Clone)]
pub struct CommonsClient {
    http: reqwest::Client,
    api_url: String,
}

impl CommonsClient {
    pub fn new(http: reqwest::Client, api_url: String) -> Self {
        Self { http, api_url }
    }

    /// Fetch the page records for `titles`, preserving the document order
    /// of the response's `pages` object.
    pub async fn query_pages(
        &self,
        titles: &str,
        mode: QueryMode,
    ) -> Result<Vec<ImagePage>, AppError> {
        let target_width = mode.target_width().to_string();
        let response = self
            .http
            .get(&self.api_url)
            .query(&[
                ("action", "query"),
                ("format", "json"),
                ("prop", "imageinfo"),
                ("iiprop", "url|timestamp|user|mime|extmetadata"),
                ("iiurlwidth", target_width.as_str()),
                ("titles", titles),
            ])
            .header("User-Agent", USER_AGENT)
            .timeout(REQUEST_TIMEOUT)
            .send()
            .await
            .map_err(|e| AppError::upstream(format!("Commons request failed: {e}")))?;

        if !response.status().is_success() {
            return Err(AppError::upstream(format!(
                "Commons returned status {}",
                response.status()
            )));
        }

        let body: QueryResponse = response
            .json()
            .await
            .map_err(|e| AppError::upstream(format!("failed to parse Commons response: {e}")))?;

        Ok(body.query.map(|q| q.pages).unwrap_or_default())
    }
}

#[derive(Debug, Deserialize)]
struct QueryResponse {
    query: Option<QueryBody>,
}

#[derive(Debug, Deserialize)]
struct QueryBody {
    #[serde(default, deserialize_with = "pages_in_document_order")]
    pages: Vec<ImagePage>,
}

/// Deserialize the `pages` object into a Vec, keeping document order.
/// Canvas ordering in manifests follows this order, so a sorted map would
/// silently re-order multi-page works.
fn pages_in_document_order<'de, D>(deserializer: D) -> Result<Vec<ImagePage>, D::Error>
where
    D: Deserializer<'de>,
{
    struct PagesVisitor;

    impl<'de> Visitor<'de> for PagesVisitor {
        type Value = Vec<ImagePage>;

        fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
            f.write_str("a map of page id to page object")
        }

        fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
            let mut pages = Vec::new();
            while let Some((_, page)) = map.next_entry::<IgnoredAny, ImagePage>()? {
                pages.push(page);
            }
            Ok(pages)
        }

        fn visit_unit<E: de::Error>(self) -> Result<Self::Value, E> {
            Ok(Vec::new())
        }
    }

    deserializer.deserialize_any(PagesVisitor)
}
