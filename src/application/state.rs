use std::sync::Arc;

use crate::domain::identifiers::IdentifierUrls;
use crate::domain::sanitize::Sanitizer;
use crate::infrastructure::commons::CommonsClient;

/// Everything that varies between production and test environments: the
/// Commons endpoint and the public base URL woven into identifiers.
pub struct AppStateConfig {
    pub public_base_url: String,
    pub commons_api_url: String,
}

#[derive(Clone)]
pub struct AppState {
    pub commons: CommonsClient,
    pub urls: PublicUrls,
    pub sanitizer: Arc<Sanitizer>,
}

impl AppState {
    pub fn new(config: AppStateConfig) -> Self {
        #[allow(clippy::expect_used)] // Startup: a client builder failure is unrecoverable
        let http_client = reqwest::ClientBuilder::new()
            .timeout(std::time::Duration::from_secs(30))
            .build()
            .expect("failed to build HTTP client");

        Self {
            commons: CommonsClient::new(http_client, config.commons_api_url),
            urls: PublicUrls::new(&config.public_base_url),
            sanitizer: Arc::new(Sanitizer::default()),
        }
    }
}

/// Builds identifiers under the externally visible base URL, mirroring the
/// route layout in `routes::app_router`.
#[derive(Debug, Clone)]
pub struct PublicUrls {
    base: String,
}

impl PublicUrls {
    pub fn new(base: &str) -> Self {
        Self {
            base: base.trim_end_matches('/').to_string(),
        }
    }
}

impl IdentifierUrls for PublicUrls {
    fn manifest_id(&self, file: &str) -> String {
        format!("{}/presentation/{file}", self.base)
    }

    fn image_service_id(&self, p1: &str, p2: &str, file: &str) -> String {
        format!("{}/image/{p1}/{p2}/{file}", self.base)
    }
}
