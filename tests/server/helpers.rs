use serde_json::{Value, json};
use tokio::net::TcpListener;
use tokio::task::AbortHandle;
use wikiiif::application::routes::app_router;
use wikiiif::application::state::{AppState, AppStateConfig};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub struct TestApp {
    pub address: String,
    pub mock_server: MockServer,
    server_handle: AbortHandle,
}

impl TestApp {
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.address, path)
    }
}

impl Drop for TestApp {
    fn drop(&mut self) {
        self.server_handle.abort();
    }
}

/// Spawn the app on a random port, with a wiremock server standing in for
/// the Commons API.
pub async fn spawn_app() -> TestApp {
    let mock_server = MockServer::start().await;

    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind to random port");
    let local_addr = listener.local_addr().expect("Failed to get local address");
    let address = format!("http://{local_addr}");

    let state = AppState::new(AppStateConfig {
        public_base_url: address.clone(),
        commons_api_url: format!("{}/w/api.php", mock_server.uri()),
    });
    let app = app_router(state);

    let server_handle = tokio::spawn(async move {
        axum::serve(listener, app).await.expect("Server failed to start");
    })
    .abort_handle();

    TestApp {
        address,
        mock_server,
        server_handle,
    }
}

/// A client that does not follow redirects, so tests can assert on them.
pub fn no_redirect_client() -> reqwest::Client {
    reqwest::Client::builder()
        .redirect(reqwest::redirect::Policy::none())
        .build()
        .expect("Failed to build client")
}

/// Mount a Commons `imageinfo` response for one target width.
pub async fn mock_commons_query(app: &TestApp, titles: &str, iiurlwidth: &str, pages: Value) {
    Mock::given(method("GET"))
        .and(path("/w/api.php"))
        .and(query_param("action", "query"))
        .and(query_param("prop", "imageinfo"))
        .and(query_param("titles", titles))
        .and(query_param("iiurlwidth", iiurlwidth))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({
                "batchcomplete": "",
                "query": {"pages": pages}
            })),
        )
        .mount(&app.mock_server)
        .await;
}

/// Mount an empty (no results) Commons response for one target width.
pub async fn mock_commons_empty(app: &TestApp, titles: &str, iiurlwidth: &str) {
    mock_commons_query(app, titles, iiurlwidth, json!({})).await;
}

/// Page record JSON as returned by a native-resolution query: the
/// "thumbnail" URL and dimensions are the original asset's.
pub fn jpeg_page(pageid: u64, title: &str, file: &str, width: u32, height: u32) -> Value {
    json!({
        "pageid": pageid,
        "ns": 6,
        "title": title,
        "imageinfo": [{
            "timestamp": "2020-01-01T00:00:00Z",
            "user": "Uploader",
            "url": format!("https://upload.wikimedia.org/wikipedia/commons/a/a9/{file}"),
            "thumburl": format!("https://upload.wikimedia.org/wikipedia/commons/a/a9/{file}"),
            "thumbwidth": width,
            "thumbheight": height,
            "mime": "image/jpeg",
            "extmetadata": {}
        }]
    })
}

/// Page record JSON as returned by a thumbnail-width query.
pub fn thumb_page(pageid: u64, title: &str, file: &str, width: u32, height: u32) -> Value {
    json!({
        "pageid": pageid,
        "ns": 6,
        "title": title,
        "imageinfo": [{
            "timestamp": "2020-01-01T00:00:00Z",
            "user": "Uploader",
            "url": format!("https://upload.wikimedia.org/wikipedia/commons/a/a9/{file}"),
            "thumburl": format!(
                "https://upload.wikimedia.org/wikipedia/commons/thumb/a/a9/{file}/{width}px-{file}"
            ),
            "thumbwidth": width,
            "thumbheight": height,
            "mime": "image/jpeg",
            "extmetadata": {}
        }]
    })
}
