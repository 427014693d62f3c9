use serde_json::{Value, json};
use wiremock::matchers::{method, path};
use wiremock::{Mock, ResponseTemplate};

use crate::helpers::{
    jpeg_page, mock_commons_empty, mock_commons_query, no_redirect_client, spawn_app, thumb_page,
};

#[tokio::test]
async fn manifest_for_a_single_image_work() {
    let app = spawn_app().await;
    mock_commons_query(
        &app,
        "File:Example.jpg",
        "30000",
        json!({"42": jpeg_page(42, "File:Example.jpg", "Example.jpg", 4000, 3000)}),
    )
    .await;
    mock_commons_query(
        &app,
        "File:Example.jpg",
        "100",
        json!({"42": thumb_page(42, "File:Example.jpg", "Example.jpg", 100, 75)}),
    )
    .await;

    let response = reqwest::get(app.url("/presentation/File:Example.jpg"))
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), 200);

    let manifest: Value = response.json().await.expect("Failed to parse manifest");
    assert_eq!(
        manifest["@context"],
        "http://iiif.io/api/presentation/2/context.json"
    );
    assert_eq!(
        manifest["@id"],
        format!("{}/presentation/File:Example.jpg", app.address)
    );
    assert_eq!(manifest["label"], "File:Example.jpg");

    let canvases = manifest["sequences"][0]["canvases"]
        .as_array()
        .expect("canvases should be an array");
    assert_eq!(canvases.len(), 1);

    let canvas = &canvases[0];
    assert_eq!(canvas["width"], 4000);
    assert_eq!(canvas["height"], 3000);
    assert_eq!(canvas["thumbnail"]["width"], 100);
    assert_eq!(canvas["thumbnail"]["height"], 75);
    assert_eq!(canvas["thumbnail"]["format"], "image/jpeg");

    // Painting annotation: direct asset reference plus embedded service.
    let resource = &canvas["images"][0]["resource"];
    assert_eq!(
        resource["@id"],
        "https://upload.wikimedia.org/wikipedia/commons/a/a9/Example.jpg"
    );
    assert_eq!(
        resource["service"]["@id"],
        format!("{}/image/a/a9/Example.jpg", app.address)
    );
    assert_eq!(
        resource["service"]["sizes"].as_array().map(Vec::len),
        Some(7)
    );
}

#[tokio::test]
async fn non_jpeg_records_are_skipped_silently() {
    let app = spawn_app().await;

    let mut tiff = jpeg_page(1, "File:Scan.tif", "Scan.tif", 2000, 1500);
    tiff["imageinfo"][0]["mime"] = json!("image/tiff");
    mock_commons_query(
        &app,
        "File:Scan.jpg",
        "30000",
        json!({
            "1": tiff,
            "2": jpeg_page(2, "File:Scan.jpg", "Scan.jpg", 2000, 1500)
        }),
    )
    .await;
    mock_commons_empty(&app, "File:Scan.jpg", "100").await;

    let response = reqwest::get(app.url("/presentation/File:Scan.jpg"))
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), 200);

    let manifest: Value = response.json().await.expect("Failed to parse manifest");
    let canvases = manifest["sequences"][0]["canvases"]
        .as_array()
        .expect("canvases should be an array");
    assert_eq!(canvases.len(), 1);
    assert_eq!(manifest["label"], "File:Scan.jpg");
}

#[tokio::test]
async fn work_without_any_jpeg_returns_404() {
    let app = spawn_app().await;
    mock_commons_empty(&app, "File:Nope.jpg", "30000").await;
    mock_commons_empty(&app, "File:Nope.jpg", "100").await;

    let response = reqwest::get(app.url("/presentation/File:Nope.jpg"))
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), 404);

    let body: Value = response.json().await.expect("Failed to parse error body");
    assert_eq!(body["error"], "no displayable image found");
}

#[tokio::test]
async fn upstream_failure_maps_to_bad_gateway() {
    let app = spawn_app().await;
    Mock::given(method("GET"))
        .and(path("/w/api.php"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&app.mock_server)
        .await;

    let response = reqwest::get(app.url("/presentation/File:Example.jpg"))
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), 502);

    let body: Value = response.json().await.expect("Failed to parse error body");
    assert_eq!(body["error"], "upstream image provider unavailable");
}

#[tokio::test]
async fn pasted_commons_url_redirects_to_the_manifest() {
    let app = spawn_app().await;
    let client = no_redirect_client();

    let response = client
        .get(app.url("/https://commons.wikimedia.org/wiki/File:Example.jpg"))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), 303);
    assert_eq!(
        response.headers()["location"],
        "/presentation/File:Example.jpg"
    );
}

#[tokio::test]
async fn unknown_paths_return_404() {
    let app = spawn_app().await;

    let response = reqwest::get(app.url("/definitely/not/a/route"))
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), 404);
}

#[tokio::test]
async fn responses_allow_cross_origin_viewers() {
    let app = spawn_app().await;
    mock_commons_query(
        &app,
        "File:Example.jpg",
        "30000",
        json!({"42": jpeg_page(42, "File:Example.jpg", "Example.jpg", 4000, 3000)}),
    )
    .await;
    mock_commons_empty(&app, "File:Example.jpg", "100").await;

    let client = reqwest::Client::new();
    let response = client
        .get(app.url("/presentation/File:Example.jpg"))
        .header("Origin", "https://viewer.example")
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), 200);
    assert_eq!(response.headers()["access-control-allow-origin"], "*");
}
