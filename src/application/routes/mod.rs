pub mod image;
pub mod presentation;

use axum::http::{HeaderValue, Request};
use axum::routing::get;
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;
use tower_http::set_header::SetResponseHeaderLayer;
use tower_http::trace::{DefaultOnResponse, MakeSpan, TraceLayer};
use tracing::{Level, Span};

use crate::application::state::AppState;

pub fn app_router(state: AppState) -> axum::Router {
    axum::Router::new()
        .route("/presentation/{file}", get(presentation::manifest))
        .route("/image/{p1}/{p2}/{file}", get(image::image_base))
        .route("/image/{p1}/{p2}/{file}/info.json", get(image::image_info))
        .route(
            "/image/{p1}/{p2}/{file}/full/{wh}/0/default.jpg",
            get(image::image_rendition),
        )
        .route("/{*path}", get(presentation::commons_url_redirect))
        .layer(
            ServiceBuilder::new()
                .layer(
                    TraceLayer::new_for_http()
                        .make_span_with(WikiiifMakeSpan)
                        .on_response(DefaultOnResponse::new().level(Level::INFO)),
                )
                // Viewers are embedded in arbitrary origins.
                .layer(CorsLayer::permissive())
                .layer(SetResponseHeaderLayer::overriding(
                    axum::http::header::X_CONTENT_TYPE_OPTIONS,
                    HeaderValue::from_static("nosniff"),
                )),
        )
        .with_state(state)
}

#[derive(Clone)]
struct WikiiifMakeSpan;

impl<B> MakeSpan<B> for WikiiifMakeSpan {
    fn make_span(&mut self, request: &Request<B>) -> Span {
        tracing::info_span!(
            "request",
            method = %request.method(),
            uri = %request.uri(),
            version = ?request.version(),
        )
    }
}
