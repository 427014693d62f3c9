use axum::Json;
use axum::extract::{Path, State};
use axum::response::Redirect;

use crate::application::errors::AppError;
use crate::application::state::AppState;
use crate::domain::renditions::resolve_rendition_url;
use crate::domain::service::{ImageService, compute_image_service};
use crate::infrastructure::commons::QueryMode;

/// `GET /image/{p1}/{p2}/{file}` — the service base redirects to its
/// info document.
pub(crate) async fn image_base(
    Path((p1, p2, file)): Path<(String, String, String)>,
) -> Redirect {
    Redirect::to(&format!("/image/{p1}/{p2}/{file}/info.json"))
}

/// `GET /image/{p1}/{p2}/{file}/info.json` — image service descriptor.
pub(crate) async fn image_info(
    State(state): State<AppState>,
    Path((p1, p2, file)): Path<(String, String, String)>,
) -> Result<Json<ImageService>, AppError> {
    let titles = format!("File:{file}");
    let pages = state
        .commons
        .query_pages(&titles, QueryMode::NativeResolution)
        .await?;

    let service = compute_image_service(&p1, &p2, &file, &pages, &state.urls)?;
    Ok(Json(service))
}

/// `GET /image/{p1}/{p2}/{file}/full/{wh}/0/default.jpg` — IIIF size
/// request, answered by redirecting to the matching upstream rendition.
pub(crate) async fn image_rendition(
    Path((p1, p2, file, wh)): Path<(String, String, String, String)>,
) -> Result<Redirect, AppError> {
    // The size parameter is "w," or "w,h"; only the width matters here.
    let width = wh
        .split(',')
        .next()
        .unwrap_or("")
        .parse::<u32>()
        .map_err(|_| AppError::bad_request(format!("invalid size parameter: {wh}")))?;

    Ok(Redirect::to(&resolve_rendition_url(&p1, &p2, &file, width)))
}
