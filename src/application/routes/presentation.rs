use axum::Json;
use axum::extract::{Path, State};
use axum::response::Redirect;
use tracing::debug;

use crate::application::errors::AppError;
use crate::application::state::AppState;
use crate::domain::manifest::{self, Manifest};
use crate::infrastructure::commons::QueryMode;

/// `GET /presentation/{file}` — assemble the manifest for one work.
pub(crate) async fn manifest(
    State(state): State<AppState>,
    Path(file): Path<String>,
) -> Result<Json<Manifest>, AppError> {
    let pages = state
        .commons
        .query_pages(&file, QueryMode::NativeResolution)
        .await?;
    let thumbnails = state.commons.query_pages(&file, QueryMode::Thumbnail).await?;

    let assembly = manifest::assemble(&pages, &thumbnails, &file, &state.urls, &state.sanitizer)?;

    if assembly.skipped_records > 0 {
        debug!(
            file = %file,
            skipped = assembly.skipped_records,
            "skipped records without a displayable JPEG"
        );
    }

    Ok(Json(assembly.manifest))
}

/// Catch-all: a pasted Commons page URL redirects to the corresponding
/// manifest; anything else is 404.
pub(crate) async fn commons_url_redirect(Path(path): Path<String>) -> Result<Redirect, AppError> {
    if let Some(rest) = path.strip_prefix("https://commons.wikimedia.org/") {
        let file = rest.rsplit('/').next().unwrap_or(rest);
        return Ok(Redirect::to(&format!("/presentation/{file}")));
    }
    Err(AppError::not_found("not found"))
}
