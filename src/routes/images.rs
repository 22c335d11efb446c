//! Rendered image retrieval.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::http::header::CONTENT_TYPE;
use axum::response::{IntoResponse, Response};
use uuid::Uuid;

use crate::state::AppState;

/// `GET /static/{filename}` — fetch a stored PNG by artifact handle.
pub async fn serve_image(
    State(state): State<AppState>,
    Path(filename): Path<String>,
) -> Response {
    let Some(handle) = parse_image_filename(&filename) else {
        return StatusCode::NOT_FOUND.into_response();
    };
    match state.artifacts.get(handle) {
        Some(png) => ([(CONTENT_TYPE, "image/png")], png).into_response(),
        None => StatusCode::NOT_FOUND.into_response(),
    }
}

/// Extract the handle from a `flowchart_<uuid>.png` filename.
pub(crate) fn parse_image_filename(filename: &str) -> Option<Uuid> {
    filename
        .strip_prefix("flowchart_")?
        .strip_suffix(".png")
        .and_then(|raw| Uuid::parse_str(raw).ok())
}

#[cfg(test)]
#[path = "images_test.rs"]
mod tests;
