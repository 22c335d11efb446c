//! Router assembly.
//!
//! SYSTEM CONTEXT
//! ==============
//! Three endpoints, one concern each: `/generate` runs the pipeline,
//! `/static/{filename}` serves stored images by handle, `/healthz`
//! answers liveness probes. CORS is wide open because the browser
//! client is served from a different origin.

pub mod generate;
pub mod images;

use axum::Router;
use axum::http::StatusCode;
use axum::routing::{get, post};
use tower_http::cors::{Any, CorsLayer};

use crate::state::AppState;

pub fn app(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/generate", post(generate::generate_flowchart))
        .route("/static/{filename}", get(images::serve_image))
        .route("/healthz", get(healthz))
        .layer(cors)
        .with_state(state)
}

async fn healthz() -> StatusCode {
    StatusCode::OK
}
