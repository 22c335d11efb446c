//! Flowchart generation route.

use axum::extract::{Json, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};

use crate::services::generate::{self, GenerateError};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct GenerateBody {
    pub text: String,
}

#[derive(Debug, Serialize)]
pub struct GenerateResponse {
    pub success: bool,
    pub image_url: String,
    pub nodes: usize,
    pub edges: usize,
    pub mermaid: String,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub error: String,
}

/// `POST /generate` — compile indented text into a flowchart.
pub async fn generate_flowchart(
    State(state): State<AppState>,
    Json(body): Json<GenerateBody>,
) -> Response {
    match generate::generate(&state, body.text).await {
        Ok(result) => Json(GenerateResponse {
            success: true,
            image_url: result.image_url,
            nodes: result.node_count,
            edges: result.edge_count,
            mermaid: result.mermaid,
        })
        .into_response(),
        Err(err) => {
            let status = generate_error_to_status(&err);
            (status, Json(ErrorResponse { success: false, error: err.to_string() })).into_response()
        }
    }
}

pub(crate) fn generate_error_to_status(err: &GenerateError) -> StatusCode {
    match err {
        GenerateError::Malformed(_)
        | GenerateError::Empty(_)
        | GenerateError::InputTooLarge { .. }
        | GenerateError::TooManyNodes { .. }
        | GenerateError::TooDeep { .. } => StatusCode::BAD_REQUEST,
        GenerateError::Saturated => StatusCode::SERVICE_UNAVAILABLE,
        GenerateError::Timeout(_) => StatusCode::GATEWAY_TIMEOUT,
        GenerateError::Render(_) | GenerateError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

#[cfg(test)]
#[path = "generate_test.rs"]
mod tests;
