//! Tests for the generation route.

use std::time::Duration;

use axum::extract::{Json, State};
use axum::http::StatusCode;

use crate::config::AppConfig;
use crate::flowchart::parse::ParseError;
use crate::flowchart::render::RenderError;
use crate::flowchart::tree::TreeError;
use crate::services::generate::GenerateError;
use crate::state::test_helpers::test_app_state_with;

use super::{GenerateBody, generate_error_to_status, generate_flowchart};

#[test]
fn document_errors_map_to_bad_request() {
    assert_eq!(
        generate_error_to_status(&GenerateError::Empty(TreeError::EmptyDocument)),
        StatusCode::BAD_REQUEST
    );
    assert_eq!(
        generate_error_to_status(&GenerateError::Malformed(ParseError::MalformedIndentation {
            line: 2,
            found: 3,
            allowed: 1,
        })),
        StatusCode::BAD_REQUEST
    );
    assert_eq!(
        generate_error_to_status(&GenerateError::TooManyNodes { actual: 10, limit: 5 }),
        StatusCode::BAD_REQUEST
    );
}

#[test]
fn resource_errors_map_to_server_statuses() {
    assert_eq!(
        generate_error_to_status(&GenerateError::Saturated),
        StatusCode::SERVICE_UNAVAILABLE
    );
    assert_eq!(
        generate_error_to_status(&GenerateError::Timeout(Duration::from_secs(30))),
        StatusCode::GATEWAY_TIMEOUT
    );
    assert_eq!(
        generate_error_to_status(&GenerateError::Render(RenderError::CanvasTooLarge {
            width: 90_000,
            height: 90_000,
        })),
        StatusCode::INTERNAL_SERVER_ERROR
    );
    assert_eq!(
        generate_error_to_status(&GenerateError::Internal("boom".into())),
        StatusCode::INTERNAL_SERVER_ERROR
    );
}

#[test]
fn request_body_deserializes() {
    let body: GenerateBody = serde_json::from_str(r#"{"text":"Root\n    A"}"#).unwrap();
    assert_eq!(body.text, "Root\n    A");
}

#[tokio::test]
async fn handler_returns_the_client_contract_on_success() {
    let state = test_app_state_with(AppConfig {
        canvas_min_width: 400.0,
        canvas_min_height: 300.0,
        ..AppConfig::default()
    });
    let response = generate_flowchart(
        State(state),
        Json(GenerateBody { text: "Root\n    A\n    B".to_owned() }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(json["success"], serde_json::json!(true));
    assert_eq!(json["nodes"], serde_json::json!(3));
    assert_eq!(json["edges"], serde_json::json!(2));
    assert!(json["image_url"].as_str().unwrap().starts_with("/static/flowchart_"));
    assert!(json["mermaid"].as_str().unwrap().starts_with("graph TD"));
}

#[tokio::test]
async fn handler_returns_the_failure_contract_on_bad_input() {
    let state = test_app_state_with(AppConfig {
        canvas_min_width: 400.0,
        canvas_min_height: 300.0,
        ..AppConfig::default()
    });
    let response = generate_flowchart(State(state), Json(GenerateBody { text: String::new() })).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(json["success"], serde_json::json!(false));
    assert!(!json["error"].as_str().unwrap().is_empty());
}
