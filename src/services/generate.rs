//! Generation orchestrator — drives the compile pipeline per request.
//!
//! DESIGN
//! ======
//! Each request owns a local progress value that walks the stage
//! machine `Received → Parsing → Lowering → LayingOut → Rendering →
//! Completed | Failed`. Input limits are enforced before the expensive
//! stages: the byte ceiling before parsing, the node and depth ceilings
//! after lowering but before layout and raster work.
//!
//! The pipeline is pure CPU, so it runs on a blocking worker under a
//! semaphore sized to the configured worker count. Saturation rejects
//! the request immediately — bounded work, never an unbounded queue.
//!
//! ERROR HANDLING
//! ==============
//! A failed or timed-out run stores nothing: the artifact insert only
//! happens after the pipeline returns, so partial images are never
//! retrievable. A timed-out blocking task finishes in the background
//! and its output is dropped.

use std::time::Duration;

use uuid::Uuid;

use crate::artifact::ArtifactError;
use crate::config::AppConfig;
use crate::flowchart::emit::emit_mermaid;
use crate::flowchart::graph::{self, Graph};
use crate::flowchart::layout::{LayoutOptions, layout};
use crate::flowchart::parse::{self, ParseError};
use crate::flowchart::render::{self, RenderError, RenderedImage};
use crate::flowchart::tree::{self, TreeError};
use crate::state::AppState;

// =============================================================================
// STAGES
// =============================================================================

/// Lifecycle of one generation request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Received,
    Parsing,
    Lowering,
    LayingOut,
    Rendering,
    Completed,
    Failed,
}

impl Stage {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Received => "received",
            Self::Parsing => "parsing",
            Self::Lowering => "lowering",
            Self::LayingOut => "laying_out",
            Self::Rendering => "rendering",
            Self::Completed => "completed",
            Self::Failed => "failed",
        }
    }
}

/// Per-request progress. A local value, never shared across requests.
struct Progress {
    request_id: Uuid,
    stage: Stage,
}

impl Progress {
    fn new(request_id: Uuid) -> Self {
        Self { request_id, stage: Stage::Received }
    }

    fn advance(&mut self, next: Stage) {
        tracing::debug!(request_id = %self.request_id, from = self.stage.as_str(), to = next.as_str(), "stage");
        self.stage = next;
    }
}

// =============================================================================
// ERRORS
// =============================================================================

#[derive(Debug, thiserror::Error)]
pub enum GenerateError {
    #[error(transparent)]
    Malformed(#[from] ParseError),
    #[error(transparent)]
    Empty(#[from] TreeError),
    #[error("input is {actual} bytes; the limit is {limit}")]
    InputTooLarge { actual: usize, limit: usize },
    #[error("diagram has {actual} nodes; the limit is {limit}")]
    TooManyNodes { actual: usize, limit: usize },
    #[error("diagram reaches depth {actual}; the limit is {limit}")]
    TooDeep { actual: usize, limit: usize },
    #[error(transparent)]
    Render(#[from] RenderError),
    #[error("generation exceeded the {}s time budget", .0.as_secs())]
    Timeout(Duration),
    #[error("server is at capacity; try again shortly")]
    Saturated,
    #[error("internal error: {0}")]
    Internal(String),
}

// =============================================================================
// PIPELINE
// =============================================================================

/// Everything a completed pipeline run produces.
#[derive(Debug)]
pub struct GenerationOutcome {
    pub node_count: usize,
    pub edge_count: usize,
    pub mermaid: String,
    pub image: RenderedImage,
}

/// What the caller receives once the image is stored.
#[derive(Debug, Clone)]
pub struct GenerateResult {
    pub image_url: String,
    pub node_count: usize,
    pub edge_count: usize,
    pub mermaid: String,
}

/// Run the synchronous pipeline for one request.
///
/// # Errors
///
/// Returns the first stage error; later stages are never entered.
pub fn run_pipeline(
    config: &AppConfig,
    request_id: Uuid,
    text: &str,
) -> Result<GenerationOutcome, GenerateError> {
    let mut progress = Progress::new(request_id);
    let result = drive(config, &mut progress, text);
    match &result {
        Ok(outcome) => {
            progress.advance(Stage::Completed);
            tracing::info!(
                request_id = %request_id,
                nodes = outcome.node_count,
                edges = outcome.edge_count,
                image_bytes = outcome.image.png.len(),
                "generation completed"
            );
        }
        Err(err) => {
            progress.advance(Stage::Failed);
            tracing::warn!(request_id = %request_id, error = %err, "generation failed");
        }
    }
    result
}

fn drive(
    config: &AppConfig,
    progress: &mut Progress,
    text: &str,
) -> Result<GenerationOutcome, GenerateError> {
    if text.len() > config.max_input_bytes {
        return Err(GenerateError::InputTooLarge { actual: text.len(), limit: config.max_input_bytes });
    }

    progress.advance(Stage::Parsing);
    let lines = parse::parse(text, config.indent_spaces)?;
    let forest = tree::build_forest(&lines)?;

    progress.advance(Stage::Lowering);
    let graph = graph::lower(&forest, config.wrap_chars);
    check_graph_limits(&graph, config)?;

    progress.advance(Stage::LayingOut);
    let options = LayoutOptions {
        canvas_min_width: config.canvas_min_width,
        canvas_min_height: config.canvas_min_height,
    };
    let diagram = layout(graph, &options);
    let mermaid = emit_mermaid(&diagram);

    progress.advance(Stage::Rendering);
    let image = render::render_png(&diagram, config.wrap_chars)?;

    Ok(GenerationOutcome {
        node_count: diagram.nodes.len(),
        edge_count: diagram.edges.len(),
        mermaid,
        image,
    })
}

fn check_graph_limits(graph: &Graph, config: &AppConfig) -> Result<(), GenerateError> {
    if graph.nodes.len() > config.max_nodes {
        return Err(GenerateError::TooManyNodes { actual: graph.nodes.len(), limit: config.max_nodes });
    }
    let deepest = graph.nodes.iter().map(|n| n.depth).max().unwrap_or(0);
    if deepest > config.max_depth {
        return Err(GenerateError::TooDeep { actual: deepest, limit: config.max_depth });
    }
    Ok(())
}

// =============================================================================
// REQUEST ENTRY POINT
// =============================================================================

/// Generate a flowchart for one request: admission control, blocking
/// pipeline execution under the time budget, artifact storage.
///
/// # Errors
///
/// Returns [`GenerateError::Saturated`] when no worker permit is free,
/// [`GenerateError::Timeout`] when the wall-clock budget lapses, or the
/// pipeline's own error.
pub async fn generate(state: &AppState, text: String) -> Result<GenerateResult, GenerateError> {
    let Ok(_permit) = state.render_permits.try_acquire() else {
        return Err(GenerateError::Saturated);
    };

    let request_id = Uuid::new_v4();
    let config = state.config.clone();
    let worker = tokio::task::spawn_blocking(move || run_pipeline(&config, request_id, &text));

    let outcome = match tokio::time::timeout(state.config.request_timeout, worker).await {
        Err(_) => return Err(GenerateError::Timeout(state.config.request_timeout)),
        Ok(Err(join)) => return Err(GenerateError::Internal(join.to_string())),
        Ok(Ok(result)) => result?,
    };

    state
        .artifacts
        .insert(request_id, outcome.image.png)
        .map_err(|err| match err {
            ArtifactError::Saturated { .. } => GenerateError::Saturated,
            other @ ArtifactError::DuplicateHandle(_) => GenerateError::Internal(other.to_string()),
        })?;

    Ok(GenerateResult {
        image_url: image_url(request_id),
        node_count: outcome.node_count,
        edge_count: outcome.edge_count,
        mermaid: outcome.mermaid,
    })
}

/// The retrievable handle for a stored image.
#[must_use]
pub fn image_url(handle: Uuid) -> String {
    format!("/static/flowchart_{handle}.png")
}

#[cfg(test)]
#[path = "generate_test.rs"]
mod tests;
