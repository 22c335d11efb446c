//! Runtime configuration, loaded from environment variables.
//!
//! Every knob has a code default; deployments override through
//! `FLOWFORGE_*` variables. Values are parsed leniently: anything
//! unset or unparsable falls back to the default.

use std::time::Duration;

const DEFAULT_INDENT_SPACES: usize = 4;
const DEFAULT_WRAP_CHARS: usize = 24;
const DEFAULT_MAX_NODES: usize = 500;
const DEFAULT_MAX_DEPTH: usize = 32;
const DEFAULT_MAX_INPUT_BYTES: usize = 64 * 1024;
const DEFAULT_CANVAS_MIN_WIDTH: f64 = 3000.0;
const DEFAULT_CANVAS_MIN_HEIGHT: f64 = 2400.0;
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;
const DEFAULT_ARTIFACT_TTL_SECS: u64 = 900;
const DEFAULT_ARTIFACT_CAPACITY: usize = 128;

/// Application configuration shared by every request.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Spaces per indentation level; a leading tab counts as one level.
    pub indent_spaces: usize,
    /// Character budget per wrapped label line.
    pub wrap_chars: usize,
    pub max_nodes: usize,
    /// Deepest permitted nesting level (0-based).
    pub max_depth: usize,
    pub max_input_bytes: usize,
    pub canvas_min_width: f64,
    pub canvas_min_height: f64,
    /// Wall-clock budget for one generation request.
    pub request_timeout: Duration,
    /// How long a rendered image stays retrievable.
    pub artifact_ttl: Duration,
    /// Maximum images retained at once.
    pub artifact_capacity: usize,
    /// Concurrent pipeline runs; defaults to the core count.
    pub render_workers: usize,
}

impl AppConfig {
    #[must_use]
    pub fn from_env() -> Self {
        Self {
            indent_spaces: env_parse("FLOWFORGE_INDENT_SPACES", DEFAULT_INDENT_SPACES),
            wrap_chars: env_parse("FLOWFORGE_WRAP_CHARS", DEFAULT_WRAP_CHARS),
            max_nodes: env_parse("FLOWFORGE_MAX_NODES", DEFAULT_MAX_NODES),
            max_depth: env_parse("FLOWFORGE_MAX_DEPTH", DEFAULT_MAX_DEPTH),
            max_input_bytes: env_parse("FLOWFORGE_MAX_INPUT_BYTES", DEFAULT_MAX_INPUT_BYTES),
            canvas_min_width: env_parse("FLOWFORGE_CANVAS_MIN_WIDTH", DEFAULT_CANVAS_MIN_WIDTH),
            canvas_min_height: env_parse("FLOWFORGE_CANVAS_MIN_HEIGHT", DEFAULT_CANVAS_MIN_HEIGHT),
            request_timeout: Duration::from_secs(env_parse(
                "FLOWFORGE_REQUEST_TIMEOUT_SECS",
                DEFAULT_REQUEST_TIMEOUT_SECS,
            )),
            artifact_ttl: Duration::from_secs(env_parse(
                "FLOWFORGE_ARTIFACT_TTL_SECS",
                DEFAULT_ARTIFACT_TTL_SECS,
            )),
            artifact_capacity: env_parse("FLOWFORGE_ARTIFACT_CAPACITY", DEFAULT_ARTIFACT_CAPACITY),
            render_workers: env_parse("FLOWFORGE_RENDER_WORKERS", default_render_workers()),
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            indent_spaces: DEFAULT_INDENT_SPACES,
            wrap_chars: DEFAULT_WRAP_CHARS,
            max_nodes: DEFAULT_MAX_NODES,
            max_depth: DEFAULT_MAX_DEPTH,
            max_input_bytes: DEFAULT_MAX_INPUT_BYTES,
            canvas_min_width: DEFAULT_CANVAS_MIN_WIDTH,
            canvas_min_height: DEFAULT_CANVAS_MIN_HEIGHT,
            request_timeout: Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
            artifact_ttl: Duration::from_secs(DEFAULT_ARTIFACT_TTL_SECS),
            artifact_capacity: DEFAULT_ARTIFACT_CAPACITY,
            render_workers: default_render_workers(),
        }
    }
}

fn default_render_workers() -> usize {
    std::thread::available_parallelism().map_or(4, std::num::NonZeroUsize::get)
}

fn env_parse<T>(key: &str, default: T) -> T
where
    T: std::str::FromStr + Copy,
{
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse::<T>().ok())
        .unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_ultra_hd_contract() {
        let config = AppConfig::default();
        assert!((config.canvas_min_width - 3000.0).abs() < f64::EPSILON);
        assert!((config.canvas_min_height - 2400.0).abs() < f64::EPSILON);
        assert_eq!(config.indent_spaces, 4);
        assert!(config.render_workers >= 1);
    }
}
