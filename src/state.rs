//! Shared application state.
//!
//! DESIGN
//! ======
//! `AppState` is injected into Axum handlers via the `State` extractor.
//! It carries the immutable configuration, the artifact store, and the
//! render permit pool. Per-request pipeline state never lives here —
//! each generation owns its own progress value, so concurrent requests
//! cannot observe each other.

use std::sync::Arc;

use tokio::sync::Semaphore;

use crate::artifact::ArtifactStore;
use crate::config::AppConfig;

/// Shared application state. Clone is required by Axum — all inner
/// fields are Arc-wrapped or cheaply cloneable.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub artifacts: ArtifactStore,
    /// Bounds concurrent pipeline runs to the configured worker count.
    pub render_permits: Arc<Semaphore>,
}

impl AppState {
    #[must_use]
    pub fn new(config: AppConfig) -> Self {
        let artifacts = ArtifactStore::new(config.artifact_ttl, config.artifact_capacity);
        let render_permits = Arc::new(Semaphore::new(config.render_workers.max(1)));
        Self { config: Arc::new(config), artifacts, render_permits }
    }
}

// =============================================================================
// TEST HELPERS
// =============================================================================


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_state_has_no_artifacts() {
        let state = test_helpers::test_app_state();
        assert!(state.artifacts.is_empty());
    }

    #[test]
    fn permit_pool_matches_configured_workers() {
        let config = AppConfig { render_workers: 3, ..AppConfig::default() };
        let state = AppState::new(config);
        assert_eq!(state.render_permits.available_permits(), 3);
    }

    #[test]
    fn zero_workers_still_grants_one_permit() {
        let config = AppConfig { render_workers: 0, ..AppConfig::default() };
        let state = AppState::new(config);
        assert_eq!(state.render_permits.available_permits(), 1);
    }
}
