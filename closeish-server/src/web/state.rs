//! Application state for the web layer.

use std::sync::Arc;

use crate::directions::RoutesClient;
use crate::pipeline::Pipeline;
use crate::places::PlacesClient;

use super::session::SessionEpochs;

/// Pipeline over the production clients.
pub type LivePipeline = Pipeline<PlacesClient, RoutesClient>;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    /// Candidate fetch, enrichment and ranking
    pub pipeline: Arc<LivePipeline>,

    /// Per-session epoch counters
    pub sessions: Arc<SessionEpochs>,
}

impl AppState {
    /// Create a new app state.
    pub fn new(pipeline: LivePipeline, sessions: SessionEpochs) -> Self {
        Self {
            pipeline: Arc::new(pipeline),
            sessions: Arc::new(sessions),
        }
    }
}
