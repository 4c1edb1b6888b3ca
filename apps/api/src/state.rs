use std::sync::Arc;

use crate::config::Config;
use crate::extraction::engine::SkillEngine;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Immutable after startup; every request borrows the same ontology and tagger.
    pub engine: Arc<SkillEngine>,
    pub config: Config,
}
