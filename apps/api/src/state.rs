use std::sync::Arc;

use crate::analysis::engine::Analyzer;
use crate::config::Config;

/// Shared application state injected into all route handlers via Axum extractors.
/// Everything in here is read-only after startup.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// Pluggable analyzer. Default: `AnalysisEngine` over the startup lexicon.
    pub analyzer: Arc<dyn Analyzer>,
}
