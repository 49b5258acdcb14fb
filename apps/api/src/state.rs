use std::sync::Arc;

use crate::classifier::ModelContext;
use crate::config::Config;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Vectorizer and classifier, loaded once at startup and read-only after.
    pub models: Arc<ModelContext>,
    pub config: Config,
}
