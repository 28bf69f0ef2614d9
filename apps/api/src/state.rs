use std::sync::Arc;

use crate::analysis::Analyzer;
use crate::config::Config;
use crate::upload::UploadPolicy;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Stateless between calls; shared across request tasks.
    pub analyzer: Arc<Analyzer>,
    pub upload_policy: UploadPolicy,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        Self {
            analyzer: Arc::new(Analyzer::new(config.analysis_config())),
            upload_policy: config.upload_policy(),
        }
    }
}
