use std::sync::Arc;

use crate::config::Config;
use crate::feedback::FeedbackProvider;
use crate::screening::InferenceContext;
use crate::storage::UploadStore;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Loaded model artifacts and scoring constants. Read-only for the process lifetime.
    pub inference: Arc<InferenceContext>,
    /// Pluggable feedback provider. Default: `LlmFeedback` when an API key is set.
    pub feedback: Arc<dyn FeedbackProvider>,
    pub uploads: UploadStore,
    pub config: Config,
}
