//! Pluggable feedback providers for résumé improvement advice.
//!
//! `AppState` holds an `Arc<dyn FeedbackProvider>`, chosen at startup:
//! `LlmFeedback` when an API key is configured, `DisabledFeedback` otherwise.

use async_trait::async_trait;
use thiserror::Error;
use tracing::warn;

use crate::llm_client::prompts::feedback_prompt;
use crate::llm_client::{LlmClient, LlmError};
use crate::models::role::RoleCategory;

pub const UNAVAILABLE_PREFIX: &str = "AI Feedback currently unavailable: ";

#[derive(Debug, Clone)]
pub struct FeedbackRequest<'a> {
    pub resume_text: &'a str,
    pub role: RoleCategory,
    pub match_percentage: f64,
}

#[derive(Debug, Error)]
pub enum FeedbackError {
    #[error("{0}")]
    Llm(#[from] LlmError),

    #[error("feedback provider is not configured ({0})")]
    NotConfigured(String),

    #[error("{0}")]
    Other(String),
}

#[async_trait]
pub trait FeedbackProvider: Send + Sync {
    async fn feedback(&self, request: &FeedbackRequest<'_>) -> Result<String, FeedbackError>;
}

/// Feedback from a chat-completion model.
pub struct LlmFeedback(pub LlmClient);

#[async_trait]
impl FeedbackProvider for LlmFeedback {
    async fn feedback(&self, request: &FeedbackRequest<'_>) -> Result<String, FeedbackError> {
        let prompt = feedback_prompt(
            request.resume_text,
            request.role.label(),
            request.match_percentage,
        );
        Ok(self.0.complete(&prompt).await?)
    }
}

/// Used when no provider credentials are configured.
pub struct DisabledFeedback {
    pub reason: String,
}

#[async_trait]
impl FeedbackProvider for DisabledFeedback {
    async fn feedback(&self, _request: &FeedbackRequest<'_>) -> Result<String, FeedbackError> {
        Err(FeedbackError::NotConfigured(self.reason.clone()))
    }
}

pub fn unavailable_placeholder(error: &FeedbackError) -> String {
    format!("{UNAVAILABLE_PREFIX}{error}")
}

/// Asks the provider for feedback, degrading to a placeholder on any failure.
pub async fn feedback_or_placeholder(
    provider: &dyn FeedbackProvider,
    request: &FeedbackRequest<'_>,
) -> String {
    match provider.feedback(request).await {
        Ok(text) => text,
        Err(e) => {
            warn!(role = %request.role, "Feedback unavailable: {e}");
            unavailable_placeholder(&e)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FixedFeedback(&'static str);

    #[async_trait]
    impl FeedbackProvider for FixedFeedback {
        async fn feedback(&self, _request: &FeedbackRequest<'_>) -> Result<String, FeedbackError> {
            Ok(self.0.to_string())
        }
    }

    struct FailingFeedback;

    #[async_trait]
    impl FeedbackProvider for FailingFeedback {
        async fn feedback(&self, _request: &FeedbackRequest<'_>) -> Result<String, FeedbackError> {
            Err(FeedbackError::Other("connection reset".to_string()))
        }
    }

    fn request() -> FeedbackRequest<'static> {
        FeedbackRequest {
            resume_text: "python django",
            role: RoleCategory::PythonDeveloper,
            match_percentage: 42.0,
        }
    }

    #[tokio::test]
    async fn test_successful_feedback_is_returned_verbatim() {
        let text = feedback_or_placeholder(&FixedFeedback("- Add Flask"), &request()).await;
        assert_eq!(text, "- Add Flask");
    }

    #[tokio::test]
    async fn test_failure_degrades_to_placeholder() {
        let text = feedback_or_placeholder(&FailingFeedback, &request()).await;
        assert_eq!(text, "AI Feedback currently unavailable: connection reset");
    }

    #[tokio::test]
    async fn test_disabled_provider_reports_reason() {
        let provider = DisabledFeedback {
            reason: "OPENROUTER_API_KEY is not set".to_string(),
        };
        let text = feedback_or_placeholder(&provider, &request()).await;
        assert!(text.starts_with(UNAVAILABLE_PREFIX));
        assert!(text.contains("OPENROUTER_API_KEY"));
    }
}
