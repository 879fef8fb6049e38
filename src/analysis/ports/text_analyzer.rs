//! Text-analysis service port.

use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for text-analysis operations.
pub type AnalysisResult<T> = Result<T, AnalysisError>;

/// Contract of the external text-analysis service.
#[async_trait]
pub trait TextAnalyzer: Send + Sync {
    /// Returns the service's natural-language analysis of `prompt`.
    async fn analyze(&self, prompt: &str) -> AnalysisResult<String>;
}

/// Errors returned by text-analysis adapters.
#[derive(Debug, Clone, Error)]
pub enum AnalysisError {
    /// The service answered with a non-success status code.
    #[error("analysis service returned status {0}")]
    Status(u16),

    /// The service answered without usable analysis text.
    #[error("malformed analysis response: {0}")]
    MalformedResponse(String),

    /// The service could not be reached.
    #[error("error connecting to analysis service: {0}")]
    Transport(Arc<dyn std::error::Error + Send + Sync>),
}

impl AnalysisError {
    /// Wraps a transport error.
    pub fn transport(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Transport(Arc::new(err))
    }
}
