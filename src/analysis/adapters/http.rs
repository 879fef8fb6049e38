//! HTTP adapter for the hosted analysis endpoint.

use crate::analysis::ports::{AnalysisError, AnalysisResult, TextAnalyzer};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Path of the analysis endpoint relative to the backend base URL.
const ANALYZE_PATH: &str = "/api/gemini/analyze";

#[derive(Debug, Serialize)]
struct AnalyzeRequest<'a> {
    text: &'a str,
}

#[derive(Debug, Deserialize)]
struct AnalyzeResponse {
    analysis: Option<String>,
}

/// Analyzer that posts prompts to `{backend}/api/gemini/analyze`.
///
/// The request body is `{"text": <prompt>}`; a 2xx response must carry an
/// `analysis` string field.
#[derive(Debug, Clone)]
pub struct HttpTextAnalyzer {
    client: reqwest::Client,
    endpoint: String,
}

impl HttpTextAnalyzer {
    /// Creates an analyzer for the backend rooted at `base_url`.
    #[must_use]
    pub fn new(base_url: &str) -> Self {
        Self::with_client(reqwest::Client::new(), base_url)
    }

    /// Creates an analyzer using an existing HTTP client.
    #[must_use]
    pub fn with_client(client: reqwest::Client, base_url: &str) -> Self {
        Self {
            client,
            endpoint: format!("{}{ANALYZE_PATH}", base_url.trim_end_matches('/')),
        }
    }
}

#[async_trait]
impl TextAnalyzer for HttpTextAnalyzer {
    async fn analyze(&self, prompt: &str) -> AnalysisResult<String> {
        tracing::debug!(endpoint = %self.endpoint, "requesting analysis");
        let response = self
            .client
            .post(&self.endpoint)
            .json(&AnalyzeRequest { text: prompt })
            .send()
            .await
            .map_err(AnalysisError::transport)?;

        let status = response.status();
        if !status.is_success() {
            return Err(AnalysisError::Status(status.as_u16()));
        }

        let body: AnalyzeResponse = response
            .json()
            .await
            .map_err(|err| AnalysisError::MalformedResponse(err.to_string()))?;
        body.analysis
            .ok_or_else(|| AnalysisError::MalformedResponse("missing 'analysis' field".to_owned()))
    }
}
