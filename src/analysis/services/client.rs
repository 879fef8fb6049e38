//! Degrading client over the text-analysis port.

use crate::analysis::{
    domain::{Analysis, PromptTemplate},
    ports::TextAnalyzer,
};
use serde::Serialize;
use std::sync::Arc;

/// Wraps a [`TextAnalyzer`] so that no analysis failure escapes.
///
/// Rendering and collaborator failures become [`Analysis::Degraded`]
/// carrying the template's fallback text and a diagnostic, and are logged at
/// `warn` level.
#[derive(Debug)]
pub struct AnalysisClient<A>
where
    A: TextAnalyzer + ?Sized,
{
    analyzer: Arc<A>,
}

impl<A> Clone for AnalysisClient<A>
where
    A: TextAnalyzer + ?Sized,
{
    fn clone(&self) -> Self {
        Self {
            analyzer: Arc::clone(&self.analyzer),
        }
    }
}

impl<A> AnalysisClient<A>
where
    A: TextAnalyzer + ?Sized,
{
    /// Creates a client over `analyzer`.
    #[must_use]
    pub const fn new(analyzer: Arc<A>) -> Self {
        Self { analyzer }
    }

    /// Renders `template` against `context` and analyzes the result.
    pub async fn analyze<S: Serialize>(&self, template: &PromptTemplate, context: S) -> Analysis {
        let prompt = match template.render(context) {
            Ok(prompt) => prompt,
            Err(error) => {
                tracing::warn!(template = template.name(), %error, "prompt rendering failed");
                return Analysis::degraded(template.fallback(), error.to_string());
            }
        };

        match self.analyzer.analyze(&prompt).await {
            Ok(text) => Analysis::generated(text),
            Err(error) => {
                tracing::warn!(
                    template = template.name(),
                    %error,
                    "analysis unavailable, using fallback"
                );
                Analysis::degraded(template.fallback(), error.to_string())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::AnalysisClient;
    use crate::analysis::{
        adapters::ScriptedTextAnalyzer,
        domain::{Analysis, PromptTemplate},
    };
    use minijinja::context;
    use rstest::rstest;
    use std::sync::Arc;

    const SUMMARY: PromptTemplate =
        PromptTemplate::new("summary", "Summarise {{ topic }}", "Summary failed");

    #[rstest]
    #[tokio::test]
    async fn successful_analysis_is_generated() {
        let analyzer = Arc::new(ScriptedTextAnalyzer::replying("a fine summary"));
        let client = AnalysisClient::new(Arc::clone(&analyzer));

        let analysis = client.analyze(&SUMMARY, context! { topic => "routers" }).await;

        assert_eq!(analysis, Analysis::generated("a fine summary"));
        assert_eq!(
            analyzer.prompts().expect("prompts readable"),
            vec!["Summarise routers".to_owned()]
        );
    }

    #[rstest]
    #[case(ScriptedTextAnalyzer::failing_with_status(503))]
    #[case(ScriptedTextAnalyzer::unreachable("connection refused"))]
    #[tokio::test]
    async fn collaborator_failure_degrades_to_fallback(#[case] analyzer: ScriptedTextAnalyzer) {
        let client = AnalysisClient::new(Arc::new(analyzer));

        let analysis = client.analyze(&SUMMARY, context! { topic => "routers" }).await;

        assert!(analysis.is_degraded());
        assert_eq!(analysis.text(), "Summary failed");
        assert!(analysis.degradation_reason().is_some());
    }

    #[rstest]
    #[tokio::test]
    async fn render_failure_degrades_without_calling_service() {
        let analyzer = Arc::new(ScriptedTextAnalyzer::echo());
        let client = AnalysisClient::new(Arc::clone(&analyzer));
        let broken = PromptTemplate::new("broken", "{% for %}", "Broken fallback");

        let analysis = client.analyze(&broken, context! {}).await;

        assert_eq!(analysis.text(), "Broken fallback");
        assert!(analyzer.prompts().expect("prompts readable").is_empty());
    }
}
