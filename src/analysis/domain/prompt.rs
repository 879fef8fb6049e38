//! Prompt templates rendered with `minijinja`.

use minijinja::Environment;
use serde::Serialize;
use thiserror::Error;

/// A named prompt template with the fallback text used when analysis fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PromptTemplate {
    name: &'static str,
    source: &'static str,
    fallback: &'static str,
}

/// Error returned when a prompt template cannot be rendered.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("failed to render prompt '{template}': {reason}")]
pub struct PromptRenderError {
    /// Template name.
    pub template: &'static str,
    /// Renderer diagnostic.
    pub reason: String,
}

impl PromptTemplate {
    /// Creates a prompt template.
    #[must_use]
    pub const fn new(name: &'static str, source: &'static str, fallback: &'static str) -> Self {
        Self {
            name,
            source,
            fallback,
        }
    }

    /// Returns the template name.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// Returns the fallback text used when analysis is unavailable.
    #[must_use]
    pub const fn fallback(&self) -> &'static str {
        self.fallback
    }

    /// Renders the template against `context`.
    ///
    /// # Errors
    ///
    /// Returns [`PromptRenderError`] when the template is malformed or the
    /// context cannot be serialized.
    pub fn render<S: Serialize>(&self, context: S) -> Result<String, PromptRenderError> {
        let environment = Environment::new();
        environment
            .render_str(self.source, context)
            .map_err(|error| PromptRenderError {
                template: self.name,
                reason: error.to_string(),
            })
    }
}
