//! Service layer for milestone rituals.

use crate::analysis::{domain::PromptTemplate, ports::TextAnalyzer, services::AnalysisClient};
use crate::error::ErrorKind;
use crate::knowledge::{
    domain::{KnowledgeDomainError, Milestone, Ritual, RitualDraft},
    ports::{RitualRepository, RitualRepositoryError},
};
use minijinja::context;
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;

/// Prompt used to write a ritual document.
pub const RITUAL_PROMPT: PromptTemplate = PromptTemplate::new(
    "ritual",
    "Create a ritual document for this milestone:

Milestone: {{ milestone }}
Context: {{ context }}

Generate a document in the style of previous rituals (Ritual_016.md, etc.) that:
1. Documents the achievement
2. Reflects on lessons learned
3. Sets intentions for future development
4. Maintains the mythic, constellation-themed narrative

Structure the document with appropriate sections and formatting.",
    "Failed to generate ritual",
);

/// Service-level errors for ritual generation.
#[derive(Debug, Error)]
pub enum RitualError {
    /// Input validation failed.
    #[error(transparent)]
    Domain(#[from] KnowledgeDomainError),
    /// Repository operation failed.
    #[error(transparent)]
    Repository(#[from] RitualRepositoryError),
}

impl RitualError {
    /// Returns the broad failure class.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::Domain(err) => err.kind(),
            Self::Repository(err) => err.kind(),
        }
    }
}

/// Result type for ritual service operations.
pub type RitualResult<T> = Result<T, RitualError>;

/// Ritual generation service.
#[derive(Clone)]
pub struct RitualService<R, A, C>
where
    R: RitualRepository,
    A: TextAnalyzer + ?Sized,
    C: Clock + Send + Sync,
{
    repository: Arc<R>,
    analysis: AnalysisClient<A>,
    clock: Arc<C>,
}

impl<R, A, C> RitualService<R, A, C>
where
    R: RitualRepository,
    A: TextAnalyzer + ?Sized,
    C: Clock + Send + Sync,
{
    /// Creates a new ritual service.
    #[must_use]
    pub const fn new(repository: Arc<R>, analysis: AnalysisClient<A>, clock: Arc<C>) -> Self {
        Self {
            repository,
            analysis,
            clock,
        }
    }

    /// Writes and stores the next numbered ritual for `milestone`.
    ///
    /// Every call produces a new ritual, even for an identical milestone.
    ///
    /// # Errors
    ///
    /// Returns [`KnowledgeDomainError::EmptyMilestone`] for a blank milestone,
    /// before the analysis service is called, or [`RitualError::Repository`]
    /// when the store fails.
    pub async fn generate(&self, milestone: &str, ritual_context: &str) -> RitualResult<Ritual> {
        let validated = Milestone::new(milestone)?;
        let content = self
            .analysis
            .analyze(
                &RITUAL_PROMPT,
                context! { milestone => validated.as_str(), context => ritual_context },
            )
            .await;

        let ritual = self
            .repository
            .append(RitualDraft {
                milestone: validated,
                context: ritual_context.to_owned(),
                content,
                timestamp: self.clock.utc(),
            })
            .await?;
        tracing::info!(
            ritual_id = ritual.id(),
            milestone = %ritual.milestone(),
            degraded = ritual.content().is_degraded(),
            "generated ritual"
        );
        Ok(ritual)
    }
}
