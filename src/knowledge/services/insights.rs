//! Service layer for ingesting and searching insights.

use crate::analysis::{domain::PromptTemplate, ports::TextAnalyzer, services::AnalysisClient};
use crate::error::ErrorKind;
use crate::knowledge::{
    domain::{Insight, InsightParams, KnowledgeDomainError, Metadata, Tag, UpsertOutcome},
    ports::{InsightRepository, InsightRepositoryError},
};
use minijinja::context;
use mockable::Clock;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::sync::Arc;
use thiserror::Error;

/// Prompt used to extract insights from development content.
pub const INSIGHT_PROMPT: PromptTemplate = PromptTemplate::new(
    "insight_extraction",
    "Extract key insights, lessons learned, and best practices from this development content:

Source: {{ source }}
Content: {{ content }}

Focus on:
1. Technical patterns or solutions
2. Problems encountered and solutions
3. Code quality improvements
4. Development process optimizations
5. Architectural decisions

Provide insights in a structured format.",
    "Failed to analyze content",
);

/// Source label used when an ingest request names none.
pub const DEFAULT_SOURCE: &str = "unknown";

/// Number of results returned by a search that sets no limit.
pub const DEFAULT_SEARCH_LIMIT: usize = 10;

/// Service-level errors for insight operations.
#[derive(Debug, Error)]
pub enum KnowledgeError {
    /// Input validation failed.
    #[error(transparent)]
    Domain(#[from] KnowledgeDomainError),
    /// Repository operation failed.
    #[error(transparent)]
    Repository(#[from] InsightRepositoryError),
}

impl KnowledgeError {
    /// Returns the broad failure class.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::Domain(err) => err.kind(),
            Self::Repository(err) => err.kind(),
        }
    }
}

/// Result type for insight service operations.
pub type KnowledgeResult<T> = Result<T, KnowledgeError>;

/// Content submitted for ingestion.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IngestRequest {
    /// Development content to analyse.
    pub content: String,
    /// Origin label; [`DEFAULT_SOURCE`] when absent.
    #[serde(default)]
    pub source: Option<String>,
    /// Caller-supplied metadata.
    #[serde(default)]
    pub metadata: Metadata,
}

impl IngestRequest {
    /// Creates a request for `content` with no source or metadata.
    #[must_use]
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            ..Self::default()
        }
    }

    /// Sets the origin label.
    #[must_use]
    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    /// Sets the metadata.
    #[must_use]
    pub fn with_metadata(mut self, metadata: Metadata) -> Self {
        self.metadata = metadata;
        self
    }
}

/// An ingested insight and whether it was new.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IngestedInsight {
    /// Whether the insight was added or replaced an existing record.
    pub status: UpsertOutcome,
    /// The stored insight.
    pub insight: Insight,
}

/// Search parameters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchQuery {
    /// Case-insensitive substring matched against content and analysis.
    pub query: String,
    /// Tags of which a result must carry at least one; empty means any.
    #[serde(default)]
    pub tags: BTreeSet<Tag>,
    /// Maximum number of results.
    #[serde(default = "default_limit")]
    pub limit: usize,
}

const fn default_limit() -> usize {
    DEFAULT_SEARCH_LIMIT
}

impl SearchQuery {
    /// Creates a query with no tag filter and the default limit.
    #[must_use]
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            tags: BTreeSet::new(),
            limit: DEFAULT_SEARCH_LIMIT,
        }
    }

    /// Restricts results to insights carrying any of `tags`.
    #[must_use]
    pub fn with_tags(mut self, tags: impl IntoIterator<Item = Tag>) -> Self {
        self.tags = tags.into_iter().collect();
        self
    }

    /// Sets the maximum number of results.
    #[must_use]
    pub const fn with_limit(mut self, limit: usize) -> Self {
        self.limit = limit;
        self
    }
}

/// Ordered search results.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResults {
    /// Query text as submitted.
    pub query: String,
    /// Tag filter as submitted.
    pub tags: BTreeSet<Tag>,
    /// Matching insights, most recent first.
    pub results: Vec<Insight>,
    /// Number of insights in `results`.
    pub total_results: usize,
}

/// Insight ingestion and search service.
#[derive(Clone)]
pub struct KnowledgeService<R, A, C>
where
    R: InsightRepository,
    A: TextAnalyzer + ?Sized,
    C: Clock + Send + Sync,
{
    repository: Arc<R>,
    analysis: AnalysisClient<A>,
    clock: Arc<C>,
}

impl<R, A, C> KnowledgeService<R, A, C>
where
    R: InsightRepository,
    A: TextAnalyzer + ?Sized,
    C: Clock + Send + Sync,
{
    /// Creates a new knowledge service.
    #[must_use]
    pub const fn new(repository: Arc<R>, analysis: AnalysisClient<A>, clock: Arc<C>) -> Self {
        Self {
            repository,
            analysis,
            clock,
        }
    }

    /// Analyses, tags and stores content.
    ///
    /// Content from the same source sharing its first 100 characters with a
    /// stored insight replaces that insight in place. An unavailable analysis
    /// service degrades the stored analysis instead of failing the call.
    ///
    /// # Errors
    ///
    /// Returns [`KnowledgeDomainError::EmptyContent`] for blank content,
    /// before the analysis service is called, or
    /// [`KnowledgeError::Repository`] when the store fails.
    pub async fn ingest(&self, request: IngestRequest) -> KnowledgeResult<IngestedInsight> {
        if request.content.trim().is_empty() {
            return Err(KnowledgeDomainError::EmptyContent.into());
        }

        let source = request
            .source
            .filter(|source| !source.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_SOURCE.to_owned());
        let analysis = self
            .analysis
            .analyze(
                &INSIGHT_PROMPT,
                context! { source => &source, content => &request.content },
            )
            .await;

        let insight = Insight::new(
            InsightParams {
                source,
                content: request.content,
                analysis,
                metadata: request.metadata,
            },
            &*self.clock,
        )?;
        let status = self.repository.upsert(&insight).await?;
        tracing::info!(
            insight_id = %insight.id(),
            source = insight.source(),
            ?status,
            degraded = insight.insights().is_degraded(),
            "stored insight"
        );
        Ok(IngestedInsight { status, insight })
    }

    /// Returns insights matching `query`, most recent first.
    ///
    /// Insights with equal timestamps keep their insertion order.
    ///
    /// # Errors
    ///
    /// Returns [`KnowledgeError::Repository`] when the store fails.
    pub async fn search(&self, query: &SearchQuery) -> KnowledgeResult<SearchResults> {
        let needle = query.query.to_lowercase();
        let mut results: Vec<Insight> = self
            .repository
            .list()
            .await?
            .into_iter()
            .filter(|insight| insight.mentions(&needle) && insight.has_any_tag(&query.tags))
            .collect();
        results.sort_by(|left, right| right.timestamp().cmp(&left.timestamp()));
        results.truncate(query.limit);

        Ok(SearchResults {
            query: query.query.clone(),
            tags: query.tags.clone(),
            total_results: results.len(),
            results,
        })
    }
}
