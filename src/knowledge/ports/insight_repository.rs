//! Repository port for insight storage.

use crate::error::ErrorKind;
use crate::knowledge::domain::{Insight, UpsertOutcome};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for insight repository operations.
pub type InsightRepositoryResult<T> = Result<T, InsightRepositoryError>;

/// Insertion-ordered insight storage keyed by [`Insight::id`].
#[async_trait]
pub trait InsightRepository: Send + Sync {
    /// Stores `insight`, replacing any record with the same identity in place.
    ///
    /// A replaced record keeps its position in the insertion order.
    async fn upsert(&self, insight: &Insight) -> InsightRepositoryResult<UpsertOutcome>;

    /// Returns every insight in insertion order.
    async fn list(&self) -> InsightRepositoryResult<Vec<Insight>>;

    /// Returns the number of stored insights.
    async fn count(&self) -> InsightRepositoryResult<usize>;
}

/// Errors returned by insight repository implementations.
#[derive(Debug, Clone, Error)]
pub enum InsightRepositoryError {
    /// Storage-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl InsightRepositoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }

    /// Returns the broad failure class.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::Persistence(_) => ErrorKind::Storage,
        }
    }
}
