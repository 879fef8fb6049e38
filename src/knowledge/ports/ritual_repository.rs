//! Repository port for ritual storage.

use crate::error::ErrorKind;
use crate::knowledge::domain::{Ritual, RitualDraft};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for ritual repository operations.
pub type RitualRepositoryResult<T> = Result<T, RitualRepositoryError>;

/// Append-only ritual storage that owns the ritual sequence.
#[async_trait]
pub trait RitualRepository: Send + Sync {
    /// Numbers `draft` after the rituals already stored and appends it.
    ///
    /// Numbering and appending happen as one step, so concurrent callers
    /// never receive the same number.
    async fn append(&self, draft: RitualDraft) -> RitualRepositoryResult<Ritual>;

    /// Returns every ritual in generation order.
    async fn list(&self) -> RitualRepositoryResult<Vec<Ritual>>;

    /// Returns the number of stored rituals.
    async fn count(&self) -> RitualRepositoryResult<usize>;
}

/// Errors returned by ritual repository implementations.
#[derive(Debug, Clone, Error)]
pub enum RitualRepositoryError {
    /// Storage-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl RitualRepositoryError {
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
