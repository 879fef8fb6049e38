//! Error types for knowledge domain validation.

use crate::error::ErrorKind;
use thiserror::Error;

/// Errors returned while constructing knowledge domain values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum KnowledgeDomainError {
    /// Insight content is empty after trimming.
    #[error("content is required")]
    EmptyContent,

    /// Ritual milestone is empty after trimming.
    #[error("milestone is required")]
    EmptyMilestone,
}

impl KnowledgeDomainError {
    /// Returns the broad failure class.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        ErrorKind::InputValidation
    }
}
