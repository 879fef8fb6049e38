//! Error types for task domain validation and state transitions.

use super::{TaskId, TaskStatusKind};
use crate::error::ErrorKind;
use thiserror::Error;

/// Errors returned while constructing or transitioning domain task values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TaskDomainError {
    /// The task identifier is empty after trimming.
    #[error("task identifier must not be empty")]
    EmptyTaskId,

    /// The repository identity is not `owner/name`.
    #[error("invalid repository '{0}', expected owner/name")]
    InvalidRepository(String),

    /// The issue number is invalid.
    #[error("invalid issue number {0}, expected a positive integer")]
    InvalidIssueNumber(u64),

    /// The issue title is empty after trimming.
    #[error("issue title must not be empty")]
    EmptyIssueTitle,

    /// The branch name is empty, malformed or too long.
    #[error("invalid branch name: {0}")]
    InvalidBranchName(String),

    /// The commit identifier is empty or not hexadecimal.
    #[error("invalid commit sha: {0}")]
    InvalidCommitSha(String),

    /// The task is not in a state that permits the requested transition.
    #[error("task {task_id} cannot move from {from} to {to}")]
    InvalidStateTransition {
        /// Task whose transition was rejected.
        task_id: TaskId,
        /// Current status.
        from: TaskStatusKind,
        /// Requested status.
        to: TaskStatusKind,
    },
}

impl TaskDomainError {
    /// Returns the broad failure class.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidStateTransition { .. } => ErrorKind::State,
            Self::EmptyTaskId
            | Self::InvalidRepository(_)
            | Self::InvalidIssueNumber(_)
            | Self::EmptyIssueTitle
            | Self::InvalidBranchName(_)
            | Self::InvalidCommitSha(_) => ErrorKind::InputValidation,
        }
    }
}
