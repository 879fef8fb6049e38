//! Repository port for task storage and lookup.

use crate::error::ErrorKind;
use crate::task::domain::{Task, TaskId, TaskStatusKind};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for task repository operations.
pub type TaskRepositoryResult<T> = Result<T, TaskRepositoryError>;

/// Insertion-ordered task storage contract.
#[async_trait]
pub trait TaskRepository: Send + Sync {
    /// Appends `task` unless a task with the same identifier exists.
    ///
    /// Returns `true` when the task was stored, `false` when an existing task
    /// kept its place untouched.
    async fn insert_if_absent(&self, task: &Task) -> TaskRepositoryResult<bool>;

    /// Replaces an existing task in place, keeping its position.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::NotFound`] when the task does not exist.
    async fn update(&self, task: &Task) -> TaskRepositoryResult<()>;

    /// Replaces an existing task only while its stored status is `expected`.
    ///
    /// Returns `false` without modifying anything when the stored status
    /// differs, so two executions cannot both claim the same pending task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::NotFound`] when the task does not exist.
    async fn update_if_status(
        &self,
        task: &Task,
        expected: TaskStatusKind,
    ) -> TaskRepositoryResult<bool>;

    /// Finds a task by identifier.
    ///
    /// Returns `None` when the task does not exist.
    async fn find_by_id(&self, id: &TaskId) -> TaskRepositoryResult<Option<Task>>;

    /// Returns every task in insertion order.
    async fn list(&self) -> TaskRepositoryResult<Vec<Task>>;
}

/// Errors returned by task repository implementations.
#[derive(Debug, Clone, Error)]
pub enum TaskRepositoryError {
    /// The task was not found.
    #[error("task not found: {0}")]
    NotFound(TaskId),

    /// Storage-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl TaskRepositoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }

    /// Returns the broad failure class.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::NotFound(_) => ErrorKind::NotFound,
            Self::Persistence(_) => ErrorKind::Storage,
        }
    }
}
