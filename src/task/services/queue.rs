//! Service layer for queueing tasks from source issues.

use crate::error::ErrorKind;
use crate::task::{
    domain::{RepositorySlug, SourceIssue, Task, TaskId, TaskStatusCounts},
    ports::{IssueSource, IssueSourceError, TaskRepository, TaskRepositoryError},
};
use mockable::Clock;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use thiserror::Error;

/// Number of most recently queued tasks included in a [`QueueStatus`].
pub const RECENT_TASK_LIMIT: usize = 10;

/// Service-level errors for queue operations.
#[derive(Debug, Error)]
pub enum TaskQueueError {
    /// The issue source failed.
    #[error(transparent)]
    IssueSource(#[from] IssueSourceError),
    /// Repository operation failed.
    #[error(transparent)]
    Repository(#[from] TaskRepositoryError),
}

impl TaskQueueError {
    /// Returns the broad failure class.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::IssueSource(err) => err.kind(),
            Self::Repository(err) => err.kind(),
        }
    }
}

/// Result type for queue service operations.
pub type TaskQueueResult<T> = Result<T, TaskQueueError>;

/// Snapshot of the queue: status counts and the latest tasks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueueStatus {
    /// Number of tasks in each status.
    #[serde(flatten)]
    pub counts: TaskStatusCounts,
    /// The last [`RECENT_TASK_LIMIT`] tasks, most recently queued last.
    pub tasks: Vec<Task>,
}

/// Task queue orchestration service.
#[derive(Clone)]
pub struct TaskQueueService<R, C>
where
    R: TaskRepository,
    C: Clock + Send + Sync,
{
    repository: Arc<R>,
    clock: Arc<C>,
}

impl<R, C> TaskQueueService<R, C>
where
    R: TaskRepository,
    C: Clock + Send + Sync,
{
    /// Creates a new queue service.
    #[must_use]
    pub const fn new(repository: Arc<R>, clock: Arc<C>) -> Self {
        Self { repository, clock }
    }

    /// Queues a pending task for every issue that is neither a pull request
    /// nor already queued.
    ///
    /// Returns only the tasks added by this call; a batch of already-known
    /// issues yields an empty list.
    ///
    /// # Errors
    ///
    /// Returns [`TaskQueueError::Repository`] when the store fails.
    pub async fn ingest(&self, issues: &[SourceIssue]) -> TaskQueueResult<Vec<Task>> {
        let mut queued = Vec::new();
        for issue in issues.iter().filter(|issue| !issue.is_pull_request()) {
            let task = Task::queue(issue, &*self.clock);
            if self.repository.insert_if_absent(&task).await? {
                queued.push(task);
            }
        }
        tracing::info!(
            offered = issues.len(),
            queued = queued.len(),
            "ingested source issues"
        );
        Ok(queued)
    }

    /// Fetches the open issues of `repository` and queues them.
    ///
    /// # Errors
    ///
    /// Returns [`TaskQueueError::IssueSource`] when the listing fails; no
    /// task is queued in that case.
    pub async fn queue_open_issues<S>(
        &self,
        source: &S,
        repository: &RepositorySlug,
    ) -> TaskQueueResult<Vec<Task>>
    where
        S: IssueSource + ?Sized,
    {
        let issues = source.list_open_issues(repository).await?;
        self.ingest(&issues).await
    }

    /// Returns the status counts and the most recent tasks.
    ///
    /// # Errors
    ///
    /// Returns [`TaskQueueError::Repository`] when the store fails.
    pub async fn status(&self) -> TaskQueueResult<QueueStatus> {
        let tasks = self.repository.list().await?;
        let counts = TaskStatusCounts::tally(&tasks);
        let recent = tasks
            .into_iter()
            .rev()
            .take(RECENT_TASK_LIMIT)
            .collect::<Vec<_>>()
            .into_iter()
            .rev()
            .collect();
        Ok(QueueStatus {
            counts,
            tasks: recent,
        })
    }

    /// Retrieves a task by identifier.
    ///
    /// # Errors
    ///
    /// Returns [`TaskQueueError::Repository`] when the lookup fails.
    pub async fn find(&self, id: &TaskId) -> TaskQueueResult<Option<Task>> {
        Ok(self.repository.find_by_id(id).await?)
    }
}
