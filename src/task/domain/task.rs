//! Task aggregate root and lifecycle status types.

use super::{BranchName, IssueNumber, SourceIssue, TaskDomainError, TaskId};
use crate::analysis::domain::Analysis;
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Task lifecycle status.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum TaskStatus {
    /// Task has been queued but execution has not started.
    Pending,
    /// Task execution is running.
    InProgress,
    /// Task execution finished and its branch exists.
    Completed,
    /// Task execution stopped.
    Failed {
        /// Diagnostic describing the failure.
        #[serde(rename = "error")]
        reason: String,
    },
}

impl TaskStatus {
    /// Returns the payload-free status discriminant.
    #[must_use]
    pub const fn kind(&self) -> TaskStatusKind {
        match self {
            Self::Pending => TaskStatusKind::Pending,
            Self::InProgress => TaskStatusKind::InProgress,
            Self::Completed => TaskStatusKind::Completed,
            Self::Failed { .. } => TaskStatusKind::Failed,
        }
    }
}

/// Payload-free task status, used for counting and diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatusKind {
    /// See [`TaskStatus::Pending`].
    Pending,
    /// See [`TaskStatus::InProgress`].
    InProgress,
    /// See [`TaskStatus::Completed`].
    Completed,
    /// See [`TaskStatus::Failed`].
    Failed,
}

impl TaskStatusKind {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::InProgress => "in_progress",
            Self::Completed => "completed",
            Self::Failed => "failed",
        }
    }
}

impl fmt::Display for TaskStatusKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Number of tasks in each status.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskStatusCounts {
    /// Total number of tasks.
    pub total_tasks: usize,
    /// Tasks awaiting execution.
    pub pending: usize,
    /// Tasks currently executing.
    pub in_progress: usize,
    /// Tasks that completed.
    pub completed: usize,
    /// Tasks that failed.
    pub failed: usize,
}

impl TaskStatusCounts {
    /// Tallies the statuses of `tasks`.
    #[must_use]
    pub fn tally<'a>(tasks: impl IntoIterator<Item = &'a Task>) -> Self {
        tasks.into_iter().fold(Self::default(), |mut counts, task| {
            counts.total_tasks += 1;
            match task.status().kind() {
                TaskStatusKind::Pending => counts.pending += 1,
                TaskStatusKind::InProgress => counts.in_progress += 1,
                TaskStatusKind::Completed => counts.completed += 1,
                TaskStatusKind::Failed => counts.failed += 1,
            }
            counts
        })
    }
}

/// Task aggregate root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    id: TaskId,
    issue_number: IssueNumber,
    title: String,
    description: Option<String>,
    #[serde(flatten)]
    status: TaskStatus,
    branch_name: BranchName,
    plan: Option<Analysis>,
    branch_created: Option<bool>,
    created_at: DateTime<Utc>,
    started_at: Option<DateTime<Utc>>,
    completed_at: Option<DateTime<Utc>>,
}

impl Task {
    /// Queues a pending task for a source issue.
    #[must_use]
    pub fn queue(issue: &SourceIssue, clock: &impl Clock) -> Self {
        Self {
            id: TaskId::for_issue(issue.number()),
            issue_number: issue.number(),
            title: issue.title().to_owned(),
            description: issue.body().map(str::to_owned),
            status: TaskStatus::Pending,
            branch_name: BranchName::for_issue(issue.number(), issue.title()),
            plan: None,
            branch_created: None,
            created_at: clock.utc(),
            started_at: None,
            completed_at: None,
        }
    }

    /// Returns the task identifier.
    #[must_use]
    pub const fn id(&self) -> &TaskId {
        &self.id
    }

    /// Returns the originating issue number.
    #[must_use]
    pub const fn issue_number(&self) -> IssueNumber {
        self.issue_number
    }

    /// Returns the issue title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns the issue description.
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Returns the lifecycle status.
    #[must_use]
    pub const fn status(&self) -> &TaskStatus {
        &self.status
    }

    /// Returns the branch prepared for this task.
    #[must_use]
    pub const fn branch_name(&self) -> &BranchName {
        &self.branch_name
    }

    /// Returns the implementation plan, once execution has produced one.
    #[must_use]
    pub const fn plan(&self) -> Option<&Analysis> {
        self.plan.as_ref()
    }

    /// Returns whether branch provisioning succeeded, once attempted.
    #[must_use]
    pub const fn branch_created(&self) -> Option<bool> {
        self.branch_created
    }

    /// Returns the failure diagnostic of a failed task.
    #[must_use]
    pub fn error(&self) -> Option<&str> {
        match &self.status {
            TaskStatus::Failed { reason } => Some(reason),
            TaskStatus::Pending | TaskStatus::InProgress | TaskStatus::Completed => None,
        }
    }

    /// Returns the queueing timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the execution start timestamp.
    #[must_use]
    pub const fn started_at(&self) -> Option<DateTime<Utc>> {
        self.started_at
    }

    /// Returns the completion timestamp.
    #[must_use]
    pub const fn completed_at(&self) -> Option<DateTime<Utc>> {
        self.completed_at
    }

    /// Starts execution of a pending task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::InvalidStateTransition`] when the task is
    /// not pending. Nothing is modified in that case.
    pub fn start(self, clock: &impl Clock) -> Result<ActiveTask, TaskDomainError> {
        let from = self.status.kind();
        if from != TaskStatusKind::Pending {
            return Err(TaskDomainError::InvalidStateTransition {
                task_id: self.id,
                from,
                to: TaskStatusKind::InProgress,
            });
        }

        Ok(ActiveTask {
            task: Self {
                status: TaskStatus::InProgress,
                started_at: Some(clock.utc()),
                ..self
            },
        })
    }
}

/// A task whose execution is in progress.
///
/// Obtained only from [`Task::start`]; finishing it yields a terminal
/// [`Task`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActiveTask {
    task: Task,
}

impl ActiveTask {
    /// Returns a view of the in-progress task.
    #[must_use]
    pub const fn task(&self) -> &Task {
        &self.task
    }

    /// Records the implementation plan.
    pub fn record_plan(&mut self, plan: Analysis) {
        self.task.plan = Some(plan);
    }

    /// Completes the task after its branch was provisioned.
    #[must_use]
    pub fn complete_after_branch(self, clock: &impl Clock) -> Task {
        Task {
            status: TaskStatus::Completed,
            branch_created: Some(true),
            completed_at: Some(clock.utc()),
            ..self.task
        }
    }

    /// Fails the task because its branch could not be provisioned.
    #[must_use]
    pub fn fail_at_branch(self, reason: impl Into<String>) -> Task {
        Task {
            status: TaskStatus::Failed {
                reason: reason.into(),
            },
            branch_created: Some(false),
            ..self.task
        }
    }
}
