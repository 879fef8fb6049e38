//! Domain model for the autonomous task queue.
//!
//! Tasks are queued from source issues and driven through
//! `pending → in_progress → completed | failed`. Only a [`Task`] in the
//! pending state can be started, and only the resulting [`ActiveTask`] can
//! be completed or failed, so illegal transitions cannot be expressed.

mod branch;
mod error;
mod ids;
mod issue;
mod task;

pub use branch::{BranchName, CommitSha, MAX_SLUG_LENGTH};
pub use error::TaskDomainError;
pub use ids::{IssueNumber, RepositorySlug, TaskId};
pub use issue::SourceIssue;
pub use task::{ActiveTask, Task, TaskStatus, TaskStatusCounts, TaskStatusKind};
