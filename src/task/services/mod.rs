//! Application services for the autonomous task queue.

mod execution;
mod queue;

pub use execution::{
    BRANCH_FAILURE_DIAGNOSTIC, BranchTarget, PLAN_PROMPT, TaskExecutionError,
    TaskExecutionResult, TaskExecutionService,
};
pub use queue::{
    QueueStatus, RECENT_TASK_LIMIT, TaskQueueError, TaskQueueResult, TaskQueueService,
};
