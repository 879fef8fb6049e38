//! Service layer driving a queued task through its lifecycle.

use crate::analysis::{
    domain::PromptTemplate,
    ports::TextAnalyzer,
    services::AnalysisClient,
};
use crate::error::ErrorKind;
use crate::task::{
    domain::{BranchName, RepositorySlug, Task, TaskDomainError, TaskId, TaskStatusKind},
    ports::{BranchProvisionResult, BranchProvisioner, TaskRepository, TaskRepositoryError},
};
use minijinja::context;
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;

/// Prompt used to draft an implementation plan for a task.
pub const PLAN_PROMPT: PromptTemplate = PromptTemplate::new(
    "task_plan",
    "Generate a detailed implementation plan for this GitHub issue:

Title: {{ title }}
Description: {{ description }}

Provide a step-by-step plan including:
1. Technical approach
2. Files to modify/create
3. Dependencies needed
4. Testing strategy
5. Success criteria

Keep the plan concise but comprehensive.",
    "Failed to generate plan",
);

/// Diagnostic stored on a task whose branch could not be provisioned.
pub const BRANCH_FAILURE_DIAGNOSTIC: &str = "Failed to create branch";

/// Repository and base branch new task branches are cut from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BranchTarget {
    repository: RepositorySlug,
    base_branch: BranchName,
}

impl BranchTarget {
    /// Creates a branch target.
    #[must_use]
    pub const fn new(repository: RepositorySlug, base_branch: BranchName) -> Self {
        Self {
            repository,
            base_branch,
        }
    }

    /// Returns the repository branches are created in.
    #[must_use]
    pub const fn repository(&self) -> &RepositorySlug {
        &self.repository
    }

    /// Returns the base branch.
    #[must_use]
    pub const fn base_branch(&self) -> &BranchName {
        &self.base_branch
    }
}

/// Service-level errors for task execution.
#[derive(Debug, Error)]
pub enum TaskExecutionError {
    /// Domain validation or transition failed.
    #[error(transparent)]
    Domain(#[from] TaskDomainError),
    /// Repository operation failed.
    #[error(transparent)]
    Repository(#[from] TaskRepositoryError),
    /// No task exists with the given identifier.
    #[error("task {0} not found")]
    NotFound(TaskId),
    /// Another execution claimed the task first.
    #[error("task {0} was claimed by another execution")]
    Contended(TaskId),
}

impl TaskExecutionError {
    /// Returns the broad failure class.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::Domain(err) => err.kind(),
            Self::Repository(err) => err.kind(),
            Self::NotFound(_) => ErrorKind::NotFound,
            Self::Contended(_) => ErrorKind::State,
        }
    }
}

/// Result type for task execution operations.
pub type TaskExecutionResult<T> = Result<T, TaskExecutionError>;

/// Task lifecycle engine.
///
/// Execution runs `pending → in_progress`, drafts a plan, provisions the
/// task branch and ends in `completed`, or in `failed` when the branch
/// cannot be created. Plan drafting never aborts execution. Nothing is
/// retried.
pub struct TaskExecutionService<R, A, B, C>
where
    R: TaskRepository,
    A: TextAnalyzer + ?Sized,
    B: BranchProvisioner + ?Sized,
    C: Clock + Send + Sync,
{
    repository: Arc<R>,
    analysis: AnalysisClient<A>,
    provisioner: Arc<B>,
    target: BranchTarget,
    clock: Arc<C>,
}

impl<R, A, B, C> TaskExecutionService<R, A, B, C>
where
    R: TaskRepository,
    A: TextAnalyzer + ?Sized,
    B: BranchProvisioner + ?Sized,
    C: Clock + Send + Sync,
{
    /// Creates a new execution service.
    #[must_use]
    pub const fn new(
        repository: Arc<R>,
        analysis: AnalysisClient<A>,
        provisioner: Arc<B>,
        target: BranchTarget,
        clock: Arc<C>,
    ) -> Self {
        Self {
            repository,
            analysis,
            provisioner,
            target,
            clock,
        }
    }

    /// Executes the pending task `id` and returns it in its terminal state.
    ///
    /// # Errors
    ///
    /// Returns [`TaskExecutionError::NotFound`] for an unknown task,
    /// [`TaskExecutionError::Domain`] carrying
    /// [`TaskDomainError::InvalidStateTransition`] when the task is not
    /// pending, and [`TaskExecutionError::Contended`] when another execution
    /// claimed the task between lookup and claim. Both rejections leave the
    /// stored task unchanged.
    ///
    /// Returns [`TaskExecutionError::Repository`] when the store fails. If
    /// the claim succeeded but storing the terminal state fails, the task
    /// stays `in_progress` in the store. Nothing moves it back to `pending`,
    /// so it will not be picked up again.
    pub async fn execute(&self, id: &TaskId) -> TaskExecutionResult<Task> {
        let task = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| TaskExecutionError::NotFound(id.clone()))?;

        let mut active = task.start(&*self.clock)?;
        if !self
            .repository
            .update_if_status(active.task(), TaskStatusKind::Pending)
            .await?
        {
            return Err(TaskExecutionError::Contended(id.clone()));
        }
        tracing::info!(task_id = %id, branch = %active.task().branch_name(), "task started");

        let plan = self
            .analysis
            .analyze(
                &PLAN_PROMPT,
                context! {
                    title => active.task().title(),
                    description => active.task().description().unwrap_or_default(),
                },
            )
            .await;
        active.record_plan(plan);

        let finished = match self.provision_branch(active.task().branch_name()).await {
            Ok(()) => active.complete_after_branch(&*self.clock),
            Err(error) => {
                tracing::warn!(
                    task_id = %id,
                    %error,
                    kind = %error.kind(),
                    "branch provisioning failed"
                );
                active.fail_at_branch(BRANCH_FAILURE_DIAGNOSTIC)
            }
        };
        if let Err(error) = self.repository.update(&finished).await {
            tracing::error!(
                task_id = %id,
                status = %finished.status().kind(),
                %error,
                "failed to store finished task; it remains in_progress"
            );
            return Err(error.into());
        }
        tracing::info!(task_id = %id, status = %finished.status().kind(), "task finished");
        Ok(finished)
    }

    /// Executes every pending task in queue order.
    ///
    /// # Errors
    ///
    /// Returns the first storage error raised by [`Self::execute`]; tasks
    /// executed before it keep their terminal state. Tasks that left the
    /// pending state after the listing are skipped.
    pub async fn execute_pending(&self) -> TaskExecutionResult<Vec<Task>> {
        let pending: Vec<TaskId> = self
            .repository
            .list()
            .await?
            .into_iter()
            .filter(|task| task.status().kind() == TaskStatusKind::Pending)
            .map(|task| task.id().clone())
            .collect();

        let mut finished = Vec::with_capacity(pending.len());
        for id in &pending {
            match self.execute(id).await {
                Ok(task) => finished.push(task),
                Err(
                    TaskExecutionError::Contended(_)
                    | TaskExecutionError::Domain(TaskDomainError::InvalidStateTransition { .. }),
                ) => {
                    tracing::debug!(task_id = %id, "skipping task claimed elsewhere");
                }
                Err(error) => return Err(error),
            }
        }
        Ok(finished)
    }

    async fn provision_branch(&self, branch: &BranchName) -> BranchProvisionResult<()> {
        let repository = self.target.repository();
        let sha = self
            .provisioner
            .base_ref(repository, self.target.base_branch())
            .await?;
        self.provisioner.create_ref(repository, branch, &sha).await
    }
}
