//! In-memory integration tests for the task queue and lifecycle engine.

use std::sync::Arc;

use super::helpers::{MinuteClock, main_branch, main_tip, replying, repository};
use kortana::analysis::adapters::ScriptedTextAnalyzer;
use kortana::error::ErrorKind;
use kortana::task::{
    adapters::memory::{InMemoryBranchProvisioner, InMemoryIssueSource, InMemoryTaskRepository},
    domain::{SourceIssue, Task, TaskDomainError, TaskId, TaskStatus, TaskStatusKind},
    ports::IssueSourceError,
    services::{
        BRANCH_FAILURE_DIAGNOSTIC, BranchTarget, TaskExecutionError, TaskExecutionService,
        TaskQueueError, TaskQueueService,
    },
};
use rstest::{fixture, rstest};

struct World {
    source: InMemoryIssueSource,
    provisioner: Arc<InMemoryBranchProvisioner>,
    queue: TaskQueueService<InMemoryTaskRepository, MinuteClock>,
    engine: TaskExecutionService<
        InMemoryTaskRepository,
        ScriptedTextAnalyzer,
        InMemoryBranchProvisioner,
        MinuteClock,
    >,
}

#[fixture]
fn world() -> World {
    let tasks = Arc::new(InMemoryTaskRepository::new());
    let clock = Arc::new(MinuteClock::new());
    let provisioner = Arc::new(InMemoryBranchProvisioner::new());
    provisioner
        .seed_branch(&repository(), main_branch(), main_tip())
        .expect("seed base branch");
    let (_, analysis) = replying("1. Patch the parser\n2. Add a regression test");

    World {
        source: InMemoryIssueSource::new(),
        queue: TaskQueueService::new(Arc::clone(&tasks), Arc::clone(&clock)),
        engine: TaskExecutionService::new(
            tasks,
            analysis,
            Arc::clone(&provisioner),
            BranchTarget::new(repository(), main_branch()),
            clock,
        ),
        provisioner,
    }
}

fn find(tasks: &[Task], id: &str) -> eyre::Result<Task> {
    tasks
        .iter()
        .find(|task| task.id().as_str() == id)
        .cloned()
        .ok_or_else(|| eyre::eyre!("task {id} missing"))
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn cycle_queues_and_completes_open_issues(world: World) -> eyre::Result<()> {
    world
        .source
        .open_issue(&repository(), SourceIssue::new(42, "Fix: Bug #1?!")?.with_body("Crash on start"))?;
    world
        .source
        .open_issue(&repository(), SourceIssue::new(43, "Bump deps")?.as_pull_request())?;

    let queued = world
        .queue
        .queue_open_issues(&world.source, &repository())
        .await?;
    eyre::ensure!(queued.len() == 1, "pull requests must not be queued");

    let finished = world.engine.execute_pending().await?;
    let task = find(&finished, "issue-42")?;

    assert_eq!(task.status(), &TaskStatus::Completed);
    assert_eq!(task.branch_name().as_str(), "feature/42-fix-bug-1");
    assert_eq!(task.branch_created(), Some(true));
    assert!(task.plan().is_some_and(|plan| plan.text().contains("regression test")));
    assert!(task.started_at() < task.completed_at());

    let branches = world.provisioner.created_branches()?;
    assert!(branches.iter().any(|(_, branch)| branch.as_str() == "feature/42-fix-bug-1"));

    let status = world.queue.status().await?;
    assert_eq!(status.counts.completed, 1);
    assert_eq!(status.counts.total_tasks, 1);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn second_cycle_queues_nothing_new(world: World) -> eyre::Result<()> {
    world
        .source
        .open_issue(&repository(), SourceIssue::new(7, "Add search")?)?;

    let first = world
        .queue
        .queue_open_issues(&world.source, &repository())
        .await?;
    let second = world
        .queue
        .queue_open_issues(&world.source, &repository())
        .await?;

    assert_eq!(first.len(), 1);
    assert!(second.is_empty());
    assert_eq!(world.queue.status().await?.counts.pending, 1);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn executing_finished_task_is_rejected_without_changes(world: World) -> eyre::Result<()> {
    world.queue.ingest(&[SourceIssue::new(9, "Tidy logs")?]).await?;
    let id = TaskId::new("issue-9")?;
    let finished = world.engine.execute(&id).await?;

    let err = world
        .engine
        .execute(&id)
        .await
        .expect_err("terminal tasks cannot be re-executed");

    assert!(matches!(
        err,
        TaskExecutionError::Domain(TaskDomainError::InvalidStateTransition {
            from: TaskStatusKind::Completed,
            ..
        })
    ));
    assert_eq!(err.kind(), ErrorKind::State);
    assert_eq!(world.queue.find(&id).await?, Some(finished));
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn revoked_credential_fails_task_at_branch_step(world: World) -> eyre::Result<()> {
    world.provisioner.revoke_credential()?;
    world.queue.ingest(&[SourceIssue::new(5, "Docs")?]).await?;

    let task = world.engine.execute(&TaskId::new("issue-5")?).await?;

    assert_eq!(task.error(), Some(BRANCH_FAILURE_DIAGNOSTIC));
    assert_eq!(task.branch_created(), Some(false));
    assert!(task.completed_at().is_none());
    assert!(task.plan().is_some());
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn failing_issue_source_queues_nothing(world: World) -> eyre::Result<()> {
    world.source.fail_with_status(502)?;

    let err = world
        .queue
        .queue_open_issues(&world.source, &repository())
        .await
        .expect_err("listing fails");

    assert!(matches!(
        err,
        TaskQueueError::IssueSource(IssueSourceError::Status { status: 502, .. })
    ));
    assert_eq!(err.kind(), ErrorKind::Collaborator);
    assert_eq!(world.queue.status().await?.counts.total_tasks, 0);
    Ok(())
}
