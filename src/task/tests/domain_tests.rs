//! Domain-focused tests for issue and branch value objects.

use crate::task::domain::{
    BranchName, CommitSha, IssueNumber, MAX_SLUG_LENGTH, RepositorySlug, SourceIssue, Task,
    TaskDomainError, TaskId, TaskStatus,
};
use crate::test_support::SteppingClock;
use rstest::rstest;

fn issue_number(value: u64) -> IssueNumber {
    IssueNumber::new(value).expect("valid issue number")
}

#[rstest]
#[case(42, "Fix: Bug #1?!", "feature/42-fix-bug-1")]
#[case(7, "Add login page", "feature/7-add-login-page")]
#[case(3, "  leading and trailing  ", "feature/3-leading-and-trailing")]
#[case(9, "Refactor/split the API router", "feature/9-refactor-split-the-api-router")]
#[case(5, "tabs\tand\nnewlines", "feature/5-tabs-and-newlines")]
#[case(11, "snake_case & kebab-case", "feature/11-snake-case-kebab-case")]
#[case(12, "Quotes 'single' \"double\"", "feature/12-quotes-single-double")]
#[case(13, "v2.0 -- release!!!", "feature/13-v2-0-release")]
#[case(14, "Ünïcödé Títle", "feature/14-ünïcödé-títle")]
#[case(15, "?!#", "feature/15")]
fn branch_name_is_derived_from_title(
    #[case] number: u64,
    #[case] title: &str,
    #[case] expected: &str,
) {
    assert_eq!(
        BranchName::for_issue(issue_number(number), title).as_str(),
        expected
    );
}

#[rstest]
fn branch_slug_is_truncated_without_trailing_dash() {
    // Character 50 of the slug is the dash between "aaaa" and "bbbb".
    let title = format!("{} {}", "a".repeat(49), "b".repeat(10));
    let branch = BranchName::for_issue(issue_number(1), &title);
    let slug = branch
        .as_str()
        .strip_prefix("feature/1-")
        .expect("feature prefix");

    assert_eq!(slug, "a".repeat(49));
    assert!(slug.chars().count() <= MAX_SLUG_LENGTH);
}

#[rstest]
fn branch_slug_keeps_exactly_fifty_characters() {
    let title = "x".repeat(80);
    let branch = BranchName::for_issue(issue_number(2), &title);

    assert_eq!(branch.as_str(), format!("feature/2-{}", "x".repeat(MAX_SLUG_LENGTH)));
}

#[rstest]
#[case("")]
#[case("   ")]
#[case("has space")]
#[case("a:b")]
#[case("a..b")]
fn branch_name_rejects_invalid_values(#[case] raw: &str) {
    assert_eq!(
        BranchName::new(raw),
        Err(TaskDomainError::InvalidBranchName(raw.to_owned()))
    );
}

#[rstest]
fn branch_name_qualifies_as_head_ref() {
    let branch = BranchName::new("main").expect("valid branch");
    assert_eq!(branch.qualified_ref(), "refs/heads/main");
}

#[rstest]
fn commit_sha_is_normalised_to_lowercase() {
    let sha = CommitSha::new("ABCDEF0123").expect("valid sha");
    assert_eq!(sha.as_str(), "abcdef0123");
}

#[rstest]
#[case("")]
#[case("not-a-sha")]
fn commit_sha_rejects_non_hex(#[case] raw: &str) {
    assert_eq!(
        CommitSha::new(raw),
        Err(TaskDomainError::InvalidCommitSha(raw.to_owned()))
    );
}

#[rstest]
fn task_id_is_derived_from_issue_number() {
    assert_eq!(TaskId::for_issue(issue_number(42)).as_str(), "issue-42");
}

#[rstest]
fn task_id_rejects_blank_values() {
    assert_eq!(TaskId::new("  "), Err(TaskDomainError::EmptyTaskId));
}

#[rstest]
fn issue_number_rejects_zero() {
    assert_eq!(IssueNumber::new(0), Err(TaskDomainError::InvalidIssueNumber(0)));
}

#[rstest]
fn repository_slug_parses_owner_and_name() {
    let slug = RepositorySlug::parse("KOR-TANA/kortana").expect("valid slug");
    assert_eq!(slug.owner(), "KOR-TANA");
    assert_eq!(slug.name(), "kortana");
    assert_eq!(slug.to_string(), "KOR-TANA/kortana");
}

#[rstest]
#[case("owner-only")]
#[case("a/b/c")]
#[case("/repo")]
#[case("owner/ ")]
fn repository_slug_rejects_malformed_values(#[case] raw: &str) {
    assert_eq!(
        RepositorySlug::parse(raw),
        Err(TaskDomainError::InvalidRepository(raw.to_owned()))
    );
}

#[rstest]
fn source_issue_rejects_blank_title() {
    assert_eq!(
        SourceIssue::new(4, "   "),
        Err(TaskDomainError::EmptyIssueTitle)
    );
}

#[rstest]
fn source_issue_treats_blank_body_as_absent() {
    let issue = SourceIssue::new(4, "Title")
        .expect("valid issue")
        .with_body("  \n ");
    assert_eq!(issue.body(), None);
}

#[rstest]
fn queued_task_is_pending_with_only_creation_timestamp() {
    let clock = SteppingClock::new();
    let issue = SourceIssue::new(42, "Fix: Bug #1?!")
        .expect("valid issue")
        .with_body("Crashes on start");

    let task = Task::queue(&issue, &clock);

    assert_eq!(task.id().as_str(), "issue-42");
    assert_eq!(task.status(), &TaskStatus::Pending);
    assert_eq!(task.title(), "Fix: Bug #1?!");
    assert_eq!(task.description(), Some("Crashes on start"));
    assert_eq!(task.branch_name().as_str(), "feature/42-fix-bug-1");
    assert!(task.plan().is_none());
    assert!(task.branch_created().is_none());
    assert!(task.error().is_none());
    assert!(task.started_at().is_none());
    assert!(task.completed_at().is_none());
}
