//! Identifier and validated scalar types for the task domain.

use super::TaskDomainError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Prefix of every task identifier derived from an issue.
const ISSUE_TASK_PREFIX: &str = "issue-";

/// Stable task identifier, `issue-<number>` for issue-origin tasks.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskId(String);

impl TaskId {
    /// Creates a task identifier from a raw value.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::EmptyTaskId`] when the value is empty after
    /// trimming.
    pub fn new(value: impl Into<String>) -> Result<Self, TaskDomainError> {
        let raw = value.into();
        let normalized = raw.trim();
        if normalized.is_empty() {
            return Err(TaskDomainError::EmptyTaskId);
        }
        Ok(Self(normalized.to_owned()))
    }

    /// Derives the identifier of the task queued for `issue_number`.
    #[must_use]
    pub fn for_issue(issue_number: IssueNumber) -> Self {
        Self(format!("{ISSUE_TASK_PREFIX}{issue_number}"))
    }

    /// Returns the identifier as `str`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for TaskId {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Positive issue number from an external tracker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct IssueNumber(u64);

impl IssueNumber {
    /// Creates a validated issue number.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::InvalidIssueNumber`] when the value is zero.
    pub const fn new(value: u64) -> Result<Self, TaskDomainError> {
        if value == 0 {
            return Err(TaskDomainError::InvalidIssueNumber(value));
        }
        Ok(Self(value))
    }

    /// Returns the underlying numeric value.
    #[must_use]
    pub const fn value(self) -> u64 {
        self.0
    }
}

impl fmt::Display for IssueNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Repository identity on the hosting service, rendered as `owner/name`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RepositorySlug {
    owner: String,
    name: String,
}

impl RepositorySlug {
    /// Creates a validated repository identity.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::InvalidRepository`] when either segment is
    /// empty or contains a slash or whitespace.
    pub fn new(owner: impl Into<String>, name: impl Into<String>) -> Result<Self, TaskDomainError> {
        let raw_owner = owner.into();
        let raw_name = name.into();
        let owner_segment = raw_owner.trim();
        let name_segment = raw_name.trim();

        if !is_valid_segment(owner_segment) || !is_valid_segment(name_segment) {
            return Err(TaskDomainError::InvalidRepository(format!(
                "{raw_owner}/{raw_name}"
            )));
        }

        Ok(Self {
            owner: owner_segment.to_owned(),
            name: name_segment.to_owned(),
        })
    }

    /// Parses an `owner/name` string.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::InvalidRepository`] when the value does not
    /// contain exactly one slash-delimited owner and name.
    pub fn parse(value: &str) -> Result<Self, TaskDomainError> {
        let (owner, name) = value
            .trim()
            .split_once('/')
            .ok_or_else(|| TaskDomainError::InvalidRepository(value.to_owned()))?;
        Self::new(owner, name).map_err(|_| TaskDomainError::InvalidRepository(value.to_owned()))
    }

    /// Returns the owning account.
    #[must_use]
    pub fn owner(&self) -> &str {
        &self.owner
    }

    /// Returns the repository name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }
}

fn is_valid_segment(segment: &str) -> bool {
    !segment.is_empty() && !segment.contains('/') && !segment.chars().any(char::is_whitespace)
}

impl fmt::Display for RepositorySlug {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.name)
    }
}
