//! Work items received from the issue source.

use super::{IssueNumber, TaskDomainError};
use serde::{Deserialize, Serialize};

/// An open work item as reported by the issue source.
///
/// Pull requests are reported through the same listing on some hosting
/// services; they are carried here so the queue can skip them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceIssue {
    number: IssueNumber,
    title: String,
    body: Option<String>,
    is_pull_request: bool,
}

impl SourceIssue {
    /// Creates an issue with the required number and title.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::InvalidIssueNumber`] for a zero number and
    /// [`TaskDomainError::EmptyIssueTitle`] for a blank title.
    pub fn new(number: u64, title: impl Into<String>) -> Result<Self, TaskDomainError> {
        let raw_title = title.into();
        let normalized_title = raw_title.trim();
        if normalized_title.is_empty() {
            return Err(TaskDomainError::EmptyIssueTitle);
        }

        Ok(Self {
            number: IssueNumber::new(number)?,
            title: normalized_title.to_owned(),
            body: None,
            is_pull_request: false,
        })
    }

    /// Sets the issue body. Blank bodies are stored as absent.
    #[must_use]
    pub fn with_body(mut self, body: impl Into<String>) -> Self {
        let value = body.into();
        self.body = (!value.trim().is_empty()).then_some(value);
        self
    }

    /// Marks the record as a pull request.
    #[must_use]
    pub const fn as_pull_request(mut self) -> Self {
        self.is_pull_request = true;
        self
    }

    /// Returns the issue number.
    #[must_use]
    pub const fn number(&self) -> IssueNumber {
        self.number
    }

    /// Returns the issue title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns the issue body.
    #[must_use]
    pub fn body(&self) -> Option<&str> {
        self.body.as_deref()
    }

    /// Returns `true` when the record is a pull request rather than an issue.
    #[must_use]
    pub const fn is_pull_request(&self) -> bool {
        self.is_pull_request
    }
}
