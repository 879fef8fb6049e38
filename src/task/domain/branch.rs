//! Branch names and commit references for workspace preparation.

use super::{IssueNumber, TaskDomainError};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Maximum number of characters kept from a title-derived slug.
pub const MAX_SLUG_LENGTH: usize = 50;

/// Maximum length for an explicitly supplied branch name.
const MAX_BRANCH_NAME_LENGTH: usize = 200;

/// Prefix applied to branches created for issue tasks.
const FEATURE_PREFIX: &str = "feature/";

/// Validated Git branch name.
///
/// # Examples
///
///     use kortana::task::domain::{BranchName, IssueNumber};
///
///     let number = IssueNumber::new(42).expect("valid issue number");
///     let name = BranchName::for_issue(number, "Fix: Bug #1?!");
///     assert_eq!(name.as_str(), "feature/42-fix-bug-1");
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BranchName(String);

impl BranchName {
    /// Creates a validated branch name.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::InvalidBranchName`] when the value is empty,
    /// contains whitespace, a colon or `..`, or exceeds the length limit.
    pub fn new(value: impl Into<String>) -> Result<Self, TaskDomainError> {
        let raw = value.into();
        let normalized = raw.trim();

        if Self::is_invalid_branch_name(normalized) {
            return Err(TaskDomainError::InvalidBranchName(raw));
        }

        Ok(Self(normalized.to_owned()))
    }

    /// Derives the feature branch for an issue: `feature/<n>-<slug>`.
    ///
    /// The slug is the lower-cased title with every run of
    /// non-alphanumeric characters collapsed to a single `-`, stripped of
    /// leading and trailing dashes and cut to [`MAX_SLUG_LENGTH`]
    /// characters. A title with no alphanumeric content yields
    /// `feature/<n>`.
    #[must_use]
    pub fn for_issue(issue_number: IssueNumber, title: &str) -> Self {
        let slug = slugify(title);
        if slug.is_empty() {
            return Self(format!("{FEATURE_PREFIX}{issue_number}"));
        }
        Self(format!("{FEATURE_PREFIX}{issue_number}-{slug}"))
    }

    fn is_invalid_branch_name(name: &str) -> bool {
        let is_empty = name.is_empty();
        let contains_forbidden = name.contains(':')
            || name.contains("..")
            || name.chars().any(char::is_whitespace);
        let exceeds_length_limit = name.chars().count() > MAX_BRANCH_NAME_LENGTH;

        is_empty || contains_forbidden || exceeds_length_limit
    }

    /// Returns the branch name as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns the fully qualified ref, `refs/heads/<name>`.
    #[must_use]
    pub fn qualified_ref(&self) -> String {
        format!("refs/heads/{}", self.0)
    }
}

impl AsRef<str> for BranchName {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for BranchName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Collapses a title into a lower-case, dash-separated slug.
fn slugify(title: &str) -> String {
    let mut slug = String::with_capacity(title.len());
    let mut pending_dash = false;
    for ch in title.chars().flat_map(char::to_lowercase) {
        if ch.is_alphanumeric() {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            pending_dash = false;
            slug.push(ch);
        } else {
            pending_dash = true;
        }
    }

    let truncated: String = slug.chars().take(MAX_SLUG_LENGTH).collect();
    truncated.trim_end_matches('-').to_owned()
}

/// Commit identifier a new branch points at.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CommitSha(String);

impl CommitSha {
    /// Creates a validated commit identifier.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::InvalidCommitSha`] when the value is empty
    /// or not hexadecimal.
    pub fn new(value: impl Into<String>) -> Result<Self, TaskDomainError> {
        let raw = value.into();
        let normalized = raw.trim();
        if normalized.is_empty() || !normalized.chars().all(|ch| ch.is_ascii_hexdigit()) {
            return Err(TaskDomainError::InvalidCommitSha(raw));
        }
        Ok(Self(normalized.to_ascii_lowercase()))
    }

    /// Returns the commit identifier as `str`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CommitSha {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
