//! Issue-source port.

use crate::error::ErrorKind;
use crate::task::domain::{RepositorySlug, SourceIssue};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for issue-source operations.
pub type IssueSourceResult<T> = Result<T, IssueSourceError>;

/// Contract of the external issue tracker.
#[async_trait]
pub trait IssueSource: Send + Sync {
    /// Lists the open work items of `repository`, pull requests included.
    async fn list_open_issues(
        &self,
        repository: &RepositorySlug,
    ) -> IssueSourceResult<Vec<SourceIssue>>;
}

/// Errors returned by issue-source adapters.
#[derive(Debug, Clone, Error)]
pub enum IssueSourceError {
    /// No access token is configured.
    #[error("issue source token not configured")]
    MissingCredential,

    /// The tracker answered with a non-success status code.
    #[error("failed to fetch issues for {repository}: status {status}")]
    Status {
        /// Repository that was queried.
        repository: RepositorySlug,
        /// HTTP status code.
        status: u16,
    },

    /// The tracker answered with a payload that could not be mapped.
    #[error("malformed issue listing: {0}")]
    MalformedResponse(String),

    /// The tracker could not be reached.
    #[error("issue source transport error: {0}")]
    Transport(Arc<dyn std::error::Error + Send + Sync>),
}

impl IssueSourceError {
    /// Wraps a transport error.
    pub fn transport(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Transport(Arc::new(err))
    }

    /// Returns the broad failure class.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::MissingCredential => ErrorKind::Configuration,
            Self::Status { .. } | Self::MalformedResponse(_) | Self::Transport(_) => {
                ErrorKind::Collaborator
            }
        }
    }
}
