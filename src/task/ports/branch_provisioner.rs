//! Branch-provisioning port.

use crate::error::ErrorKind;
use crate::task::domain::{BranchName, CommitSha, RepositorySlug};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for branch-provisioning operations.
pub type BranchProvisionResult<T> = Result<T, BranchProvisionError>;

/// Contract of the source-control host that creates branches.
#[async_trait]
pub trait BranchProvisioner: Send + Sync {
    /// Resolves the commit that `branch` currently points at.
    async fn base_ref(
        &self,
        repository: &RepositorySlug,
        branch: &BranchName,
    ) -> BranchProvisionResult<CommitSha>;

    /// Creates `branch` pointing at `sha`.
    async fn create_ref(
        &self,
        repository: &RepositorySlug,
        branch: &BranchName,
        sha: &CommitSha,
    ) -> BranchProvisionResult<()>;
}

/// Errors returned by branch-provisioning adapters.
#[derive(Debug, Clone, Error)]
pub enum BranchProvisionError {
    /// No access token is configured.
    #[error("branch provisioner token not configured")]
    MissingCredential,

    /// The base branch could not be resolved.
    #[error("base branch {branch} not found in {repository}")]
    BaseRefNotFound {
        /// Repository that was queried.
        repository: RepositorySlug,
        /// Base branch that was requested.
        branch: BranchName,
    },

    /// The host refused to create the branch.
    #[error("branch {branch} was not created: status {status}")]
    Rejected {
        /// Branch that was requested.
        branch: BranchName,
        /// HTTP status code.
        status: u16,
    },

    /// The host answered with a payload that could not be mapped.
    #[error("malformed branch response: {0}")]
    MalformedResponse(String),

    /// The host could not be reached.
    #[error("branch provisioner transport error: {0}")]
    Transport(Arc<dyn std::error::Error + Send + Sync>),
}

impl BranchProvisionError {
    /// Wraps a transport error.
    pub fn transport(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Transport(Arc::new(err))
    }

    /// Returns the broad failure class.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::MissingCredential => ErrorKind::Configuration,
            Self::BaseRefNotFound { .. }
            | Self::Rejected { .. }
            | Self::MalformedResponse(_)
            | Self::Transport(_) => ErrorKind::Collaborator,
        }
    }
}
