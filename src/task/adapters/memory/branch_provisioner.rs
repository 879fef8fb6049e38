//! In-memory branch provisioner for tests and offline runs.

use crate::task::{
    domain::{BranchName, CommitSha, RepositorySlug},
    ports::{BranchProvisionError, BranchProvisionResult, BranchProvisioner},
};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock, RwLockWriteGuard};

/// In-memory source-control host.
///
/// Branches live in a per-repository map from name to commit. Creation of an
/// existing branch is rejected with status 422, mirroring hosted services.
#[derive(Debug, Clone, Default)]
pub struct InMemoryBranchProvisioner {
    state: Arc<RwLock<ProvisionerState>>,
}

#[derive(Debug, Default)]
struct ProvisionerState {
    branches: HashMap<RepositorySlug, HashMap<BranchName, CommitSha>>,
    created: Vec<(RepositorySlug, BranchName)>,
    credential_missing: bool,
}

/// Status reported when a branch already exists.
const ALREADY_EXISTS_STATUS: u16 = 422;

impl InMemoryBranchProvisioner {
    /// Creates a host with no repositories.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds `branch` in `repository` at `sha`.
    ///
    /// # Errors
    ///
    /// Returns [`BranchProvisionError::Transport`] when lock acquisition
    /// fails.
    pub fn seed_branch(
        &self,
        repository: &RepositorySlug,
        branch: BranchName,
        sha: CommitSha,
    ) -> BranchProvisionResult<()> {
        let mut state = self.write_state()?;
        state
            .branches
            .entry(repository.clone())
            .or_default()
            .insert(branch, sha);
        Ok(())
    }

    /// Simulates a host without a configured access token.
    ///
    /// # Errors
    ///
    /// Returns [`BranchProvisionError::Transport`] when lock acquisition
    /// fails.
    pub fn revoke_credential(&self) -> BranchProvisionResult<()> {
        let mut state = self.write_state()?;
        state.credential_missing = true;
        Ok(())
    }

    /// Returns the branches created through [`BranchProvisioner::create_ref`],
    /// oldest first.
    ///
    /// # Errors
    ///
    /// Returns [`BranchProvisionError::Transport`] when lock acquisition
    /// fails.
    pub fn created_branches(&self) -> BranchProvisionResult<Vec<(RepositorySlug, BranchName)>> {
        let state = self
            .state
            .read()
            .map_err(|err| BranchProvisionError::transport(std::io::Error::other(err.to_string())))?;
        Ok(state.created.clone())
    }

    fn write_state(&self) -> BranchProvisionResult<RwLockWriteGuard<'_, ProvisionerState>> {
        self.state
            .write()
            .map_err(|err| BranchProvisionError::transport(std::io::Error::other(err.to_string())))
    }
}

#[async_trait]
impl BranchProvisioner for InMemoryBranchProvisioner {
    async fn base_ref(
        &self,
        repository: &RepositorySlug,
        branch: &BranchName,
    ) -> BranchProvisionResult<CommitSha> {
        let state = self
            .state
            .read()
            .map_err(|err| BranchProvisionError::transport(std::io::Error::other(err.to_string())))?;
        if state.credential_missing {
            return Err(BranchProvisionError::MissingCredential);
        }
        state
            .branches
            .get(repository)
            .and_then(|branches| branches.get(branch))
            .cloned()
            .ok_or_else(|| BranchProvisionError::BaseRefNotFound {
                repository: repository.clone(),
                branch: branch.clone(),
            })
    }

    async fn create_ref(
        &self,
        repository: &RepositorySlug,
        branch: &BranchName,
        sha: &CommitSha,
    ) -> BranchProvisionResult<()> {
        let mut state = self.write_state()?;
        if state.credential_missing {
            return Err(BranchProvisionError::MissingCredential);
        }
        let branches = state.branches.entry(repository.clone()).or_default();
        if branches.contains_key(branch) {
            return Err(BranchProvisionError::Rejected {
                branch: branch.clone(),
                status: ALREADY_EXISTS_STATUS,
            });
        }
        branches.insert(branch.clone(), sha.clone());
        state.created.push((repository.clone(), branch.clone()));
        Ok(())
    }
}
