//! In-memory issue source for tests and offline runs.

use crate::task::{
    domain::{RepositorySlug, SourceIssue},
    ports::{IssueSource, IssueSourceError, IssueSourceResult},
};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

/// In-memory issue tracker keyed by repository.
#[derive(Debug, Clone, Default)]
pub struct InMemoryIssueSource {
    state: Arc<RwLock<IssueSourceState>>,
}

#[derive(Debug, Default)]
struct IssueSourceState {
    issues: HashMap<RepositorySlug, Vec<SourceIssue>>,
    failure_status: Option<u16>,
}

impl InMemoryIssueSource {
    /// Creates an empty issue source.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an open issue to `repository`.
    ///
    /// # Errors
    ///
    /// Returns [`IssueSourceError::Transport`] when lock acquisition fails.
    pub fn open_issue(
        &self,
        repository: &RepositorySlug,
        issue: SourceIssue,
    ) -> IssueSourceResult<()> {
        let mut state = self.write_state()?;
        state
            .issues
            .entry(repository.clone())
            .or_default()
            .push(issue);
        Ok(())
    }

    /// Makes every subsequent listing fail with `status`.
    ///
    /// # Errors
    ///
    /// Returns [`IssueSourceError::Transport`] when lock acquisition fails.
    pub fn fail_with_status(&self, status: u16) -> IssueSourceResult<()> {
        let mut state = self.write_state()?;
        state.failure_status = Some(status);
        Ok(())
    }

    fn write_state(&self) -> IssueSourceResult<std::sync::RwLockWriteGuard<'_, IssueSourceState>> {
        self.state
            .write()
            .map_err(|err| IssueSourceError::transport(std::io::Error::other(err.to_string())))
    }
}

#[async_trait]
impl IssueSource for InMemoryIssueSource {
    async fn list_open_issues(
        &self,
        repository: &RepositorySlug,
    ) -> IssueSourceResult<Vec<SourceIssue>> {
        let state = self
            .state
            .read()
            .map_err(|err| IssueSourceError::transport(std::io::Error::other(err.to_string())))?;
        if let Some(status) = state.failure_status {
            return Err(IssueSourceError::Status {
                repository: repository.clone(),
                status,
            });
        }
        Ok(state.issues.get(repository).cloned().unwrap_or_default())
    }
}
