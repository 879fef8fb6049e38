//! GitHub branch creation through the Git references API.

use super::GitHubClient;
use crate::task::{
    domain::{BranchName, CommitSha, RepositorySlug},
    ports::{BranchProvisionError, BranchProvisionResult, BranchProvisioner},
};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
struct RefPayload {
    object: RefObject,
}

#[derive(Debug, Deserialize)]
struct RefObject {
    sha: String,
}

#[derive(Debug, Serialize)]
struct CreateRefPayload<'a> {
    #[serde(rename = "ref")]
    reference: &'a str,
    sha: &'a str,
}

/// Creates branches with `GET .../git/ref/heads/{base}` and
/// `POST .../git/refs`. Creation succeeds only on `201 Created`.
#[derive(Debug, Clone)]
pub struct GitHubBranchProvisioner {
    client: GitHubClient,
}

impl GitHubBranchProvisioner {
    /// Creates a provisioner over `client`.
    #[must_use]
    pub const fn new(client: GitHubClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl BranchProvisioner for GitHubBranchProvisioner {
    async fn base_ref(
        &self,
        repository: &RepositorySlug,
        branch: &BranchName,
    ) -> BranchProvisionResult<CommitSha> {
        let path = format!(
            "/repos/{}/{}/git/ref/heads/{branch}",
            repository.owner(),
            repository.name()
        );
        let request = self
            .client
            .get(&path)
            .ok_or(BranchProvisionError::MissingCredential)?;

        tracing::debug!(%repository, %branch, "resolving base branch");
        let response = request
            .send()
            .await
            .map_err(BranchProvisionError::transport)?;
        if response.status() != reqwest::StatusCode::OK {
            return Err(BranchProvisionError::BaseRefNotFound {
                repository: repository.clone(),
                branch: branch.clone(),
            });
        }

        let payload: RefPayload = response
            .json()
            .await
            .map_err(|err| BranchProvisionError::MalformedResponse(err.to_string()))?;
        CommitSha::new(payload.object.sha)
            .map_err(|err| BranchProvisionError::MalformedResponse(err.to_string()))
    }

    async fn create_ref(
        &self,
        repository: &RepositorySlug,
        branch: &BranchName,
        sha: &CommitSha,
    ) -> BranchProvisionResult<()> {
        let path = format!("/repos/{}/{}/git/refs", repository.owner(), repository.name());
        let qualified = branch.qualified_ref();
        let request = self
            .client
            .post(&path)
            .ok_or(BranchProvisionError::MissingCredential)?
            .json(&CreateRefPayload {
                reference: &qualified,
                sha: sha.as_str(),
            });

        tracing::debug!(%repository, %branch, %sha, "creating branch");
        let response = request
            .send()
            .await
            .map_err(BranchProvisionError::transport)?;
        let status = response.status();
        if status != reqwest::StatusCode::CREATED {
            return Err(BranchProvisionError::Rejected {
                branch: branch.clone(),
                status: status.as_u16(),
            });
        }
        Ok(())
    }
}
