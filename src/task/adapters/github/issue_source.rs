//! GitHub issue listing.

use super::GitHubClient;
use crate::task::{
    domain::{RepositorySlug, SourceIssue},
    ports::{IssueSource, IssueSourceError, IssueSourceResult},
};
use async_trait::async_trait;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
struct IssuePayload {
    number: u64,
    title: String,
    body: Option<String>,
    pull_request: Option<serde_json::Value>,
}

impl IssuePayload {
    fn into_source_issue(self) -> IssueSourceResult<SourceIssue> {
        let number = self.number;
        let mut issue = SourceIssue::new(number, self.title)
            .map_err(|err| IssueSourceError::MalformedResponse(format!("issue #{number}: {err}")))?;
        if let Some(body) = self.body {
            issue = issue.with_body(body);
        }
        if self.pull_request.is_some() {
            issue = issue.as_pull_request();
        }
        Ok(issue)
    }
}

/// Lists open issues through `GET /repos/{owner}/{repo}/issues?state=open`.
///
/// Records that fail validation, such as a blank title, are skipped with a
/// warning so one bad record does not hide the rest of the listing.
#[derive(Debug, Clone)]
pub struct GitHubIssueSource {
    client: GitHubClient,
}

impl GitHubIssueSource {
    /// Creates an issue source over `client`.
    #[must_use]
    pub const fn new(client: GitHubClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl IssueSource for GitHubIssueSource {
    async fn list_open_issues(
        &self,
        repository: &RepositorySlug,
    ) -> IssueSourceResult<Vec<SourceIssue>> {
        let path = format!(
            "/repos/{}/{}/issues?state=open",
            repository.owner(),
            repository.name()
        );
        let request = self
            .client
            .get(&path)
            .ok_or(IssueSourceError::MissingCredential)?;

        tracing::debug!(%repository, "listing open issues");
        let response = request.send().await.map_err(IssueSourceError::transport)?;
        let status = response.status();
        if status != reqwest::StatusCode::OK {
            return Err(IssueSourceError::Status {
                repository: repository.clone(),
                status: status.as_u16(),
            });
        }

        let payloads: Vec<IssuePayload> = response
            .json()
            .await
            .map_err(|err| IssueSourceError::MalformedResponse(err.to_string()))?;
        let issues = payloads
            .into_iter()
            .filter_map(|payload| match payload.into_source_issue() {
                Ok(issue) => Some(issue),
                Err(error) => {
                    tracing::warn!(%repository, %error, "skipping malformed issue record");
                    None
                }
            })
            .collect();
        Ok(issues)
    }
}
