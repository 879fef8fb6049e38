//! GitHub REST adapters for the issue-source and branch-provisioning ports.
//!
//! Both adapters share a [`GitHubClient`] holding the API base URL and the
//! optional access token. A missing token is reported before any request is
//! sent.

mod branch_provisioner;
mod issue_source;

pub use branch_provisioner::GitHubBranchProvisioner;
pub use issue_source::GitHubIssueSource;

use reqwest::RequestBuilder;

/// Public GitHub REST API root.
pub const DEFAULT_API_URL: &str = "https://api.github.com";

const ACCEPT_HEADER: &str = "application/vnd.github.v3+json";
const USER_AGENT: &str = concat!("kortana/", env!("CARGO_PKG_VERSION"));

/// Authenticated access to the GitHub REST API.
#[derive(Debug, Clone)]
pub struct GitHubClient {
    http: reqwest::Client,
    api_url: String,
    token: Option<String>,
}

impl GitHubClient {
    /// Creates a client for the API rooted at `api_url`.
    ///
    /// Blank tokens are treated as absent.
    #[must_use]
    pub fn new(api_url: &str, token: Option<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            api_url: api_url.trim_end_matches('/').to_owned(),
            token: token.filter(|value| !value.trim().is_empty()),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.api_url)
    }

    /// Builds an authenticated GET request, or `None` without a token.
    fn get(&self, path: &str) -> Option<RequestBuilder> {
        self.authorize(self.http.get(self.url(path)))
    }

    /// Builds an authenticated POST request, or `None` without a token.
    fn post(&self, path: &str) -> Option<RequestBuilder> {
        self.authorize(self.http.post(self.url(path)))
    }

    fn authorize(&self, request: RequestBuilder) -> Option<RequestBuilder> {
        self.token.as_ref().map(|token| {
            request
                .header(reqwest::header::AUTHORIZATION, format!("token {token}"))
                .header(reqwest::header::ACCEPT, ACCEPT_HEADER)
                .header(reqwest::header::USER_AGENT, USER_AGENT)
        })
    }
}
