//! Process configuration.
//!
//! Settings come from the environment with fixed defaults for everything
//! except the GitHub token, which stays optional until an operation needs
//! it.

use crate::error::ErrorKind;
use crate::task::adapters::github::DEFAULT_API_URL;
use crate::task::domain::{BranchName, RepositorySlug, TaskDomainError};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Environment variable holding the GitHub access token.
pub const GITHUB_TOKEN_VAR: &str = "GITHUB_TOKEN";
/// Environment variable naming the repository owner.
pub const REPO_OWNER_VAR: &str = "GITHUB_REPO_OWNER";
/// Environment variable naming the repository.
pub const REPO_NAME_VAR: &str = "GITHUB_REPO_NAME";
/// Environment variable holding the analysis backend root URL.
pub const BACKEND_URL_VAR: &str = "KORTANA_BACKEND_URL";
/// Environment variable overriding the GitHub API root.
pub const GITHUB_API_URL_VAR: &str = "GITHUB_API_URL";
/// Environment variable naming the branch task branches are cut from.
pub const BASE_BRANCH_VAR: &str = "KORTANA_BASE_BRANCH";

/// Errors raised while validating configuration.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// The GitHub token is not set.
    #[error("{GITHUB_TOKEN_VAR} is not configured")]
    MissingToken,

    /// The repository owner or name is malformed.
    #[error("invalid repository configuration: {0}")]
    InvalidRepository(TaskDomainError),

    /// The base branch name is malformed.
    #[error("invalid base branch configuration: {0}")]
    InvalidBaseBranch(TaskDomainError),
}

impl ConfigError {
    /// Returns the broad failure class.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        ErrorKind::Configuration
    }
}

/// Runtime settings for the autonomy core.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KortanaConfig {
    /// GitHub access token.
    #[serde(default)]
    pub github_token: Option<String>,

    /// Owner of the repository issues are read from.
    #[serde(default = "default_repo_owner")]
    pub repo_owner: String,

    /// Repository issues are read from.
    #[serde(default = "default_repo_name")]
    pub repo_name: String,

    /// Root URL of the analysis backend.
    #[serde(default = "default_backend_url")]
    pub backend_url: String,

    /// Root URL of the GitHub REST API.
    #[serde(default = "default_github_api_url")]
    pub github_api_url: String,

    /// Branch task branches are cut from.
    #[serde(default = "default_base_branch")]
    pub base_branch: String,
}

fn default_repo_owner() -> String {
    "KOR-TANA".to_owned()
}

fn default_repo_name() -> String {
    "kortana".to_owned()
}

fn default_backend_url() -> String {
    "http://localhost:8000".to_owned()
}

fn default_github_api_url() -> String {
    DEFAULT_API_URL.to_owned()
}

fn default_base_branch() -> String {
    "main".to_owned()
}

impl Default for KortanaConfig {
    fn default() -> Self {
        Self {
            github_token: None,
            repo_owner: default_repo_owner(),
            repo_name: default_repo_name(),
            backend_url: default_backend_url(),
            github_api_url: default_github_api_url(),
            base_branch: default_base_branch(),
        }
    }
}

impl KortanaConfig {
    /// Reads settings from the process environment.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads settings through `lookup`, falling back to defaults for unset
    /// or blank values.
    #[must_use]
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let read = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());
        let defaults = Self::default();
        Self {
            github_token: read(GITHUB_TOKEN_VAR),
            repo_owner: read(REPO_OWNER_VAR).unwrap_or(defaults.repo_owner),
            repo_name: read(REPO_NAME_VAR).unwrap_or(defaults.repo_name),
            backend_url: read(BACKEND_URL_VAR).unwrap_or(defaults.backend_url),
            github_api_url: read(GITHUB_API_URL_VAR).unwrap_or(defaults.github_api_url),
            base_branch: read(BASE_BRANCH_VAR).unwrap_or(defaults.base_branch),
        }
    }

    /// Returns the configured repository.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidRepository`] when the owner or name is
    /// malformed.
    pub fn repository(&self) -> Result<RepositorySlug, ConfigError> {
        RepositorySlug::new(self.repo_owner.as_str(), self.repo_name.as_str())
            .map_err(ConfigError::InvalidRepository)
    }

    /// Returns the configured base branch.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidBaseBranch`] when the name is malformed.
    pub fn base_branch(&self) -> Result<BranchName, ConfigError> {
        BranchName::new(self.base_branch.as_str()).map_err(ConfigError::InvalidBaseBranch)
    }

    /// Returns the GitHub token.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingToken`] when no token is configured.
    pub fn require_token(&self) -> Result<&str, ConfigError> {
        self.github_token.as_deref().ok_or(ConfigError::MissingToken)
    }
}
