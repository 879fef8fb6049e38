//! Port contracts for the task queue.
//!
//! Ports define infrastructure-agnostic interfaces used by task services.

pub mod branch_provisioner;
pub mod issue_source;
pub mod repository;

pub use branch_provisioner::{BranchProvisionError, BranchProvisionResult, BranchProvisioner};
pub use issue_source::{IssueSource, IssueSourceError, IssueSourceResult};
pub use repository::{TaskRepository, TaskRepositoryError, TaskRepositoryResult};
