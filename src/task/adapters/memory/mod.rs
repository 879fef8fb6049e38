//! In-memory adapters for the task queue ports.

mod branch_provisioner;
mod issue_source;
mod task;

pub use branch_provisioner::InMemoryBranchProvisioner;
pub use issue_source::InMemoryIssueSource;
pub use task::InMemoryTaskRepository;
