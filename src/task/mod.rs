//! Autonomous task queue.
//!
//! Open issues from the issue source are queued as pending tasks, then
//! executed one at a time: a plan is drafted through the analysis service
//! and a feature branch is provisioned from the configured base branch. The
//! module follows hexagonal architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
