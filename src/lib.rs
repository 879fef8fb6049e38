//! Kortana: autonomous work-item orchestration with a knowledge store.
//!
//! The crate queues externally sourced issues as tasks, drives each task
//! from `pending` to a terminal state while drafting a plan and provisioning
//! a branch, and separately accumulates tagged insights and milestone
//! rituals from development activity.
//!
//! # Architecture
//!
//! Each bounded context follows hexagonal architecture:
//!
//! - **Domain**: Pure business logic with no infrastructure dependencies
//! - **Ports**: Abstract trait interfaces for external interactions
//! - **Adapters**: In-memory stores and HTTP clients implementing the ports
//! - **Services**: Orchestration over injected ports and a clock
//!
//! # Modules
//!
//! - [`analysis`]: Text-analysis collaborator with explicit degradation
//! - [`task`]: Issue ingestion and the task lifecycle engine
//! - [`knowledge`]: Insights, rituals and covenant statistics
//! - [`config`]: Environment-driven settings
//! - [`error`]: Error classification shared across contexts

pub mod analysis;
pub mod config;
pub mod digest;
pub mod error;
pub mod knowledge;
pub mod task;
pub mod telemetry;

#[cfg(test)]
mod test_support;
