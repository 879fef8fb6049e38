//! Adapter implementations for task queue ports.

pub mod github;
pub mod memory;
