//! Port contracts for knowledge storage.

pub mod insight_repository;
pub mod ritual_repository;

pub use insight_repository::{InsightRepository, InsightRepositoryError, InsightRepositoryResult};
pub use ritual_repository::{RitualRepository, RitualRepositoryError, RitualRepositoryResult};
