//! Text analysis for plans, insights and rituals.
//!
//! The analysis service is an opaque collaborator that turns a prompt into
//! natural-language text. Callers never see its failures as errors: the
//! [`services::AnalysisClient`] folds them into [`domain::Analysis::Degraded`]
//! so a pipeline keeps moving while still being able to tell a genuine
//! analysis from a fallback.
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - The degrading client in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;
