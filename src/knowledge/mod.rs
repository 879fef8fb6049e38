//! Knowledge store: insights, rituals and covenant statistics.
//!
//! Development content is analysed, tagged and stored as [`domain::Insight`]
//! records keyed by a short content digest, so re-ingesting the same source
//! and content updates the existing record in place. Rituals are milestone
//! documents numbered sequentially from 17. The module follows hexagonal
//! architecture:
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
