//! Domain model for the knowledge store.

mod error;
mod insight;
mod ritual;
mod stats;
mod tags;

pub use error::KnowledgeDomainError;
pub use insight::{
    CONTENT_STORAGE_LIMIT, DIGEST_CONTENT_PREFIX, Insight, InsightId, InsightParams, Metadata,
    UpsertOutcome,
};
pub use ritual::{FIRST_RITUAL_NUMBER, Milestone, Ritual, RitualDraft, RitualNumber};
pub use stats::{
    AutonomyStatus, CovenantSnapshot, CovenantStats, KnowledgeStats, RECENT_WINDOW_DAYS,
    is_recent,
};
pub use tags::{Tag, extract_tags};
