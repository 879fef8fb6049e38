//! In-memory knowledge stores.

mod insight;
mod ritual;

pub use insight::InMemoryInsightRepository;
pub use ritual::InMemoryRitualRepository;
