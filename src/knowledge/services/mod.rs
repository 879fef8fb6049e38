//! Application services for the knowledge store.

mod covenant;
mod insights;
mod rituals;

pub use covenant::{CovenantError, CovenantResult, CovenantService};
pub use insights::{
    DEFAULT_SEARCH_LIMIT, DEFAULT_SOURCE, INSIGHT_PROMPT, IngestRequest, IngestedInsight,
    KnowledgeError, KnowledgeResult, KnowledgeService, SearchQuery, SearchResults,
};
pub use rituals::{RITUAL_PROMPT, RitualError, RitualResult, RitualService};
