//! Read-only projections over the knowledge and task stores.

use super::Tag;
use crate::task::domain::TaskStatusCounts;
use chrono::{DateTime, TimeDelta, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Width of the "recent" window in days.
pub const RECENT_WINDOW_DAYS: i64 = 7;

/// Returns `true` when `timestamp` is at most [`RECENT_WINDOW_DAYS`] before
/// `now`. Timestamps after `now` count as recent.
#[must_use]
pub fn is_recent(timestamp: DateTime<Utc>, now: DateTime<Utc>) -> bool {
    now.signed_duration_since(timestamp) <= TimeDelta::days(RECENT_WINDOW_DAYS)
}

/// Aggregate counters over insights and tasks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KnowledgeStats {
    /// Number of stored insights.
    pub total_insights: usize,
    /// Number of insights carrying each tag.
    pub tag_distribution: BTreeMap<Tag, usize>,
    /// Number of insights per source label.
    pub source_distribution: BTreeMap<String, usize>,
    /// Number of insights inside the recent window.
    pub recent_insights: usize,
    /// Number of tasks in each status.
    pub task_status: TaskStatusCounts,
}

/// Whether the knowledge store has started accumulating insights.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AutonomyStatus {
    /// At least one insight is stored.
    Active,
    /// No insight is stored yet.
    Initializing,
}

impl AutonomyStatus {
    /// Derives the status from the number of stored insights.
    #[must_use]
    pub const fn from_insight_count(total_insights: usize) -> Self {
        if total_insights > 0 {
            Self::Active
        } else {
            Self::Initializing
        }
    }
}

/// Counters reported inside a [`CovenantSnapshot`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CovenantStats {
    /// Number of stored insights.
    pub total_insights: usize,
    /// Number of generated rituals.
    pub total_rituals: usize,
    /// Every tag present on at least one insight, sorted by name.
    pub unique_tags: Vec<Tag>,
    /// Number of insights inside the recent window.
    pub recent_insights: usize,
}

/// Point-in-time summary of the knowledge and ritual collections.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CovenantSnapshot {
    /// Time the snapshot was taken.
    pub timestamp: DateTime<Utc>,
    /// Knowledge counters.
    pub knowledge_stats: CovenantStats,
    /// Whether any insight exists.
    pub autonomy_status: AutonomyStatus,
    /// Number of stored insights.
    pub knowledge_base_size: usize,
    /// Number of generated rituals.
    pub ritual_count: usize,
}
