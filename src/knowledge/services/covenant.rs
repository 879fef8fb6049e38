//! Read-only statistics over insights, rituals and tasks.

use crate::error::ErrorKind;
use crate::knowledge::{
    domain::{
        AutonomyStatus, CovenantSnapshot, CovenantStats, Insight, KnowledgeStats, Tag, is_recent,
    },
    ports::{InsightRepository, InsightRepositoryError, RitualRepository, RitualRepositoryError},
};
use crate::task::{
    domain::TaskStatusCounts,
    ports::{TaskRepository, TaskRepositoryError},
};
use chrono::{DateTime, Utc};
use mockable::Clock;
use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;
use thiserror::Error;

/// Service-level errors for statistics.
#[derive(Debug, Error)]
pub enum CovenantError {
    /// Insight store failed.
    #[error(transparent)]
    Insights(#[from] InsightRepositoryError),
    /// Ritual store failed.
    #[error(transparent)]
    Rituals(#[from] RitualRepositoryError),
    /// Task store failed.
    #[error(transparent)]
    Tasks(#[from] TaskRepositoryError),
}

impl CovenantError {
    /// Returns the broad failure class.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::Insights(err) => err.kind(),
            Self::Rituals(err) => err.kind(),
            Self::Tasks(err) => err.kind(),
        }
    }
}

/// Result type for statistics operations.
pub type CovenantResult<T> = Result<T, CovenantError>;

/// Projects summary counters from the stores.
#[derive(Clone)]
pub struct CovenantService<I, R, T, C>
where
    I: InsightRepository,
    R: RitualRepository,
    T: TaskRepository,
    C: Clock + Send + Sync,
{
    insights: Arc<I>,
    rituals: Arc<R>,
    tasks: Arc<T>,
    clock: Arc<C>,
}

impl<I, R, T, C> CovenantService<I, R, T, C>
where
    I: InsightRepository,
    R: RitualRepository,
    T: TaskRepository,
    C: Clock + Send + Sync,
{
    /// Creates a new statistics service.
    #[must_use]
    pub const fn new(insights: Arc<I>, rituals: Arc<R>, tasks: Arc<T>, clock: Arc<C>) -> Self {
        Self {
            insights,
            rituals,
            tasks,
            clock,
        }
    }

    /// Returns insight distributions and the task status breakdown.
    ///
    /// # Errors
    ///
    /// Returns [`CovenantError`] when a store fails.
    pub async fn stats(&self) -> CovenantResult<KnowledgeStats> {
        let insights = self.insights.list().await?;
        let tasks = self.tasks.list().await?;
        let now = self.clock.utc();

        let mut tag_distribution = BTreeMap::new();
        let mut source_distribution = BTreeMap::new();
        for insight in &insights {
            for tag in insight.tags() {
                *tag_distribution.entry(*tag).or_insert(0) += 1;
            }
            *source_distribution
                .entry(insight.source().to_owned())
                .or_insert(0) += 1;
        }

        Ok(KnowledgeStats {
            total_insights: insights.len(),
            tag_distribution,
            source_distribution,
            recent_insights: count_recent(&insights, now),
            task_status: TaskStatusCounts::tally(&tasks),
        })
    }

    /// Returns a point-in-time summary of insights and rituals.
    ///
    /// # Errors
    ///
    /// Returns [`CovenantError`] when a store fails.
    pub async fn covenant(&self) -> CovenantResult<CovenantSnapshot> {
        let insights = self.insights.list().await?;
        let ritual_count = self.rituals.count().await?;
        let now = self.clock.utc();

        let mut unique_tags: Vec<Tag> = insights
            .iter()
            .flat_map(|insight| insight.tags().iter().copied())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();
        unique_tags.sort_unstable_by_key(|tag| tag.as_str());
        let total_insights = insights.len();

        Ok(CovenantSnapshot {
            timestamp: now,
            knowledge_stats: CovenantStats {
                total_insights,
                total_rituals: ritual_count,
                unique_tags,
                recent_insights: count_recent(&insights, now),
            },
            autonomy_status: AutonomyStatus::from_insight_count(total_insights),
            knowledge_base_size: total_insights,
            ritual_count,
        })
    }
}

fn count_recent(insights: &[Insight], now: DateTime<Utc>) -> usize {
    insights
        .iter()
        .filter(|insight| is_recent(insight.timestamp(), now))
        .count()
}
