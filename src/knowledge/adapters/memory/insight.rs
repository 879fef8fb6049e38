//! In-memory insight repository.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::knowledge::{
    domain::{Insight, InsightId, UpsertOutcome},
    ports::{InsightRepository, InsightRepositoryError, InsightRepositoryResult},
};

/// Thread-safe, insertion-ordered in-memory insight store.
#[derive(Debug, Clone, Default)]
pub struct InMemoryInsightRepository {
    state: Arc<RwLock<InMemoryInsightState>>,
}

#[derive(Debug, Default)]
struct InMemoryInsightState {
    insights: Vec<Insight>,
    positions: HashMap<InsightId, usize>,
}

impl InMemoryInsightRepository {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

fn lock_error(err: impl ToString) -> InsightRepositoryError {
    InsightRepositoryError::persistence(std::io::Error::other(err.to_string()))
}

#[async_trait]
impl InsightRepository for InMemoryInsightRepository {
    async fn upsert(&self, insight: &Insight) -> InsightRepositoryResult<UpsertOutcome> {
        let mut state = self.state.write().map_err(lock_error)?;
        let existing = state.positions.get(insight.id()).copied();
        if let Some(slot) = existing.and_then(|position| state.insights.get_mut(position)) {
            *slot = insight.clone();
            return Ok(UpsertOutcome::Updated);
        }

        let position = state.insights.len();
        state.positions.insert(insight.id().clone(), position);
        state.insights.push(insight.clone());
        Ok(UpsertOutcome::Ingested)
    }

    async fn list(&self) -> InsightRepositoryResult<Vec<Insight>> {
        let state = self.state.read().map_err(lock_error)?;
        Ok(state.insights.clone())
    }

    async fn count(&self) -> InsightRepositoryResult<usize> {
        let state = self.state.read().map_err(lock_error)?;
        Ok(state.insights.len())
    }
}
