//! In-memory ritual repository.

use async_trait::async_trait;
use std::sync::{Arc, RwLock};

use crate::knowledge::{
    domain::{Ritual, RitualDraft, RitualNumber},
    ports::{RitualRepository, RitualRepositoryError, RitualRepositoryResult},
};

/// Thread-safe, append-only in-memory ritual store.
///
/// The write lock covers both numbering and appending.
#[derive(Debug, Clone, Default)]
pub struct InMemoryRitualRepository {
    rituals: Arc<RwLock<Vec<Ritual>>>,
}

impl InMemoryRitualRepository {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

fn lock_error(err: impl ToString) -> RitualRepositoryError {
    RitualRepositoryError::persistence(std::io::Error::other(err.to_string()))
}

#[async_trait]
impl RitualRepository for InMemoryRitualRepository {
    async fn append(&self, draft: RitualDraft) -> RitualRepositoryResult<Ritual> {
        let mut rituals = self.rituals.write().map_err(lock_error)?;
        let ritual = Ritual::from_draft(RitualNumber::after(rituals.len()), draft);
        rituals.push(ritual.clone());
        Ok(ritual)
    }

    async fn list(&self) -> RitualRepositoryResult<Vec<Ritual>> {
        let rituals = self.rituals.read().map_err(lock_error)?;
        Ok(rituals.clone())
    }

    async fn count(&self) -> RitualRepositoryResult<usize> {
        let rituals = self.rituals.read().map_err(lock_error)?;
        Ok(rituals.len())
    }
}
