//! Milestone ritual documents.

use super::KnowledgeDomainError;
use crate::analysis::domain::Analysis;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Sequence number given to the first ritual of a process.
pub const FIRST_RITUAL_NUMBER: u32 = 17;

/// Sequential ritual number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RitualNumber(u32);

impl RitualNumber {
    /// Returns the number of the ritual following `existing` earlier ones.
    #[must_use]
    pub fn after(existing: usize) -> Self {
        let offset = u32::try_from(existing).unwrap_or(u32::MAX);
        Self(FIRST_RITUAL_NUMBER.saturating_add(offset))
    }

    /// Returns the numeric value.
    #[must_use]
    pub const fn value(self) -> u32 {
        self.0
    }
}

impl fmt::Display for RitualNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Non-empty milestone name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Milestone(String);

impl Milestone {
    /// Creates a validated milestone.
    ///
    /// # Errors
    ///
    /// Returns [`KnowledgeDomainError::EmptyMilestone`] when the value is
    /// blank.
    pub fn new(value: impl Into<String>) -> Result<Self, KnowledgeDomainError> {
        let raw = value.into();
        let normalized = raw.trim();
        if normalized.is_empty() {
            return Err(KnowledgeDomainError::EmptyMilestone);
        }
        Ok(Self(normalized.to_owned()))
    }

    /// Returns the milestone as `str`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Milestone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A ritual awaiting its sequence number.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RitualDraft {
    /// Milestone being marked.
    pub milestone: Milestone,
    /// Free-text context supplied by the caller.
    pub context: String,
    /// Generated document body.
    pub content: Analysis,
    /// Generation time.
    pub timestamp: DateTime<Utc>,
}

/// A numbered milestone document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ritual {
    id: String,
    number: RitualNumber,
    title: String,
    milestone: Milestone,
    content: Analysis,
    context: String,
    timestamp: DateTime<Utc>,
}

impl Ritual {
    /// Numbers a draft.
    #[must_use]
    pub fn from_draft(number: RitualNumber, draft: RitualDraft) -> Self {
        Self {
            id: format!("ritual_{number}"),
            number,
            title: format!("Ritual_{number}.md"),
            milestone: draft.milestone,
            content: draft.content,
            context: draft.context,
            timestamp: draft.timestamp,
        }
    }

    /// Returns the identifier, `ritual_<n>`.
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Returns the sequence number.
    #[must_use]
    pub const fn number(&self) -> RitualNumber {
        self.number
    }

    /// Returns the document title, `Ritual_<n>.md`.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns the milestone.
    #[must_use]
    pub const fn milestone(&self) -> &Milestone {
        &self.milestone
    }

    /// Returns the generated document body.
    #[must_use]
    pub const fn content(&self) -> &Analysis {
        &self.content
    }

    /// Returns the caller-supplied context.
    #[must_use]
    pub fn context(&self) -> &str {
        &self.context
    }

    /// Returns the generation time.
    #[must_use]
    pub const fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }
}
