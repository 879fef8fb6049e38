//! Insight aggregate and identity.

use super::{KnowledgeDomainError, Tag, extract_tags};
use crate::analysis::domain::Analysis;
use crate::digest::{ContentDigest, truncate_chars};
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// Number of content characters kept in storage.
pub const CONTENT_STORAGE_LIMIT: usize = 500;

/// Number of content characters contributing to the insight identity.
pub const DIGEST_CONTENT_PREFIX: usize = 100;

/// Free-form metadata carried with an insight.
pub type Metadata = serde_json::Map<String, serde_json::Value>;

/// Insight identity: digest of `"<source>:<first 100 content chars>"`.
///
/// The digest is eight hex characters, so unrelated source/content pairs
/// can map to the same identity and overwrite each other.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct InsightId(ContentDigest);

impl InsightId {
    /// Derives the identity of content from `source`.
    #[must_use]
    pub fn derive(source: &str, content: &str) -> Self {
        let prefix = truncate_chars(content, DIGEST_CONTENT_PREFIX);
        Self(ContentDigest::of(&format!("{source}:{prefix}")))
    }

    /// Returns the identifier as `str`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for InsightId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Whether storing an insight added a record or replaced one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UpsertOutcome {
    /// A new record was appended.
    Ingested,
    /// An existing record with the same identity was replaced in place.
    Updated,
}

/// Parameter object for building an [`Insight`].
#[derive(Debug, Clone, PartialEq)]
pub struct InsightParams {
    /// Origin label.
    pub source: String,
    /// Full, untruncated content.
    pub content: String,
    /// Analysis of the content.
    pub analysis: Analysis,
    /// Caller-supplied metadata.
    pub metadata: Metadata,
}

/// A stored, tagged unit of extracted knowledge.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Insight {
    id: InsightId,
    source: String,
    content: String,
    insights: Analysis,
    metadata: Metadata,
    tags: BTreeSet<Tag>,
    timestamp: DateTime<Utc>,
}

impl Insight {
    /// Builds an insight, deriving its identity and tags.
    ///
    /// Identity and tags are computed from the full content; only the first
    /// [`CONTENT_STORAGE_LIMIT`] characters are kept.
    ///
    /// # Errors
    ///
    /// Returns [`KnowledgeDomainError::EmptyContent`] when the content is
    /// blank.
    pub fn new(params: InsightParams, clock: &impl Clock) -> Result<Self, KnowledgeDomainError> {
        if params.content.trim().is_empty() {
            return Err(KnowledgeDomainError::EmptyContent);
        }

        let tags = extract_tags(&params.content, params.analysis.text());
        Ok(Self {
            id: InsightId::derive(&params.source, &params.content),
            content: truncate_chars(&params.content, CONTENT_STORAGE_LIMIT),
            source: params.source,
            insights: params.analysis,
            metadata: params.metadata,
            tags,
            timestamp: clock.utc(),
        })
    }

    /// Returns the insight identity.
    #[must_use]
    pub const fn id(&self) -> &InsightId {
        &self.id
    }

    /// Returns the origin label.
    #[must_use]
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Returns the stored, possibly truncated, content.
    #[must_use]
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Returns the analysis of the content.
    #[must_use]
    pub const fn insights(&self) -> &Analysis {
        &self.insights
    }

    /// Returns the caller-supplied metadata.
    #[must_use]
    pub const fn metadata(&self) -> &Metadata {
        &self.metadata
    }

    /// Returns the derived tags.
    #[must_use]
    pub const fn tags(&self) -> &BTreeSet<Tag> {
        &self.tags
    }

    /// Returns the creation or last update time.
    #[must_use]
    pub const fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    /// Returns `true` when `needle_lower`, already lower-cased, occurs in the
    /// lower-cased content or analysis text.
    #[must_use]
    pub fn mentions(&self, needle_lower: &str) -> bool {
        self.content.to_lowercase().contains(needle_lower)
            || self.insights.text().to_lowercase().contains(needle_lower)
    }

    /// Returns `true` when `wanted` is empty or shares a tag with this insight.
    #[must_use]
    pub fn has_any_tag(&self, wanted: &BTreeSet<Tag>) -> bool {
        wanted.is_empty() || !self.tags.is_disjoint(wanted)
    }
}
