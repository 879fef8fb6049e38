//! Outcome of a single analysis request.

use serde::{Deserialize, Serialize};

/// Text produced for a prompt, or the fallback used in its place.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum Analysis {
    /// The analysis service answered.
    Generated {
        /// Text returned by the service.
        text: String,
    },
    /// The analysis service could not be used; `fallback` stands in.
    Degraded {
        /// Fixed placeholder exposed as the analysis text.
        fallback: String,
        /// Diagnostic describing why the service was not used.
        reason: String,
    },
}

impl Analysis {
    /// Creates a generated analysis.
    #[must_use]
    pub fn generated(text: impl Into<String>) -> Self {
        Self::Generated { text: text.into() }
    }

    /// Creates a degraded analysis.
    #[must_use]
    pub fn degraded(fallback: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Degraded {
            fallback: fallback.into(),
            reason: reason.into(),
        }
    }

    /// Returns the text to present, whichever variant this is.
    #[must_use]
    pub fn text(&self) -> &str {
        match self {
            Self::Generated { text } => text,
            Self::Degraded { fallback, .. } => fallback,
        }
    }

    /// Returns `true` when the fallback was used.
    #[must_use]
    pub const fn is_degraded(&self) -> bool {
        matches!(self, Self::Degraded { .. })
    }

    /// Returns the degradation diagnostic, if any.
    #[must_use]
    pub fn degradation_reason(&self) -> Option<&str> {
        match self {
            Self::Generated { .. } => None,
            Self::Degraded { reason, .. } => Some(reason),
        }
    }
}
