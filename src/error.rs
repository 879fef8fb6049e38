//! Error classification shared by every bounded context.
//!
//! Each context keeps its own `thiserror` enums; [`ErrorKind`] lets callers
//! branch on the broad failure class without matching concrete variants.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Broad class of a failure surfaced to callers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// A required credential or setting is missing or malformed.
    Configuration,
    /// An external collaborator failed or answered with a non-success status.
    Collaborator,
    /// A required input field was empty or malformed.
    InputValidation,
    /// The requested operation is not valid in the entity's current state.
    State,
    /// The referenced entity does not exist.
    NotFound,
    /// The backing store failed.
    Storage,
}

impl ErrorKind {
    /// Returns the canonical snake-case name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Configuration => "configuration",
            Self::Collaborator => "collaborator",
            Self::InputValidation => "input_validation",
            Self::State => "state",
            Self::NotFound => "not_found",
            Self::Storage => "storage",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
