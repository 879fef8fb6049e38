//! Keyword-driven tag extraction.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// Category label attached to an insight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tag {
    /// Server-side work.
    Backend,
    /// User-interface work.
    Frontend,
    /// Tests and coverage.
    Testing,
    /// Deployment and infrastructure.
    Deployment,
    /// Autonomous or AI-driven behaviour.
    Autonomy,
    /// Bug hunting and fixes.
    Debugging,
    /// Speed and optimisation.
    Performance,
}

/// Categories detected in the raw content.
const CONTENT_KEYWORDS: &[(Tag, &[&str])] = &[
    (Tag::Backend, &["api", "endpoint", "router", "backend"]),
    (Tag::Frontend, &["frontend", "react", "ui", "component"]),
    (Tag::Testing, &["test", "pytest", "coverage"]),
    (Tag::Deployment, &["deploy", "cloud", "docker"]),
];

/// Categories detected in the analysis text.
const ANALYSIS_KEYWORDS: &[(Tag, &[&str])] = &[
    (Tag::Autonomy, &["autonomous", "self", "ai"]),
    (Tag::Debugging, &["error", "fix", "bug"]),
    (Tag::Performance, &["performance", "optimize", "speed"]),
];

impl Tag {
    /// Returns the canonical tag name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Backend => "backend",
            Self::Frontend => "frontend",
            Self::Testing => "testing",
            Self::Deployment => "deployment",
            Self::Autonomy => "autonomy",
            Self::Debugging => "debugging",
            Self::Performance => "performance",
        }
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Derives the tags of an insight from its content and analysis text.
///
/// Keywords match as case-insensitive substrings, so `"ui"` also fires on
/// `"build"`. The result depends only on the two inputs.
#[must_use]
pub fn extract_tags(content: &str, analysis: &str) -> BTreeSet<Tag> {
    let content_lower = content.to_lowercase();
    let analysis_lower = analysis.to_lowercase();
    matching_tags(CONTENT_KEYWORDS, &content_lower)
        .chain(matching_tags(ANALYSIS_KEYWORDS, &analysis_lower))
        .collect()
}

fn matching_tags<'a>(
    rules: &'a [(Tag, &[&str])],
    haystack: &'a str,
) -> impl Iterator<Item = Tag> + 'a {
    rules
        .iter()
        .filter(move |(_, keywords)| keywords.iter().any(|keyword| haystack.contains(keyword)))
        .map(|(tag, _)| *tag)
}
