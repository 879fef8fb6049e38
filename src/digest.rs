//! Short content-derived identifiers used as dedup keys.
//!
//! A [`ContentDigest`] is the first eight lowercase hex characters of the
//! SHA-256 digest of its input. Eight characters give 32 bits of space, so
//! distinct inputs can collide; callers that key on a digest accept that.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fmt;

/// Number of digest bytes kept, rendered as two hex characters each.
const DIGEST_BYTES: usize = 4;

/// Length of a rendered digest in characters.
pub const DIGEST_LENGTH: usize = DIGEST_BYTES * 2;

/// Eight-character hex digest of some content.
///
/// # Examples
///
///     use kortana::digest::{ContentDigest, DIGEST_LENGTH};
///
///     let digest = ContentDigest::of("notes:hello");
///     assert_eq!(digest.as_str().len(), DIGEST_LENGTH);
///     assert_eq!(digest, ContentDigest::of("notes:hello"));
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ContentDigest(String);

impl ContentDigest {
    /// Computes the digest of `input`.
    #[must_use]
    pub fn of(input: &str) -> Self {
        let hash = Sha256::digest(input.as_bytes());
        let rendered = hash
            .iter()
            .take(DIGEST_BYTES)
            .map(|byte| format!("{byte:02x}"))
            .collect();
        Self(rendered)
    }

    /// Returns the digest as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for ContentDigest {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for ContentDigest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Returns at most the first `limit` characters of `value`.
///
/// Counts Unicode scalar values, never splitting a character.
#[must_use]
pub fn truncate_chars(value: &str, limit: usize) -> String {
    value.chars().take(limit).collect()
}
