//! Participant identifiers

use serde::{Deserialize, Serialize};

use crate::UNKNOWN_PARTICIPANT;

/// Canonical participant ID: two letters + three digits, or `UNKNOWN`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ParticipantId(String);

impl ParticipantId {
    /// Normalize a raw matched token: uppercase, and zero-pad `LLDD` to `LL0DD`.
    pub fn normalize(raw: &str) -> Self {
        let upper = raw.to_uppercase();
        let chars: Vec<char> = upper.chars().collect();
        if chars.len() == 4
            && chars[..2].iter().all(|c| c.is_alphabetic())
            && chars[2..].iter().all(|c| c.is_ascii_digit())
        {
            let letters: String = chars[..2].iter().collect();
            let digits: String = chars[2..].iter().collect();
            return Self(format!("{letters}0{digits}"));
        }
        Self(upper)
    }

    pub fn unknown() -> Self {
        Self(UNKNOWN_PARTICIPANT.to_string())
    }

    /// Wrap an ID read back from an existing summary table, unchanged.
    pub fn from_table(value: &str) -> Self {
        Self(value.to_string())
    }

    pub fn is_unknown(&self) -> bool {
        self.0 == UNKNOWN_PARTICIPANT
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::borrow::Borrow<str> for ParticipantId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ParticipantId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Which fallback step produced an ID
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IdSource {
    /// ID regex against the file name
    FilenamePattern,
    /// Token split of the file name
    FilenameToken,
    /// ID regex against the flattened directory path
    PathPattern,
    /// Token split of the directory path
    PathToken,
    /// Nothing matched
    NotFound,
}

/// Extractor output with provenance
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParticipantMatch {
    pub id: ParticipantId,
    pub source: IdSource,
}
