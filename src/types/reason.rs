//! Failure reason codes for the diagnostic report

use serde::{Deserialize, Serialize};

/// Why a file could not be fully resolved
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReasonCode {
    /// No participant ID in the file name or path
    ParticipantIdNotFound,
    /// Valence axis stayed Unknown
    ValenceNotFound,
    /// Veracity axis stayed Unknown
    VeracityNotFound,
}

impl ReasonCode {
    /// Token written to the report
    pub fn code(&self) -> &'static str {
        match self {
            Self::ParticipantIdNotFound => "participant_id_not_found",
            Self::ValenceNotFound => "valence_not_found",
            Self::VeracityNotFound => "veracity_not_found",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Self::ParticipantIdNotFound => "No participant ID in file name or path",
            Self::ValenceNotFound => "Valence could not be inferred",
            Self::VeracityNotFound => "Veracity could not be inferred",
        }
    }
}

impl std::fmt::Display for ReasonCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.code(), self.description())
    }
}

/// Tally key for fully resolved files
pub const REASON_OK: &str = "ok";

/// Pipe-join reason tokens; empty when nothing failed.
pub fn join_reasons(reasons: &[ReasonCode]) -> String {
    reasons
        .iter()
        .map(ReasonCode::code)
        .collect::<Vec<_>>()
        .join("|")
}
