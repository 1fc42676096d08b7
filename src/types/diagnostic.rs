//! One row of the diagnostic report

use serde::{Deserialize, Serialize};

use crate::types::{join_reasons, ParticipantId, ReasonCode, Valence, Veracity};

/// Inference outcome for one scanned file.
/// Field order is the report's column order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiagnosticRecord {
    #[serde(rename = "File")]
    pub file: String,
    #[serde(rename = "Dir")]
    pub dir: String,
    #[serde(rename = "Participant")]
    pub participant: ParticipantId,
    #[serde(rename = "Valence")]
    pub valence: Valence,
    #[serde(rename = "Veracity")]
    pub veracity: Veracity,
    #[serde(rename = "Matched_Component")]
    pub matched_component: String,
    #[serde(rename = "Reason")]
    pub reason: String,
    #[serde(skip)]
    pub reasons: Vec<ReasonCode>,
}

impl DiagnosticRecord {
    pub fn new(
        file: String,
        dir: String,
        participant: ParticipantId,
        valence: Valence,
        veracity: Veracity,
        matched_component: Option<String>,
    ) -> Self {
        let mut reasons = Vec::new();
        if participant.is_unknown() {
            reasons.push(ReasonCode::ParticipantIdNotFound);
        }
        if !valence.is_known() {
            reasons.push(ReasonCode::ValenceNotFound);
        }
        if !veracity.is_known() {
            reasons.push(ReasonCode::VeracityNotFound);
        }
        Self {
            file,
            dir,
            participant,
            valence,
            veracity,
            matched_component: matched_component.unwrap_or_default(),
            reason: join_reasons(&reasons),
            reasons,
        }
    }

    pub fn is_resolved(&self) -> bool {
        self.reasons.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reasons_follow_unknown_axes() {
        let record = DiagnosticRecord::new(
            "x.csv".into(),
            "/d".into(),
            ParticipantId::unknown(),
            Valence::Positive,
            Veracity::Unknown,
            None,
        );
        assert!(!record.is_resolved());
        assert_eq!(record.reason, "participant_id_not_found|veracity_not_found");
        assert_eq!(record.matched_component, "");
    }

    #[test]
    fn test_resolved_record_has_empty_reason() {
        let record = DiagnosticRecord::new(
            "PPG_WM013_PL.csv".into(),
            "/d".into(),
            ParticipantId::normalize("WM013"),
            Valence::Positive,
            Veracity::Lie,
            Some("PPG_WM013_PL.csv [PL]".into()),
        );
        assert!(record.is_resolved());
        assert_eq!(record.reason, "");
    }
}
