//! Classifier output

use serde::{Deserialize, Serialize};

use crate::types::{Condition, Valence, Veracity};

/// Which rule resolved the condition
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClassificationSource {
    /// PL/PT/NL/NT code in the file name
    FilenameShortCode,
    /// PL/PT/NL/NT code in the directory path
    PathShortCode,
    /// At least one axis resolved by keyword
    Keyword,
    /// Replaced by the override mapping
    Override,
    /// Nothing matched on either axis
    Unresolved,
}

/// Result of classifying one file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Classification {
    pub valence: Valence,
    pub veracity: Veracity,
    /// Text fragment that triggered the match
    pub matched: Option<String>,
    pub source: ClassificationSource,
}

impl Classification {
    pub fn condition(&self) -> Condition {
        Condition::new(self.valence, self.veracity)
    }
}
