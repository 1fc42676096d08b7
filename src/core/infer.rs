//! Per-file inference: participant + condition, overrides applied

use crate::core::classifier::ConditionClassifier;
use crate::core::identity::IdentifierExtractor;
use crate::core::overrides::ConditionOverrides;
use crate::core::walker::CsvFile;
use crate::types::{Classification, Condition, ParticipantMatch};

/// What the heuristics concluded about one file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileInference {
    pub participant: ParticipantMatch,
    pub classification: Classification,
}

impl FileInference {
    pub fn condition(&self) -> Condition {
        self.classification.condition()
    }
}

/// Runs extractor, classifier and override lookup with the same rules
/// for the auditor and the summarizers.
pub struct FileInferrer<'a> {
    extractor: IdentifierExtractor,
    classifier: ConditionClassifier,
    overrides: &'a ConditionOverrides,
}

impl<'a> FileInferrer<'a> {
    pub fn new(overrides: &'a ConditionOverrides) -> Self {
        Self {
            extractor: IdentifierExtractor::new(),
            classifier: ConditionClassifier::new(),
            overrides,
        }
    }

    pub fn infer(&self, file: &CsvFile) -> FileInference {
        let participant = self.extractor.extract_with_source(&file.filename, &file.dir);
        let heuristic = self.classifier.classify(&file.dir, Some(&file.filename));
        let classification = self.overrides.apply(heuristic, &file.dir);

        log::debug!(
            "{}: participant={} ({:?}) condition={} ({:?})",
            file.path.display(),
            participant.id,
            participant.source,
            classification.condition(),
            classification.source
        );

        FileInference {
            participant,
            classification,
        }
    }
}
