//! Diagnostics auditor
//!
//! Runs identity and condition inference over every discovered file and
//! records why anything stayed unresolved. Independent of the summarizers:
//! it never opens the files, only looks at their names.

use std::collections::BTreeMap;
use std::path::Path;

use crate::core::infer::FileInferrer;
use crate::core::output::{csv_buffer, finish_buffer, write_output};
use crate::core::overrides::ConditionOverrides;
use crate::core::walker::CsvFile;
use crate::error::{PhysumError, Result};
use crate::types::{DiagnosticRecord, WrittenOutput, REASON_OK};

/// All diagnostic rows plus the reason tally
#[derive(Debug, Clone, Default)]
pub struct AuditReport {
    pub records: Vec<DiagnosticRecord>,
    /// Reason token → file count. Resolved files count under `ok`.
    pub tally: BTreeMap<String, usize>,
}

impl AuditReport {
    pub fn unresolved(&self) -> impl Iterator<Item = &DiagnosticRecord> {
        self.records.iter().filter(|r| !r.is_resolved())
    }

    pub fn resolved_count(&self) -> usize {
        self.tally.get(REASON_OK).copied().unwrap_or(0)
    }

    /// Serialize as `File,Dir,Participant,Valence,Veracity,Matched_Component,Reason`
    pub fn to_csv_bytes(&self, path: &Path) -> Result<Vec<u8>> {
        let mut writer = csv_buffer();
        for record in &self.records {
            writer
                .serialize(record)
                .map_err(|e| PhysumError::csv(path, e))?;
        }
        finish_buffer(writer, path)
    }

    pub fn write(&self, path: &Path) -> Result<WrittenOutput> {
        let bytes = self.to_csv_bytes(path)?;
        write_output(path, &bytes, self.records.len())
    }
}

pub struct DiagnosticsAuditor<'a> {
    inferrer: FileInferrer<'a>,
}

impl<'a> DiagnosticsAuditor<'a> {
    pub fn new(overrides: &'a ConditionOverrides) -> Self {
        Self {
            inferrer: FileInferrer::new(overrides),
        }
    }

    pub fn audit_file(&self, file: &CsvFile) -> DiagnosticRecord {
        let inference = self.inferrer.infer(file);
        let classification = inference.classification;
        DiagnosticRecord::new(
            file.filename.clone(),
            file.dir.display().to_string(),
            inference.participant.id,
            classification.valence,
            classification.veracity,
            classification.matched,
        )
    }

    pub fn audit(&self, files: &[CsvFile]) -> AuditReport {
        let mut report = AuditReport::default();
        for file in files {
            let record = self.audit_file(file);
            if record.is_resolved() {
                *report.tally.entry(REASON_OK.to_string()).or_insert(0) += 1;
            } else {
                for reason in &record.reasons {
                    *report.tally.entry(reason.code().to_string()).or_insert(0) += 1;
                }
                log::debug!("Unresolved {}: {}", file.path.display(), record.reason);
            }
            report.records.push(record);
        }
        report
    }
}

// =============================================================================
// TESTS
// =============================================================================
