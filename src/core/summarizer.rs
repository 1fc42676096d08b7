//! Per-channel wide summaries
//!
//! One file contributes one mean. Means sharing (participant, condition)
//! are averaged again, then spread into the four fixed condition columns.

use std::path::{Path, PathBuf};

use crate::core::infer::FileInferrer;
use crate::core::overrides::ConditionOverrides;
use crate::core::reader::{read_channel, ChannelRead};
use crate::core::table::{group_mean, pivot, WideTable};
use crate::core::walker::CsvFile;
use crate::error::Result;
use crate::types::{Channel, ChannelOutcome, Condition, ParticipantId, CONDITION_COLUMNS};
use crate::ROUND_DECIMALS;

/// Result of summarizing one channel
#[derive(Debug, Clone)]
pub struct ChannelSummary {
    pub channel: Channel,
    /// `None` when nothing survived; no file is written then
    pub table: Option<WideTable>,
    pub outcome: ChannelOutcome,
    pub notice: Option<String>,
}

pub struct ModalitySummarizer<'a> {
    inferrer: FileInferrer<'a>,
    drop_unknown: bool,
}

impl<'a> ModalitySummarizer<'a> {
    pub fn new(overrides: &'a ConditionOverrides, drop_unknown: bool) -> Self {
        Self {
            inferrer: FileInferrer::new(overrides),
            drop_unknown,
        }
    }

    /// Per-file means tagged with participant and condition
    fn observations(
        &self,
        channel: Channel,
        files: &[CsvFile],
        outcome: &mut ChannelOutcome,
    ) -> Vec<(ParticipantId, Condition, f64)> {
        let mut observations = Vec::new();

        for file in files {
            let record = match read_channel(file, channel) {
                Ok(ChannelRead::Found(record)) => record,
                Ok(ChannelRead::MissingColumn) => {
                    log::debug!("{}: no {} column", file.path.display(), channel);
                    outcome.files_without_column += 1;
                    continue;
                }
                Ok(ChannelRead::NoValues { column }) => {
                    log::debug!("{}: '{}' has no numeric values", file.path.display(), column);
                    outcome.files_without_column += 1;
                    continue;
                }
                Err(e) => {
                    log::warn!("Skipping {}: {}", file.path.display(), e);
                    outcome.files_unreadable += 1;
                    continue;
                }
            };

            let inference = self.inferrer.infer(file);
            let condition = inference.condition();
            if !condition.is_known() {
                outcome.unknown_rows += 1;
                if self.drop_unknown {
                    outcome.dropped_rows += 1;
                    continue;
                }
            }

            outcome.files_used += 1;
            observations.push((inference.participant.id, condition, record.mean()));
        }

        observations
    }

    pub fn summarize(&self, channel: Channel, files: &[CsvFile]) -> ChannelSummary {
        let mut outcome = ChannelOutcome::default();
        let observations = self.observations(channel, files, &mut outcome);

        if observations.is_empty() {
            let notice = if outcome.dropped_rows > 0 {
                format!(
                    "{}: no data left after dropping {} Unknown-condition rows",
                    channel, outcome.dropped_rows
                )
            } else {
                format!("{channel}: nothing found")
            };
            return ChannelSummary {
                channel,
                table: None,
                outcome,
                notice: Some(notice),
            };
        }

        let means = group_mean(observations);
        let table = pivot(&means, &CONDITION_COLUMNS).rounded(ROUND_DECIMALS);
        outcome.participants = table.len();
        log::info!(
            "{}: {} files, {} participants",
            channel,
            outcome.files_used,
            outcome.participants
        );

        ChannelSummary {
            channel,
            table: Some(table),
            outcome,
            notice: None,
        }
    }
}

/// `<output_dir>/<channel>_summary.csv`
pub fn summary_path(output_dir: &Path, channel: Channel) -> PathBuf {
    output_dir.join(channel.summary_file_name())
}

/// Read back a written summary. `None` if it was never written.
pub fn load_summary(output_dir: &Path, channel: Channel) -> Result<Option<WideTable>> {
    let path = summary_path(output_dir, channel);
    if !path.is_file() {
        log::info!("No {} summary at {}", channel, path.display());
        return Ok(None);
    }
    WideTable::read(&path).map(Some)
}

/// Every summary present on disk, in channel order
pub fn load_summaries(output_dir: &Path) -> Result<Vec<(Channel, WideTable)>> {
    let mut summaries = Vec::new();
    for channel in Channel::ALL {
        if let Some(table) = load_summary(output_dir, channel)? {
            summaries.push((channel, table));
        }
    }
    Ok(summaries)
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Valence, Veracity};
    use pretty_assertions::assert_eq;
    use std::fs;
    use tempfile::TempDir;

    struct Tree {
        tmp: TempDir,
    }

    /// Pin folder conditions so the random temp-dir name never feeds the heuristics
    fn overrides() -> ConditionOverrides {
        let mut overrides = ConditionOverrides::new();
        overrides.insert("pl", Condition::new(Valence::Positive, Veracity::Lie));
        overrides.insert("pt", Condition::new(Valence::Positive, Veracity::Truth));
        overrides.insert("nt", Condition::new(Valence::Negative, Veracity::Truth));
        overrides.insert("misc", Condition::unknown());
        overrides
    }

    impl Tree {
        fn new() -> Self {
            Self {
                tmp: TempDir::new().unwrap(),
            }
        }

        fn add(&self, rel: &str, content: &str) -> CsvFile {
            let path = self.tmp.path().join(rel);
            fs::create_dir_all(path.parent().unwrap()).unwrap();
            fs::write(&path, content).unwrap();
            CsvFile::from_path(&path).unwrap()
        }
    }

    #[test]
    fn test_unreadable_file_is_skipped() {
        let tree = Tree::new();
        let good = tree.add("PL/AB001.csv", "BPM\n60\n");
        let bad = tree.add("PL/AB002.csv", "");
        fs::write(&bad.path, b"BPM\n\xff\xfe\n").unwrap();

        let overrides = overrides();
        let summary =
            ModalitySummarizer::new(&overrides, true).summarize(Channel::Bpm, &[good, bad]);

        assert_eq!(summary.outcome.files_unreadable, 1);
        assert_eq!(summary.outcome.files_used, 1);
        assert_eq!(summary.outcome.participants, 1);
        let table = summary.table.unwrap();
        assert_eq!(table.get("AB001", "Positive Lie"), Some(60.0));
        assert!(!table.contains("AB002"));
    }

    #[test]
    fn test_means_are_averaged_per_condition() {
        let tree = Tree::new();
        let files = vec![
            tree.add("PL/AB001_a.csv", "BPM\n60\n80\n"),
            tree.add("PL/AB001_b.csv", "BPM\n90\n"),
            tree.add("NT/AB001.csv", "BPM\n65\n"),
            tree.add("NT/AB002.csv", "Time,Face_Movement\n0,1.5\n"),
        ];
        let overrides = overrides();
        let summary = ModalitySummarizer::new(&overrides, true).summarize(Channel::Bpm, &files);
        let table = summary.table.unwrap();

        assert_eq!(table.get("AB001", "Positive Lie"), Some(80.0));
        assert_eq!(table.get("AB001", "Negative Truth"), Some(65.0));
        assert_eq!(table.get("AB001", "Negative Lie"), None);
        assert!(!table.contains("AB002"));
        assert_eq!(summary.outcome.files_used, 3);
        assert_eq!(summary.outcome.files_without_column, 1);
        assert_eq!(summary.outcome.participants, 1);
        assert_eq!(summary.notice, None);
    }

    #[test]
    fn test_unknown_rows_dropped_by_default() {
        let tree = Tree::new();
        let files = vec![tree.add("misc/AB001.csv", "BPM\n60\n")];
        let overrides = overrides();
        let summary = ModalitySummarizer::new(&overrides, true).summarize(Channel::Bpm, &files);

        assert!(summary.table.is_none());
        assert_eq!(summary.outcome.unknown_rows, 1);
        assert_eq!(summary.outcome.dropped_rows, 1);
        assert!(summary.notice.unwrap().contains("Unknown"));
    }

    #[test]
    fn test_kept_unknown_participant_has_empty_row() {
        let tree = Tree::new();
        let files = vec![tree.add("misc/AB001.csv", "BPM\n60\n")];
        let overrides = overrides();
        let summary = ModalitySummarizer::new(&overrides, false).summarize(Channel::Bpm, &files);
        let table = summary.table.unwrap();

        assert!(table.contains("AB001"));
        assert_eq!(table.non_absent_count(), 0);
        assert_eq!(table.columns().len(), 4);
    }

    #[test]
    fn test_nothing_found() {
        let tree = Tree::new();
        let files = vec![tree.add("PL/AB001.csv", "Time\n0\n")];
        let overrides = overrides();
        let summary = ModalitySummarizer::new(&overrides, true).summarize(Channel::Eye, &files);

        assert!(summary.table.is_none());
        assert_eq!(summary.notice.as_deref(), Some("Eye: nothing found"));
    }

    #[test]
    fn test_values_rounded_to_six_places() {
        let tree = Tree::new();
        let files = vec![tree.add("PT/AB001.csv", "Eye_Movement\n0.1234567\n")];
        let overrides = overrides();
        let summary = ModalitySummarizer::new(&overrides, true).summarize(Channel::Eye, &files);
        let table = summary.table.unwrap();
        assert_eq!(table.get("AB001", "Positive Truth"), Some(0.123457));
    }
}
