//! End-to-end run: discover → audit → summaries → master → long

use std::fs;

use crate::config::PipelineConfig;
use crate::core::audit::{AuditReport, DiagnosticsAuditor};
use crate::core::coverage::CoverageReport;
use crate::core::long::{LongTable, LongTableBuilder};
use crate::core::master::MasterTableBuilder;
use crate::core::overrides::ConditionOverrides;
use crate::core::summarizer::{load_summaries, summary_path, ChannelSummary, ModalitySummarizer};
use crate::core::table::WideTable;
use crate::core::walker::{CsvFile, CsvWalker};
use crate::error::{PhysumError, Result};
use crate::types::{Channel, RunReport};
use crate::{DIAGNOSTICS_FILE_NAME, LONG_FILE_NAME, MASTER_FILE_NAME};

/// Everything a run produced
#[derive(Debug, Default)]
pub struct RunOutput {
    pub report: RunReport,
    pub audit: Option<AuditReport>,
    pub master: Option<WideTable>,
    pub coverage: Option<CoverageReport>,
    pub long: Option<LongTable>,
}

pub struct Pipeline {
    config: PipelineConfig,
    overrides: ConditionOverrides,
}

impl Pipeline {
    /// Load the override file named by `config` (missing is fine).
    pub fn new(config: PipelineConfig) -> Result<Self> {
        let overrides = ConditionOverrides::load(&config.resolved_mapping_path())?;
        Ok(Self::with_overrides(config, overrides))
    }

    pub fn with_overrides(config: PipelineConfig, overrides: ConditionOverrides) -> Self {
        Self { config, overrides }
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    pub fn overrides(&self) -> &ConditionOverrides {
        &self.overrides
    }

    pub fn discover(&self) -> Result<Vec<CsvFile>> {
        CsvWalker::new(self.config.root(), self.config.output_dir_name.as_str()).scan()
    }

    /// Audit `files` and write the diagnostic report
    pub fn run_audit(&self, files: &[CsvFile], report: &mut RunReport) -> Result<AuditReport> {
        let audit = DiagnosticsAuditor::new(&self.overrides).audit(files);
        report.reason_tally = audit.tally.clone();

        let path = self.config.output_dir().join(DIAGNOSTICS_FILE_NAME);
        report.outputs.push(audit.write(&path)?);
        Ok(audit)
    }

    /// Summarize every channel; write the ones with data and remove the
    /// previous summary of any channel that has none
    pub fn run_summaries(
        &self,
        files: &[CsvFile],
        report: &mut RunReport,
    ) -> Result<Vec<ChannelSummary>> {
        let summarizer = ModalitySummarizer::new(&self.overrides, self.config.drop_unknown);
        let output_dir = self.config.output_dir();

        let mut summaries = Vec::with_capacity(Channel::ALL.len());
        for channel in Channel::ALL {
            let summary = summarizer.summarize(channel, files);
            let path = summary_path(&output_dir, channel);
            match &summary.table {
                Some(table) => report.outputs.push(table.write(&path)?),
                None if path.is_file() => {
                    fs::remove_file(&path).map_err(|e| PhysumError::io(&path, e))?;
                    log::info!("Removed stale {}", path.display());
                }
                None => {}
            }
            if let Some(notice) = &summary.notice {
                report.notice(notice.clone());
            }
            report.channels.insert(channel, summary.outcome.clone());
            summaries.push(summary);
        }
        Ok(summaries)
    }

    /// Join the summaries on disk into the master table
    pub fn run_master(&self, report: &mut RunReport) -> Result<Option<WideTable>> {
        let output_dir = self.config.output_dir();
        let summaries = load_summaries(&output_dir)?;

        let Some(master) = MasterTableBuilder::new().build(&summaries) else {
            report.notice("No summaries to merge; master table not written");
            return Ok(None);
        };
        report.outputs.push(master.write(&output_dir.join(MASTER_FILE_NAME))?);
        Ok(Some(master))
    }

    /// Reshape the summaries on disk into the long table
    pub fn run_long(&self, report: &mut RunReport) -> Result<Option<LongTable>> {
        let output_dir = self.config.output_dir();
        let summaries = load_summaries(&output_dir)?;

        for channel in Channel::ALL {
            if !summaries.iter().any(|(c, _)| *c == channel) {
                report.notice(format!(
                    "{} not found; skipping {}",
                    summary_path(&output_dir, channel).display(),
                    channel
                ));
            }
        }

        let long = LongTableBuilder::new().build(&summaries);
        if long.is_empty() {
            report.notice("Nothing to save; check that the wide summaries exist");
            return Ok(None);
        }
        report.outputs.push(long.write(&output_dir.join(LONG_FILE_NAME))?);
        Ok(Some(long))
    }

    /// Scan the tree; an empty tree is a notice, not an error.
    fn scan(&self, report: &mut RunReport) -> Result<Option<Vec<CsvFile>>> {
        let files = self.discover()?;
        report.files_scanned = files.len();
        if files.is_empty() {
            report.notice(format!(
                "No CSV files found under {}",
                self.config.root().display()
            ));
            return Ok(None);
        }
        Ok(Some(files))
    }

    /// Diagnostics only
    pub fn run_audit_only(&self) -> Result<RunOutput> {
        let mut output = RunOutput::default();
        if let Some(files) = self.scan(&mut output.report)? {
            output.audit = Some(self.run_audit(&files, &mut output.report)?);
        }
        Ok(output)
    }

    /// Long table from summaries already on disk
    pub fn run_long_only(&self) -> Result<RunOutput> {
        let mut output = RunOutput::default();
        output.long = self.run_long(&mut output.report)?;
        Ok(output)
    }

    /// Audit, three summaries, master, then long
    pub fn run_all(&self) -> Result<RunOutput> {
        let mut output = RunOutput::default();
        let Some(files) = self.scan(&mut output.report)? else {
            return Ok(output);
        };

        output.audit = Some(self.run_audit(&files, &mut output.report)?);
        self.run_summaries(&files, &mut output.report)?;

        output.master = self.run_master(&mut output.report)?;
        output.coverage = output.master.as_ref().map(CoverageReport::from_table);
        output.long = self.run_long(&mut output.report)?;
        Ok(output)
    }
}
