//! Core modules for physum

pub mod audit;
pub mod classifier;
pub mod coverage;
pub mod identity;
pub mod infer;
pub mod long;
pub mod master;
pub mod output;
pub mod overrides;
pub mod pipeline;
pub mod reader;
pub mod summarizer;
pub mod table;
pub mod walker;

pub use audit::{AuditReport, DiagnosticsAuditor};
pub use classifier::ConditionClassifier;
pub use coverage::{ColumnCoverage, CoverageReport};
pub use identity::IdentifierExtractor;
pub use infer::{FileInference, FileInferrer};
pub use long::{LongRow, LongTable, LongTableBuilder, LONG_COLUMNS};
pub use master::{master_columns, MasterTableBuilder};
pub use overrides::ConditionOverrides;
pub use pipeline::{Pipeline, RunOutput};
pub use reader::{find_column, read_channel, ChannelRead};
pub use summarizer::{load_summaries, load_summary, summary_path, ChannelSummary, ModalitySummarizer};
pub use table::{group_mean, pivot, WideTable, KEY_COLUMN};
pub use walker::{CsvFile, CsvWalker};
