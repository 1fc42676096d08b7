//! physum: participant/condition inference and summary tables for
//! physiological CSV batches.
//!
//! Pipeline: walk → identify + classify → per-channel summaries → master wide
//! table, and independently summaries → long table. The auditor runs over the
//! same files and explains every classification failure.

pub mod config;
pub mod core;
pub mod error;
pub mod types;

pub use config::PipelineConfig;
pub use error::{PhysumError, Result};

// =============================================================================
// OUTPUT LAYOUT
// =============================================================================

/// Output directory created under the input root. Excluded from discovery.
pub const OUTPUT_DIR_NAME: &str = "summaries";

/// Diagnostic report file name
pub const DIAGNOSTICS_FILE_NAME: &str = "_diagnostics_unknowns.csv";

/// Master wide table file name
pub const MASTER_FILE_NAME: &str = "master_wide.csv";

/// Long table file name
pub const LONG_FILE_NAME: &str = "all_channels_long.csv";

/// Default override file name, looked up inside the output directory
pub const MAPPING_FILE_NAME: &str = "conditions_mapping.csv";

// =============================================================================
// HEURISTICS
// =============================================================================

/// How many ancestor directories the keyword scan inspects
pub const MAX_ANCESTOR_LEVELS: usize = 5;

/// Sentinel for an unresolved participant
pub const UNKNOWN_PARTICIPANT: &str = "UNKNOWN";

// =============================================================================
// NUMERICS
// =============================================================================

/// Decimal digits kept in aggregated cells
pub const ROUND_DECIMALS: i32 = 6;

/// Decimal digits shown in the console preview
pub const PREVIEW_DECIMALS: i32 = 2;

/// Default number of rows in the console preview
pub const PREVIEW_ROWS: usize = 12;

// =============================================================================
// VERSION
// =============================================================================

pub const VERSION: &str = "1.0.0";
