//! Run report: what was scanned, skipped and written

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::types::Channel;

/// Per-channel summarizer counters
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChannelOutcome {
    /// Files that contributed a mean
    pub files_used: usize,
    /// Files without a matching column or without numeric values
    pub files_without_column: usize,
    /// Files that could not be read or parsed
    pub files_unreadable: usize,
    /// Per-file rows whose condition had an Unknown axis
    pub unknown_rows: usize,
    /// Unknown rows removed before pivoting
    pub dropped_rows: usize,
    /// Rows in the written summary
    pub participants: usize,
}

/// A file the run wrote, with its SHA-256
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WrittenOutput {
    pub path: String,
    pub rows: usize,
    pub sha256: String,
}

/// Everything a run did, for terminal or JSON display
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunReport {
    pub timestamp: DateTime<Utc>,
    /// CSV files discovered under the root
    pub files_scanned: usize,
    /// Reason token → file count (`ok` for resolved files)
    pub reason_tally: BTreeMap<String, usize>,
    pub channels: BTreeMap<Channel, ChannelOutcome>,
    pub outputs: Vec<WrittenOutput>,
    /// User-facing notices (empty results, missing inputs)
    pub notices: Vec<String>,
}

impl RunReport {
    pub fn new() -> Self {
        Self {
            timestamp: Utc::now(),
            files_scanned: 0,
            reason_tally: BTreeMap::new(),
            channels: BTreeMap::new(),
            outputs: Vec::new(),
            notices: Vec::new(),
        }
    }

    pub fn notice(&mut self, message: impl Into<String>) {
        self.notices.push(message.into());
    }

    /// One line per written output, no colors
    pub fn to_parseable_string(&self) -> String {
        self.outputs
            .iter()
            .map(|o| format!("wrote={} | rows={} | sha256={}", o.path, o.rows, o.sha256))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl Default for RunReport {
    fn default() -> Self {
        Self::new()
    }
}
