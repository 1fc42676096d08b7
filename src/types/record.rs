//! Raw measurement values read from one file

use std::path::PathBuf;

use crate::types::Channel;

/// Numeric values of one channel from one source file
#[derive(Debug, Clone, PartialEq)]
pub struct RawRecord {
    pub file: PathBuf,
    pub dir: PathBuf,
    pub channel: Channel,
    /// Header the values were read from
    pub column: String,
    /// Parsed, finite values in file order. Never empty.
    pub values: Vec<f64>,
}

impl RawRecord {
    pub fn mean(&self) -> f64 {
        self.values.iter().sum::<f64>() / self.values.len() as f64
    }
}
