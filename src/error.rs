//! Error type for the fatal failure modes.
//!
//! Per-file problems never surface here: they are logged and the file is
//! skipped. Only walking the root, writing outputs and loading the override
//! file can abort a run.

use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, PhysumError>;

#[derive(Error, Debug)]
pub enum PhysumError {
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("CSV error at {path}: {source}")]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("directory walk failed: {0}")]
    Walk(#[from] walkdir::Error),

    #[error("input root is not a directory: {0}")]
    InvalidRoot(PathBuf),

    #[error("{path} has no '{column}' column")]
    MissingColumn { path: PathBuf, column: String },

    #[error("malformed override file {path}: {reason}")]
    Overrides { path: PathBuf, reason: String },
}

impl PhysumError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    pub fn csv(path: impl Into<PathBuf>, source: csv::Error) -> Self {
        Self::Csv {
            path: path.into(),
            source,
        }
    }
}
