//! Run configuration.

use std::path::{Path, PathBuf};

use crate::{MAPPING_FILE_NAME, OUTPUT_DIR_NAME, PREVIEW_ROWS};

/// Everything a pipeline run needs to know about its inputs and outputs.
#[derive(Clone, Debug)]
pub struct PipelineConfig {
    /// Root of the input tree
    pub root: PathBuf,
    /// Name of the output directory created under `root`; never scanned
    pub output_dir_name: String,
    /// Explicit override file. `None` means the default location
    pub mapping_path: Option<PathBuf>,
    /// Drop rows with an Unknown axis before pivoting
    pub drop_unknown: bool,
    /// Rows shown in the long-table console preview
    pub preview_rows: usize,
}

impl PipelineConfig {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            output_dir_name: OUTPUT_DIR_NAME.to_string(),
            mapping_path: None,
            drop_unknown: true,
            preview_rows: PREVIEW_ROWS,
        }
    }

    pub fn with_mapping_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.mapping_path = Some(path.into());
        self
    }

    pub fn with_drop_unknown(mut self, drop_unknown: bool) -> Self {
        self.drop_unknown = drop_unknown;
        self
    }

    pub fn with_preview_rows(mut self, rows: usize) -> Self {
        self.preview_rows = rows;
        self
    }

    pub fn with_output_dir_name(mut self, name: impl Into<String>) -> Self {
        self.output_dir_name = name.into();
        self
    }

    /// `<root>/<output_dir_name>`
    pub fn output_dir(&self) -> PathBuf {
        self.root.join(&self.output_dir_name)
    }

    /// Explicit mapping path, or `<output_dir>/conditions_mapping.csv`
    pub fn resolved_mapping_path(&self) -> PathBuf {
        match &self.mapping_path {
            Some(path) => path.clone(),
            None => self.output_dir().join(MAPPING_FILE_NAME),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}
