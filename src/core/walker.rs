//! CSV discovery under the input root

use std::path::{Path, PathBuf};

use walkdir::{DirEntry, WalkDir};

use crate::error::{PhysumError, Result};

/// A discovered CSV file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CsvFile {
    pub path: PathBuf,
    /// Containing directory
    pub dir: PathBuf,
    /// File name without directory
    pub filename: String,
}

impl CsvFile {
    pub fn from_path(path: &Path) -> Option<Self> {
        let filename = path.file_name()?.to_string_lossy().into_owned();
        let dir = path.parent()?.to_path_buf();
        Some(Self {
            path: path.to_path_buf(),
            dir,
            filename,
        })
    }
}

/// Walks the input tree and collects `.csv` files.
///
/// Directories named like the output directory are pruned at any depth.
/// Entries are visited in file-name order so every run sees the same sequence.
pub struct CsvWalker {
    root: PathBuf,
    excluded_dir: String,
}

impl CsvWalker {
    pub fn new(root: impl AsRef<Path>, excluded_dir: impl Into<String>) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
            excluded_dir: excluded_dir.into(),
        }
    }

    pub fn scan(&self) -> Result<Vec<CsvFile>> {
        if !self.root.is_dir() {
            return Err(PhysumError::InvalidRoot(self.root.clone()));
        }

        let mut files = Vec::new();
        let walker = WalkDir::new(&self.root)
            .follow_links(true)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|entry| !self.is_excluded(entry));

        for entry in walker {
            let entry = match entry {
                Ok(entry) => entry,
                // The root itself failing is not recoverable
                Err(e) if e.depth() == 0 => return Err(e.into()),
                Err(e) => {
                    log::warn!("Skipping unreadable entry: {e}");
                    continue;
                }
            };
            if !entry.file_type().is_file() || !is_csv(entry.path()) {
                continue;
            }
            if let Some(file) = CsvFile::from_path(entry.path()) {
                files.push(file);
            }
        }

        log::info!("Found {} CSV files under {}", files.len(), self.root.display());
        Ok(files)
    }

    fn is_excluded(&self, entry: &DirEntry) -> bool {
        entry.depth() > 0
            && entry.file_type().is_dir()
            && entry
                .file_name()
                .to_str()
                .is_some_and(|name| name.eq_ignore_ascii_case(&self.excluded_dir))
    }
}

fn is_csv(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("csv"))
}
