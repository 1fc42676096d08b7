//! Explicit condition overrides keyed by folder name
//!
//! File format (`folder_key,valence,veracity`):
//!
//! ```text
//! folder_key,valence,veracity
//! PT,Positive,Truth
//! pos_mentira,Positive,Lie
//! ```

use std::collections::HashMap;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use serde::Deserialize;

use crate::error::{PhysumError, Result};
use crate::types::{Classification, ClassificationSource, Condition, Valence, Veracity};

#[derive(Debug, Deserialize)]
struct OverrideRow {
    folder_key: String,
    valence: String,
    veracity: String,
}

/// Lowercase folder key → condition. Passed explicitly into the pipeline.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConditionOverrides {
    entries: HashMap<String, Condition>,
}

impl ConditionOverrides {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load from a CSV file. A missing file is an empty mapping.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            log::info!("No override file at {}", path.display());
            return Ok(Self::new());
        }
        let file = File::open(path).map_err(|e| PhysumError::io(path, e))?;
        let overrides = Self::from_reader(file, path)?;
        log::info!(
            "Loaded {} condition overrides from {}",
            overrides.len(),
            path.display()
        );
        Ok(overrides)
    }

    /// Parse override rows. `origin` is only used in error messages.
    pub fn from_reader<R: Read>(reader: R, origin: &Path) -> Result<Self> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);

        let mut overrides = Self::new();
        for (index, row) in csv_reader.deserialize::<OverrideRow>().enumerate() {
            let row = row.map_err(|e| PhysumError::Overrides {
                path: origin.to_path_buf(),
                reason: format!("row {}: {}", index + 1, e),
            })?;

            let condition = Condition::new(
                Valence::from_label(&row.valence),
                Veracity::from_label(&row.veracity),
            );
            if !condition.is_known() {
                log::warn!(
                    "Override '{}' maps to unrecognised condition '{} {}'",
                    row.folder_key,
                    row.valence,
                    row.veracity
                );
            }
            overrides.insert(&row.folder_key, condition);
        }
        Ok(overrides)
    }

    pub fn insert(&mut self, key: &str, condition: Condition) {
        self.entries.insert(key.trim().to_lowercase(), condition);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Try parent, then grandparent, then `parent/grandparent`.
    /// Returns the condition and the segment that matched.
    pub fn lookup(&self, parent: &str, grandparent: &str) -> Option<(Condition, String)> {
        if self.entries.is_empty() {
            return None;
        }
        for segment in [parent, grandparent] {
            let key = segment.trim().to_lowercase();
            if key.is_empty() {
                continue;
            }
            if let Some(condition) = self.entries.get(&key) {
                return Some((*condition, segment.to_string()));
            }
        }
        let joined = format!(
            "{}/{}",
            parent.trim().to_lowercase(),
            grandparent.trim().to_lowercase()
        );
        self.entries
            .get(&joined)
            .map(|condition| (*condition, joined.clone()))
    }

    /// Override `classification` if the file's directory matches a key.
    pub fn apply(&self, classification: Classification, dir: &Path) -> Classification {
        let parent = dir_name(Some(dir));
        let grandparent = dir_name(dir.parent());
        match self.lookup(&parent, &grandparent) {
            Some((condition, segment)) => Classification {
                valence: condition.valence,
                veracity: condition.veracity,
                matched: Some(segment),
                source: ClassificationSource::Override,
            },
            None => classification,
        }
    }
}

fn dir_name(path: Option<&Path>) -> String {
    path.and_then(Path::file_name)
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
}
