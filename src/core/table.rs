//! Minimal table layer: participant-keyed wide tables and the reshaping
//! primitives the summaries need (group-mean, pivot, outer-join, melt).

use std::collections::{BTreeMap, BTreeSet};
use std::fs::File;
use std::path::Path;

use crate::core::output::{csv_buffer, finish_buffer, write_output};
use crate::error::{PhysumError, Result};
use crate::types::{Condition, ParticipantId, WrittenOutput};

/// Key column of every wide table
pub const KEY_COLUMN: &str = "Participant";

/// Coerce a cell to a number. Blank, unparseable and non-finite cells are absent.
pub fn parse_number(cell: &str) -> Option<f64> {
    let trimmed = cell.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Round half-to-even at `decimals` digits
pub fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round_ties_even() / factor
}

/// Shortest round-trip form; integral values keep a trailing `.0`.
pub fn format_value(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e16 {
        format!("{value:.1}")
    } else {
        format!("{value}")
    }
}

/// Absent cells are empty strings
pub fn format_cell(value: Option<f64>) -> String {
    value.map(format_value).unwrap_or_default()
}

/// Opens a CSV file, tolerating ragged rows.
pub fn open_csv(path: &Path) -> Result<csv::Reader<File>> {
    csv::ReaderBuilder::new()
        .flexible(true)
        .from_path(path)
        .map_err(|e| PhysumError::csv(path, e))
}

/// Header names with a leading byte-order mark removed
pub fn clean_headers(headers: &csv::StringRecord) -> Vec<String> {
    headers
        .iter()
        .enumerate()
        .map(|(i, h)| {
            if i == 0 {
                h.trim_start_matches('\u{feff}').to_string()
            } else {
                h.to_string()
            }
        })
        .collect()
}

/// One row per participant, one numeric column per label.
/// Rows are kept sorted by participant.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct WideTable {
    columns: Vec<String>,
    rows: BTreeMap<ParticipantId, Vec<Option<f64>>>,
}

impl WideTable {
    pub fn new(columns: Vec<String>) -> Self {
        Self {
            columns,
            rows: BTreeMap::new(),
        }
    }

    /// Value columns, key column excluded
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn rows(&self) -> impl Iterator<Item = (&ParticipantId, &[Option<f64>])> {
        self.rows.iter().map(|(p, values)| (p, values.as_slice()))
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    /// Row for `participant`, created all-absent if new
    pub fn ensure_row(&mut self, participant: ParticipantId) -> &mut Vec<Option<f64>> {
        let width = self.columns.len();
        self.rows
            .entry(participant)
            .or_insert_with(|| vec![None; width])
    }

    pub fn set(&mut self, participant: ParticipantId, column: usize, value: Option<f64>) {
        self.ensure_row(participant)[column] = value;
    }

    pub fn get(&self, participant: &str, column: &str) -> Option<f64> {
        let index = self.column_index(column)?;
        self.rows.get(participant)?[index]
    }

    pub fn contains(&self, participant: &str) -> bool {
        self.rows.contains_key(participant)
    }

    /// Populated cells across the whole table
    pub fn non_absent_count(&self) -> usize {
        self.rows
            .values()
            .map(|values| values.iter().filter(|v| v.is_some()).count())
            .sum()
    }

    /// Populated cells per column
    pub fn column_counts(&self) -> Vec<usize> {
        (0..self.columns.len())
            .map(|i| self.rows.values().filter(|values| values[i].is_some()).count())
            .collect()
    }

    pub fn rounded(mut self, decimals: i32) -> Self {
        for values in self.rows.values_mut() {
            for value in values.iter_mut().flatten() {
                *value = round_to(*value, decimals);
            }
        }
        self
    }

    /// Reorder to `wanted`; columns this table lacks come back all-absent.
    pub fn select(&self, wanted: &[String]) -> Self {
        let sources: Vec<Option<usize>> = wanted.iter().map(|c| self.column_index(c)).collect();
        let rows = self
            .rows
            .iter()
            .map(|(p, values)| {
                let picked = sources.iter().map(|src| src.and_then(|i| values[i])).collect();
                (p.clone(), picked)
            })
            .collect();
        Self {
            columns: wanted.to_vec(),
            rows,
        }
    }

    pub fn renamed(mut self, rename: impl Fn(&str) -> String) -> Self {
        self.columns = self.columns.iter().map(|c| rename(c)).collect();
        self
    }

    /// Union of participants; columns of `self` then `other`.
    pub fn outer_join(&self, other: &WideTable) -> Self {
        let mut columns = self.columns.clone();
        columns.extend(other.columns.iter().cloned());

        let keys: BTreeSet<&ParticipantId> = self.rows.keys().chain(other.rows.keys()).collect();
        let rows = keys
            .into_iter()
            .map(|p| {
                let mut values = match self.rows.get(p) {
                    Some(v) => v.clone(),
                    None => vec![None; self.columns.len()],
                };
                match other.rows.get(p) {
                    Some(v) => values.extend(v.iter().copied()),
                    None => values.extend(std::iter::repeat(None).take(other.columns.len())),
                }
                (p.clone(), values)
            })
            .collect();

        Self { columns, rows }
    }

    /// Unpivot to (participant, column, value), column-major, absent cells dropped.
    pub fn melt(&self) -> Vec<(ParticipantId, String, f64)> {
        let mut out = Vec::new();
        for (i, column) in self.columns.iter().enumerate() {
            for (participant, values) in &self.rows {
                if let Some(value) = values[i] {
                    out.push((participant.clone(), column.clone(), value));
                }
            }
        }
        out
    }

    /// Read a table with a `Participant` column; every other column is numeric.
    pub fn read(path: &Path) -> Result<Self> {
        let mut reader = open_csv(path)?;
        let headers = clean_headers(reader.headers().map_err(|e| PhysumError::csv(path, e))?);

        let key_index = headers
            .iter()
            .position(|h| h == KEY_COLUMN)
            .ok_or_else(|| PhysumError::MissingColumn {
                path: path.to_path_buf(),
                column: KEY_COLUMN.to_string(),
            })?;
        let value_indices: Vec<usize> = (0..headers.len()).filter(|&i| i != key_index).collect();
        let columns = value_indices.iter().map(|&i| headers[i].clone()).collect();

        let mut table = Self::new(columns);
        for record in reader.records() {
            let record = record.map_err(|e| PhysumError::csv(path, e))?;
            let key = record.get(key_index).unwrap_or_default();
            if key.is_empty() {
                log::warn!("Row without participant in {}", path.display());
                continue;
            }
            let values = value_indices
                .iter()
                .map(|&i| record.get(i).and_then(parse_number))
                .collect();
            table.rows.insert(ParticipantId::from_table(key), values);
        }
        Ok(table)
    }

    pub fn to_csv_bytes(&self, path: &Path) -> Result<Vec<u8>> {
        let mut writer = csv_buffer();
        let header = std::iter::once(KEY_COLUMN.to_string()).chain(self.columns.iter().cloned());
        writer
            .write_record(header)
            .map_err(|e| PhysumError::csv(path, e))?;
        for (participant, values) in &self.rows {
            let record = std::iter::once(participant.to_string())
                .chain(values.iter().map(|v| format_cell(*v)));
            writer
                .write_record(record)
                .map_err(|e| PhysumError::csv(path, e))?;
        }
        finish_buffer(writer, path)
    }

    pub fn write(&self, path: &Path) -> Result<WrittenOutput> {
        let bytes = self.to_csv_bytes(path)?;
        write_output(path, &bytes, self.len())
    }
}

/// Average observations sharing a (participant, condition) pair.
pub fn group_mean<I>(observations: I) -> BTreeMap<(ParticipantId, Condition), f64>
where
    I: IntoIterator<Item = (ParticipantId, Condition, f64)>,
{
    let mut sums: BTreeMap<(ParticipantId, Condition), (f64, usize)> = BTreeMap::new();
    for (participant, condition, value) in observations {
        let entry = sums.entry((participant, condition)).or_insert((0.0, 0));
        entry.0 += value;
        entry.1 += 1;
    }
    sums.into_iter()
        .map(|(key, (sum, count))| (key, sum / count as f64))
        .collect()
}

/// Spread group means into one column per condition in `columns` order.
/// Every participant gets a row, even if none of its conditions is a column.
pub fn pivot(means: &BTreeMap<(ParticipantId, Condition), f64>, columns: &[Condition]) -> WideTable {
    let mut table = WideTable::new(columns.iter().map(Condition::label).collect());
    for ((participant, condition), mean) in means {
        let row = table.ensure_row(participant.clone());
        if let Some(index) = columns.iter().position(|c| c == condition) {
            row[index] = Some(*mean);
        }
    }
    table
}

// =============================================================================
// TESTS
// =============================================================================
