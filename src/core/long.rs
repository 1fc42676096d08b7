//! Long-format table built from the wide summaries
//!
//! Columns: `Participant,Veracity,Valence,Channel,Value`. Sorted by
//! Veracity (Truth, Lie), Valence (Positive, Negative), Channel
//! (BPM, Face, Eye), then Participant.

use std::path::Path;

use crate::core::output::{csv_buffer, finish_buffer, write_output};
use crate::core::table::{format_value, round_to, WideTable, KEY_COLUMN};
use crate::error::{PhysumError, Result};
use crate::types::{Channel, Condition, ParticipantId, Valence, Veracity, WrittenOutput, CONDITION_COLUMNS};
use crate::PREVIEW_DECIMALS;

pub const LONG_COLUMNS: [&str; 5] = [KEY_COLUMN, "Veracity", "Valence", "Channel", "Value"];

#[derive(Debug, Clone, PartialEq)]
pub struct LongRow {
    pub participant: ParticipantId,
    pub veracity: Veracity,
    pub valence: Valence,
    pub channel: Channel,
    pub value: f64,
}

impl LongRow {
    fn sort_key(&self) -> (Veracity, Valence, Channel, &ParticipantId) {
        (self.veracity, self.valence, self.channel, &self.participant)
    }

    fn cells(&self, decimals: Option<i32>) -> [String; 5] {
        let value = match decimals {
            Some(d) => round_to(self.value, d),
            None => self.value,
        };
        [
            self.participant.to_string(),
            self.veracity.as_str().to_string(),
            self.valence.as_str().to_string(),
            self.channel.name().to_string(),
            format_value(value),
        ]
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct LongTable {
    rows: Vec<LongRow>,
}

impl LongTable {
    pub fn rows(&self) -> &[LongRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn count_for(&self, channel: Channel) -> usize {
        self.rows.iter().filter(|r| r.channel == channel).count()
    }

    pub fn to_csv_bytes(&self, path: &Path) -> Result<Vec<u8>> {
        let mut writer = csv_buffer();
        writer
            .write_record(LONG_COLUMNS)
            .map_err(|e| PhysumError::csv(path, e))?;
        for row in &self.rows {
            writer
                .write_record(row.cells(None))
                .map_err(|e| PhysumError::csv(path, e))?;
        }
        finish_buffer(writer, path)
    }

    pub fn write(&self, path: &Path) -> Result<WrittenOutput> {
        let bytes = self.to_csv_bytes(path)?;
        write_output(path, &bytes, self.len())
    }

    /// Pipe-separated preview of the first `max_rows` rows, values at two
    /// decimals, every column padded to its widest cell.
    pub fn preview(&self, max_rows: usize) -> String {
        let body: Vec<[String; 5]> = self
            .rows
            .iter()
            .take(max_rows)
            .map(|row| row.cells(Some(PREVIEW_DECIMALS)))
            .collect();

        let widths: Vec<usize> = (0..LONG_COLUMNS.len())
            .map(|i| {
                body.iter()
                    .map(|cells| cells[i].chars().count())
                    .chain(std::iter::once(LONG_COLUMNS[i].len()))
                    .max()
                    .unwrap_or(0)
            })
            .collect();

        let line = |cells: &[String]| -> String {
            cells
                .iter()
                .zip(widths.iter().copied())
                .map(|(cell, width)| format!("{cell:<width$}"))
                .collect::<Vec<_>>()
                .join(" | ")
                .trim_end()
                .to_string()
        };

        let header: Vec<String> = LONG_COLUMNS.iter().map(|c| c.to_string()).collect();
        std::iter::once(line(&header))
            .chain(body.iter().map(|cells| line(cells)))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

#[derive(Debug, Default)]
pub struct LongTableBuilder;

impl LongTableBuilder {
    pub fn new() -> Self {
        Self
    }

    /// Unpivot one channel's summary, absent cells dropped
    pub fn melt_summary(&self, channel: Channel, summary: &WideTable) -> Vec<LongRow> {
        let labels: Vec<String> = CONDITION_COLUMNS.iter().map(Condition::label).collect();
        summary
            .select(&labels)
            .melt()
            .into_iter()
            .map(|(participant, group, value)| {
                let condition = Condition::from_label(&group);
                LongRow {
                    participant,
                    veracity: condition.veracity,
                    valence: condition.valence,
                    channel,
                    value,
                }
            })
            .collect()
    }

    pub fn build(&self, summaries: &[(Channel, WideTable)]) -> LongTable {
        let mut rows: Vec<LongRow> = summaries
            .iter()
            .flat_map(|(channel, summary)| self.melt_summary(*channel, summary))
            .collect();
        rows.sort_by(|a, b| a.sort_key().cmp(&b.sort_key()));
        LongTable { rows }
    }
}

// =============================================================================
// TESTS
// =============================================================================
