//! How complete the master table is

use serde::{Deserialize, Serialize};

use crate::core::table::WideTable;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnCoverage {
    pub column: String,
    pub populated: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CoverageReport {
    pub participants: usize,
    pub columns: Vec<ColumnCoverage>,
    /// Populated cells over all cells, in percent
    pub completeness: f64,
}

impl CoverageReport {
    pub fn from_table(table: &WideTable) -> Self {
        let columns: Vec<ColumnCoverage> = table
            .columns()
            .iter()
            .zip(table.column_counts())
            .map(|(column, populated)| ColumnCoverage {
                column: column.clone(),
                populated,
            })
            .collect();

        let total = table.len() * table.columns().len();
        let completeness = if total == 0 {
            0.0
        } else {
            table.non_absent_count() as f64 * 100.0 / total as f64
        };

        Self {
            participants: table.len(),
            columns,
            completeness,
        }
    }

    pub fn to_terminal_string(&self) -> String {
        let width = self.columns.iter().map(|c| c.column.len()).max().unwrap_or(0);
        let mut lines = vec![format!(
            "{} participants, {:.1}% of cells populated",
            self.participants, self.completeness
        )];
        for c in &self.columns {
            lines.push(format!(
                "  {:<width$}  {}/{}",
                c.column,
                c.populated,
                self.participants,
                width = width
            ));
        }
        lines.join("\n")
    }
}
