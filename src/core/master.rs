//! Master wide table: the three channel summaries side by side

use crate::core::table::WideTable;
use crate::types::{Channel, Condition, CONDITION_COLUMNS};
use crate::ROUND_DECIMALS;

/// `Positive Lie_BPM` … `Negative Truth_EYE`, channel-major
pub fn master_columns() -> Vec<String> {
    Channel::ALL
        .into_iter()
        .flat_map(|channel| {
            CONDITION_COLUMNS
                .into_iter()
                .map(move |condition| channel.suffixed(&condition.label()))
        })
        .collect()
}

#[derive(Debug, Default)]
pub struct MasterTableBuilder;

impl MasterTableBuilder {
    pub fn new() -> Self {
        Self
    }

    /// Outer-join whatever summaries exist. `None` when there are none.
    ///
    /// The result always carries all twelve columns; a channel without a
    /// summary leaves its four columns empty.
    pub fn build(&self, summaries: &[(Channel, WideTable)]) -> Option<WideTable> {
        let labels: Vec<String> = CONDITION_COLUMNS.iter().map(Condition::label).collect();

        let joined = summaries
            .iter()
            .map(|(channel, table)| table.select(&labels).renamed(|c| channel.suffixed(c)))
            .reduce(|acc, table| acc.outer_join(&table))?;

        Some(joined.select(&master_columns()).rounded(ROUND_DECIMALS))
    }
}
