//! Reads one channel's numeric column out of a raw measurement file

use crate::core::table::{clean_headers, open_csv, parse_number};
use crate::core::walker::CsvFile;
use crate::error::{PhysumError, Result};
use crate::types::{Channel, RawRecord};

/// Outcome of reading a file for one channel
#[derive(Debug, Clone, PartialEq)]
pub enum ChannelRead {
    Found(RawRecord),
    /// No header matches the channel's aliases
    MissingColumn,
    /// Column present, but nothing numeric in it
    NoValues { column: String },
}

/// Column index for the first alias hit.
///
/// Exact (trimmed, case-insensitive) matches are tried across the file's
/// columns first; only then does a substring match in alias order apply.
pub fn find_column(headers: &[String], aliases: &[&str]) -> Option<usize> {
    let normalized: Vec<String> = headers.iter().map(|h| h.trim().to_lowercase()).collect();
    let aliases: Vec<String> = aliases.iter().map(|a| a.trim().to_lowercase()).collect();

    if let Some(index) = normalized.iter().position(|h| aliases.contains(h)) {
        return Some(index);
    }
    aliases
        .iter()
        .find_map(|alias| normalized.iter().position(|h| h.contains(alias.as_str())))
}

/// Read `file` and collect the finite numbers under the channel's column.
/// Unreadable or malformed files are errors; the caller decides to skip.
pub fn read_channel(file: &CsvFile, channel: Channel) -> Result<ChannelRead> {
    let mut reader = open_csv(&file.path)?;
    let headers = clean_headers(reader.headers().map_err(|e| PhysumError::csv(&file.path, e))?);

    let Some(index) = find_column(&headers, channel.column_aliases()) else {
        return Ok(ChannelRead::MissingColumn);
    };

    let mut values = Vec::new();
    for record in reader.records() {
        let record = record.map_err(|e| PhysumError::csv(&file.path, e))?;
        if let Some(value) = record.get(index).and_then(parse_number) {
            values.push(value);
        }
    }

    let column = headers[index].clone();
    if values.is_empty() {
        return Ok(ChannelRead::NoValues { column });
    }

    Ok(ChannelRead::Found(RawRecord {
        file: file.path.clone(),
        dir: file.dir.clone(),
        channel,
        column,
        values,
    }))
}
