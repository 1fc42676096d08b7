//! Writing output files

use std::fs;
use std::path::Path;

use sha2::{Digest, Sha256};

use crate::error::{PhysumError, Result};
use crate::types::WrittenOutput;

/// CSV writer into memory: header row, minimal quoting, `\n` terminators.
pub fn csv_buffer() -> csv::Writer<Vec<u8>> {
    csv::WriterBuilder::new()
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(Vec::new())
}

/// Flush a buffer produced by [`csv_buffer`].
pub fn finish_buffer(writer: csv::Writer<Vec<u8>>, path: &Path) -> Result<Vec<u8>> {
    writer
        .into_inner()
        .map_err(|e| PhysumError::io(path, e.into_error()))
}

/// Write `bytes` to `path`, creating parent directories, and fingerprint them.
pub fn write_output(path: &Path, bytes: &[u8], rows: usize) -> Result<WrittenOutput> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| PhysumError::io(parent, e))?;
    }
    fs::write(path, bytes).map_err(|e| PhysumError::io(path, e))?;

    let sha256 = format!("{:x}", Sha256::digest(bytes));
    log::info!("Wrote {} ({} rows)", path.display(), rows);

    Ok(WrittenOutput {
        path: path.display().to_string(),
        rows,
        sha256,
    })
}
