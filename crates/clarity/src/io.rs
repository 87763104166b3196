//! Message record input and atomic file writes

use clarity_core::RawMessage;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use tracing::warn;

/// Read JSONL message records. Blank lines are ignored; lines that are not
/// UTF-8 or not a valid record are skipped with a warning. Only I/O errors
/// fail the read.
pub fn read_messages<R: BufRead>(reader: R) -> std::io::Result<Vec<RawMessage>> {
    let mut records = Vec::new();

    for (index, bytes) in reader.split(b'\n').enumerate() {
        let bytes = bytes?;
        let line = match std::str::from_utf8(&bytes) {
            Ok(line) => line,
            Err(err) => {
                warn!(line = index + 1, error = %err, "Skipping malformed record");
                continue;
            }
        };
        if line.trim().is_empty() {
            continue;
        }
        match RawMessage::parse(line) {
            Ok(record) => records.push(record),
            Err(err) => warn!(line = index + 1, error = %err, "Skipping malformed record"),
        }
    }

    Ok(records)
}

/// Read records from `path`, or from stdin when no path is given
pub fn read_messages_from(path: Option<&Path>) -> std::io::Result<Vec<RawMessage>> {
    match path {
        Some(path) => read_messages(BufReader::new(File::open(path)?)),
        None => read_messages(std::io::stdin().lock()),
    }
}

/// Write data atomically using temp file + rename
pub fn atomic_write(path: &Path, data: &[u8]) -> std::io::Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let temp_path = path.with_extension("tmp");
    std::fs::write(&temp_path, data)?;
    std::fs::rename(temp_path, path)?;
    Ok(())
}
