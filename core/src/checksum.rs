//! Checksum scanning over a folder of deliverable files.
//!
//! Each directory entry becomes one [`FileRecord`]: name, CRC-32/IEEE
//! checksum of its full content (uppercase hex, no zero padding), size in
//! bytes, and the modification timestamp as `YYYY.MM.DD_HH:MM`. The scan is
//! non-recursive and all-or-nothing: any unreadable entry fails the whole
//! pass, and the caller rebuilds the table from the next successful scan.

use chrono::{DateTime, Local};
use crc32fast::Hasher;
use serde::Serialize;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use std::time::SystemTime;
use thiserror::Error;

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ScanError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// One scanned directory entry. Immutable once created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileRecord {
    pub name: String,
    pub checksum: String,
    pub size: String,
    pub created_at: String,
}

/// Scan a directory, producing one record per entry in listing order
/// (sorted by file name).
///
/// Entries are not filtered: a subdirectory is opened and read like any
/// other entry, and its read failure fails the scan.
pub fn scan_dir(dir: &Path) -> Result<Vec<FileRecord>, ScanError> {
    let mut names: Vec<std::ffi::OsString> = Vec::new();
    for entry in std::fs::read_dir(dir)? {
        names.push(entry?.file_name());
    }
    names.sort();

    let mut records = Vec::with_capacity(names.len());
    for name in names {
        records.push(checksum_file(&dir.join(&name))?);
    }
    Ok(records)
}

/// Build the record for a single file: stream its content through the
/// CRC-32/IEEE accumulator, then read size and timestamp from metadata.
pub fn checksum_file(path: &Path) -> Result<FileRecord, ScanError> {
    let mut file = File::open(path)?;

    let mut hasher = Hasher::new();
    let mut buf = [0u8; 64 * 1024];
    loop {
        let n = file.read(&mut buf)?;
        if n == 0 {
            break;
        }
        hasher.update(&buf[..n]);
    }

    let metadata = file.metadata()?;
    let modified = metadata.modified()?;

    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();

    Ok(FileRecord {
        name,
        checksum: format!("{:X}", hasher.finalize()),
        size: metadata.len().to_string(),
        created_at: format_timestamp(modified),
    })
}

fn format_timestamp(time: SystemTime) -> String {
    DateTime::<Local>::from(time)
        .format("%Y.%m.%d_%H:%M")
        .to_string()
}
