//! Data file recovery
//!
//! Rebuilds the KeyDir on startup by replaying the data file.

use std::fs::{File, OpenOptions};
use std::path::Path;

use tracing::{debug, info, warn};

use crate::error::Result;
use crate::keydir::{KeyDir, KeyEntry};

use super::LogReader;

/// Replays a data file into a fresh KeyDir
pub struct Recovery;

/// Result of a recovery operation
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecoveryResult {
    /// Number of complete records replayed
    pub records_recovered: u64,

    /// Number of distinct keys in the rebuilt KeyDir
    pub keys_recovered: usize,

    /// End of the last complete record; the initial write cursor
    pub valid_len: u64,

    /// Bytes after `valid_len` that did not form a complete record
    pub discarded_bytes: u64,

    /// Whether the torn tail was cut off the file
    pub was_truncated: bool,
}

impl Recovery {
    /// Recover the KeyDir from a data file
    ///
    /// This will:
    /// 1. Scan records from byte 0 until clean EOF or a torn tail
    /// 2. Point every key at its last complete record
    /// 3. Truncate the torn tail so later appends start at `valid_len`
    pub fn recover(path: &Path) -> Result<(KeyDir, RecoveryResult)> {
        let (keydir, mut result) = Self::scan(path)?;

        if result.discarded_bytes > 0 {
            warn!(
                path = %path.display(),
                valid_len = result.valid_len,
                discarded_bytes = result.discarded_bytes,
                "discarding torn tail"
            );
            let file = OpenOptions::new().write(true).open(path)?;
            file.set_len(result.valid_len)?;
            file.sync_all()?;
            result.was_truncated = true;
        }

        info!(
            path = %path.display(),
            records = result.records_recovered,
            keys = result.keys_recovered,
            valid_len = result.valid_len,
            "recovery complete"
        );

        Ok((keydir, result))
    }

    /// Scan a data file without modifying it
    pub fn verify(path: &Path) -> Result<RecoveryResult> {
        Self::scan(path).map(|(_, result)| result)
    }

    fn scan(path: &Path) -> Result<(KeyDir, RecoveryResult)> {
        let file = File::open(path)?;
        let file_len = file.metadata()?.len();

        let mut reader = LogReader::new(file);
        let mut keydir = KeyDir::new();
        let mut records_recovered = 0u64;

        for scanned in reader.by_ref() {
            let scanned = scanned?;
            debug!(
                key = %String::from_utf8_lossy(&scanned.record.key),
                position = scanned.position,
                size = scanned.total_size,
                "loaded key"
            );
            keydir.insert(
                scanned.record.key,
                KeyEntry::new(
                    scanned.record.timestamp,
                    scanned.position,
                    scanned.total_size,
                ),
            );
            records_recovered += 1;
        }

        let valid_len = reader.offset();
        let result = RecoveryResult {
            records_recovered,
            keys_recovered: keydir.len(),
            valid_len,
            discarded_bytes: file_len.saturating_sub(valid_len),
            was_truncated: false,
        };

        Ok((keydir, result))
    }
}
