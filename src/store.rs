//! Store Module
//!
//! The storage handle that ties the data file and the KeyDir together.
//!
//! ## Responsibilities
//! - Replay an existing data file into the KeyDir on open
//! - Append records durably and index them (set)
//! - Resolve keys through the KeyDir with one seek + read (get)
//! - Sync and release the file on close

use std::path::Path;
use std::time::{SystemTime, UNIX_EPOCH};

use tracing::{debug, error, info};

use crate::config::Config;
use crate::datafile::{DataFile, Recovery, RecoveryResult};
use crate::error::{CaskError, Result};
use crate::keydir::{KeyDir, KeyEntry};
use crate::record;

/// A log-structured hash table over a single data file
///
/// ## Concurrency Model: single owner
///
/// - Every mutating call takes `&mut self`, including `get` (it moves the
///   file cursor).
/// - Nothing runs in the background; each call finishes before returning.
/// - To share one store between threads use [`crate::SharedStore`].
pub struct Store {
    /// Store configuration
    config: Config,

    /// The one open data file (append + positioned reads)
    file: DataFile,

    /// Key → latest record location
    keydir: KeyDir,

    /// What recovery found on open (default for a new file)
    recovery: RecoveryResult,
}

impl Store {
    /// Open or create a store at `path` with the default config
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        Self::open_with_config(Config::with_path(path.as_ref()))
    }

    /// Open or create a store with the given config
    ///
    /// On startup:
    /// 1. Validate config
    /// 2. Replay the data file if it exists (rebuilds KeyDir, drops torn tail)
    /// 3. Open the data file for append at the recovered write position
    pub fn open_with_config(config: Config) -> Result<Self> {
        config.validate()?;

        let path = config.path.clone();

        let (keydir, recovery) = if path.exists() {
            Recovery::recover(&path)?
        } else {
            debug!(path = %path.display(), "no data file, starting empty");
            (KeyDir::new(), RecoveryResult::default())
        };

        let file = DataFile::open(&path, recovery.valid_len, config.sync_strategy)?;

        info!(
            path = %path.display(),
            keys = keydir.len(),
            write_position = file.write_position(),
            "store opened"
        );

        Ok(Self {
            config,
            file,
            keydir,
            recovery,
        })
    }

    /// Get the latest value for a key
    ///
    /// Returns:
    /// - `Ok(Some(value))` — key found
    /// - `Ok(None)` — key was never set
    /// - `Err(Integrity)` — the file no longer holds the indexed record (fatal)
    pub fn get(&mut self, key: &[u8]) -> Result<Option<Vec<u8>>> {
        let entry = match self.keydir.get(key) {
            Some(entry) => *entry,
            None => return Ok(None),
        };

        if entry.end() > self.file.write_position() {
            return Err(CaskError::Integrity {
                position: entry.position,
                detail: format!(
                    "entry ends at {} past write position {}",
                    entry.end(),
                    self.file.write_position()
                ),
            });
        }

        let frame = self
            .file
            .read_exact_at(entry.position, entry.total_size)
            .inspect_err(|e| error!(position = entry.position, "read failed: {}", e))?;

        let integrity = |detail: String| CaskError::Integrity {
            position: entry.position,
            detail,
        };

        // The header on disk must still describe the frame the KeyDir indexed
        let header = record::decode_header(&frame).map_err(|e| integrity(e.to_string()))?;
        if header.record_size() != entry.total_size as u64 {
            return Err(integrity(format!(
                "record header describes {} bytes, index expects {}",
                header.record_size(),
                entry.total_size
            )));
        }

        let record = record::decode_kv(&frame).map_err(|e| integrity(e.to_string()))?;

        if self.config.verify_key_on_read && record.key != key {
            return Err(integrity(
                "record key does not match the requested key".to_string(),
            ));
        }

        Ok(Some(record.value))
    }

    /// Set a key to a value
    ///
    /// Steps:
    /// 1. Stamp with the current unix time
    /// 2. Encode and append (fsync per the sync strategy)
    /// 3. Point the KeyDir at the new record
    ///
    /// A failed write poisons the store; the KeyDir is left untouched.
    pub fn set(&mut self, key: &[u8], value: &[u8]) -> Result<()> {
        let timestamp = unix_timestamp();
        let (total_size, frame) = record::encode(timestamp, key, value)?;

        let position = self
            .file
            .append(&frame)
            .inspect_err(|e| error!(path = %self.file.path().display(), "write failed: {}", e))?;

        self.keydir
            .insert(key.to_vec(), KeyEntry::new(timestamp, position, total_size));

        Ok(())
    }

    /// Close the store
    ///
    /// Syncs the data file and releases its descriptor.
    pub fn close(self) -> Result<()> {
        debug!(path = %self.file.path().display(), "closing store");
        self.file.close()
    }

    // =========================================================================
    // Accessors (for testing and debugging)
    // =========================================================================

    /// Number of live keys
    pub fn len(&self) -> usize {
        self.keydir.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keydir.is_empty()
    }

    pub fn contains_key(&self, key: &[u8]) -> bool {
        self.keydir.contains_key(key)
    }

    /// Live keys in arbitrary order
    pub fn keys(&self) -> impl Iterator<Item = &[u8]> {
        self.keydir.keys()
    }

    /// Location of a key's latest record
    pub fn key_entry(&self, key: &[u8]) -> Option<&KeyEntry> {
        self.keydir.get(key)
    }

    /// Offset where the next record will be written
    pub fn write_position(&self) -> u64 {
        self.file.write_position()
    }

    /// Bytes on disk held by overwritten records
    pub fn stale_bytes(&self) -> u64 {
        self.keydir.stale_bytes()
    }

    /// What recovery found when this store was opened
    pub fn recovery(&self) -> &RecoveryResult {
        &self.recovery
    }

    /// Whether an earlier write failure has disabled writes
    pub fn is_poisoned(&self) -> bool {
        self.file.is_poisoned()
    }

    pub fn path(&self) -> &Path {
        self.file.path()
    }

    pub fn config(&self) -> &Config {
        &self.config
    }
}

/// Current wall-clock time in unix seconds, clamped to the u32 range
fn unix_timestamp() -> u32 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| u32::try_from(d.as_secs()).unwrap_or(u32::MAX))
        .unwrap_or(0)
}
