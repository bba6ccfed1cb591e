//! Data file handle
//!
//! Owns the store's one open file descriptor: appends go to the end, reads
//! seek to a known record.

use std::fs::{File, OpenOptions};
use std::io::{ErrorKind, Read, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};

use crate::config::SyncStrategy;
use crate::error::{CaskError, Result};

/// Append-only data file with a write cursor
pub struct DataFile {
    path: PathBuf,
    file: File,
    /// Offset at which the next record will land
    write_position: u64,
    sync_strategy: SyncStrategy,
    /// Appends since the last fsync
    unsynced: usize,
    /// Set once a write or sync has failed
    poisoned: bool,
}

impl DataFile {
    /// Open or create the data file in append mode.
    ///
    /// `write_position` must equal the file's current length; recovery
    /// guarantees this by truncating any torn tail first.
    pub fn open(path: &Path, write_position: u64, sync_strategy: SyncStrategy) -> Result<Self> {
        let file = OpenOptions::new()
            .create(true)
            .read(true)
            .append(true)
            .open(path)
            .map_err(|source| CaskError::Open {
                path: path.to_path_buf(),
                source,
            })?;

        let len = file.metadata()?.len();
        if len != write_position {
            return Err(CaskError::Integrity {
                position: len,
                detail: format!(
                    "file length {} does not match recovered write position {}",
                    len, write_position
                ),
            });
        }

        Ok(Self {
            path: path.to_path_buf(),
            file,
            write_position,
            sync_strategy,
            unsynced: 0,
            poisoned: false,
        })
    }

    /// Append one encoded frame and return the offset it was written at.
    ///
    /// The cursor only advances after the write (and sync, if due) succeed.
    pub fn append(&mut self, frame: &[u8]) -> Result<u64> {
        if self.poisoned {
            return Err(CaskError::Poisoned);
        }

        if let Err(e) = self.file.write_all(frame) {
            self.poisoned = true;
            return Err(CaskError::WriteFailed(e));
        }

        self.unsynced += 1;
        let due = match self.sync_strategy {
            SyncStrategy::EveryWrite => true,
            SyncStrategy::EveryNWrites { count } => self.unsynced >= count,
        };
        if due {
            if let Err(e) = self.file.sync_all() {
                self.poisoned = true;
                return Err(CaskError::WriteFailed(e));
            }
            self.unsynced = 0;
        }

        let position = self.write_position;
        self.write_position += frame.len() as u64;
        Ok(position)
    }

    /// Read exactly `len` bytes starting at `position`.
    ///
    /// Running out of bytes means the file shrank after the KeyDir was built,
    /// which is reported as a fatal integrity violation.
    pub fn read_exact_at(&mut self, position: u64, len: u32) -> Result<Vec<u8>> {
        self.file.seek(SeekFrom::Start(position))?;

        let mut buf = vec![0u8; len as usize];
        match self.file.read_exact(&mut buf) {
            Ok(()) => Ok(buf),
            Err(e) if e.kind() == ErrorKind::UnexpectedEof => Err(CaskError::Integrity {
                position,
                detail: format!("short read: expected {} bytes", len),
            }),
            Err(e) => Err(CaskError::Io(e)),
        }
    }

    /// Force all appended data to stable storage
    pub fn sync(&mut self) -> Result<()> {
        self.file.sync_all()?;
        self.unsynced = 0;
        Ok(())
    }

    /// Sync and release the file descriptor
    pub fn close(mut self) -> Result<()> {
        self.sync()
        // `self.file` is dropped here, closing the descriptor
    }

    pub fn write_position(&self) -> u64 {
        self.write_position
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn is_poisoned(&self) -> bool {
        self.poisoned
    }
}
