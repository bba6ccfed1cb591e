//! KeyDir Module
//!
//! In-memory index from key to the location of its latest record.
//!
//! ## Responsibilities
//! - Point every live key at its most recently written record
//! - Replace entries on overwrite (older records become unreachable)
//! - Track how many bytes on disk are no longer reachable
//!
//! ## Data Structure Choice
//! A plain `HashMap` owned by the store:
//! - Point lookups only, no ordered iteration needed
//! - Mutated only through `&mut self`, so no interior locking

mod table;

pub use table::KeyDir;

/// Location of a key's latest record in the data file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyEntry {
    /// Record creation time (unix seconds). Informational only.
    pub timestamp: u32,

    /// Byte offset of the record header in the data file
    pub position: u64,

    /// Header + key + value length in bytes
    pub total_size: u32,
}

impl KeyEntry {
    pub fn new(timestamp: u32, position: u64, total_size: u32) -> Self {
        Self {
            timestamp,
            position,
            total_size,
        }
    }

    /// Offset one past the last byte of the record
    pub fn end(&self) -> u64 {
        self.position + self.total_size as u64
    }
}
