//! KeyDir implementation
//!
//! HashMap-based key directory.

use std::collections::HashMap;

use super::KeyEntry;

/// In-memory map of key → latest record location
#[derive(Debug, Default)]
pub struct KeyDir {
    entries: HashMap<Vec<u8>, KeyEntry>,

    /// Sum of `total_size` over every superseded record
    stale_bytes: u64,
}

impl KeyDir {
    /// Create a new empty KeyDir
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up the latest entry for a key
    pub fn get(&self, key: &[u8]) -> Option<&KeyEntry> {
        self.entries.get(key)
    }

    /// Point `key` at a new record, returning the entry it replaced
    pub fn insert(&mut self, key: Vec<u8>, entry: KeyEntry) -> Option<KeyEntry> {
        let previous = self.entries.insert(key, entry);
        if let Some(old) = &previous {
            self.stale_bytes += old.total_size as u64;
        }
        previous
    }

    pub fn contains_key(&self, key: &[u8]) -> bool {
        self.entries.contains_key(key)
    }

    /// Number of live keys
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Bytes on disk no longer reachable from any key
    pub fn stale_bytes(&self) -> u64 {
        self.stale_bytes
    }

    /// Iterate over live keys (arbitrary order)
    pub fn keys(&self) -> impl Iterator<Item = &[u8]> {
        self.entries.keys().map(|k| k.as_slice())
    }
}
