//! Record Module
//!
//! Binary framing for a single key/value write.
//!
//! ## Responsibilities
//! - Encode a (timestamp, key, value) triple into one frame
//! - Decode the fixed-size header on its own (used by the recovery scan)
//! - Decode a complete frame back into its fields (used by the read path)
//!
//! ## Frame Format
//! ```text
//! ┌───────────────┬──────────────┬────────────────┬───────┬─────────┐
//! │ Timestamp (4) │ KeySize (4)  │ ValueSize (4)  │  Key  │  Value  │
//! └───────────────┴──────────────┴────────────────┴───────┴─────────┘
//! ```
//! All integers are `u32` little-endian. There is no checksum, magic number,
//! or padding; records are concatenated back to back in the data file.

mod codec;

pub use codec::{decode_header, decode_kv, encode};

/// Size of the fixed record header: timestamp + key size + value size
pub const HEADER_SIZE: usize = 12;

/// Parsed fixed-size record header
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Header {
    /// Creation time in unix seconds
    pub timestamp: u32,

    /// Length of the key section in bytes
    pub key_size: u32,

    /// Length of the value section in bytes
    pub value_size: u32,
}

impl Header {
    /// Total frame length this header describes (header + key + value)
    pub fn record_size(&self) -> u64 {
        HEADER_SIZE as u64 + self.key_size as u64 + self.value_size as u64
    }
}

/// A fully decoded record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    pub timestamp: u32,
    pub key: Vec<u8>,
    pub value: Vec<u8>,
}
