//! Data File Module
//!
//! The single append-only file backing a store.
//!
//! ## Responsibilities
//! - Append encoded records and fsync them
//! - Read one record back by (position, size)
//! - Scan the file from byte 0 to rebuild the KeyDir on startup
//! - Detect and drop a torn tail left by an interrupted append
//!
//! ## File Format
//! ```text
//! ┌──────────────────────────────────────────────┐
//! │ Record 1                                     │
//! │ ┌────────┬─────────┬─────────┬─────┬───────┐ │
//! │ │ TS (4) │ KLen(4) │ VLen(4) │ Key │ Value │ │
//! │ └────────┴─────────┴─────────┴─────┴───────┘ │
//! ├──────────────────────────────────────────────┤
//! │ Record 2                                     │
//! │ ...                                          │
//! ├──────────────────────────────────────────────┤
//! │ (optional torn tail, discarded on recovery)  │
//! └──────────────────────────────────────────────┘
//! ```
//! No file header, footer, or checksum.

mod file;
mod reader;
mod recovery;

pub use file::DataFile;
pub use reader::{LogReader, ScannedRecord};
pub use recovery::{Recovery, RecoveryResult};
