//! # caskdb
//!
//! A single-file, append-only key-value store built on a log-structured
//! hash table (Bitcask):
//! - Every write is appended to one data file and fsynced
//! - An in-memory KeyDir maps each key to its latest record on disk
//! - Reads cost one seek and one read
//! - Startup replays the file to rebuild the KeyDir, dropping a torn tail
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                         Store                               │
//! │              open / get / set / close                       │
//! └──────────────┬───────────────────────────────┬──────────────┘
//!                │                               │
//!                ▼                               ▼
//!         ┌─────────────┐                 ┌─────────────┐
//!         │   KeyDir    │                 │  DataFile   │
//!         │  (HashMap)  │                 │  (Append)   │
//!         └─────────────┘                 └──────┬──────┘
//!                ▲                               │
//!                │        ┌─────────────┐        │
//!                └────────│  Recovery   │◄───────┘
//!                         │  (Replay)   │
//!                         └──────┬──────┘
//!                                ▼
//!                         ┌─────────────┐
//!                         │   Record    │
//!                         │   (Codec)   │
//!                         └─────────────┘
//! ```
//!
//! ## Example
//!
//! ```rust,no_run
//! use caskdb::Store;
//!
//! let mut store = Store::open("books.db").unwrap();
//! store.set(b"othello", b"shakespeare").unwrap();
//! assert_eq!(store.get(b"othello").unwrap(), Some(b"shakespeare".to_vec()));
//! store.close().unwrap();
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod config;

pub mod record;
pub mod keydir;
pub mod datafile;
pub mod store;
pub mod shared;

// =============================================================================
// Public API Re-exports
// =============================================================================

pub use error::{CaskError, Result};
pub use config::{Config, SyncStrategy};
pub use store::Store;
pub use shared::SharedStore;

// =============================================================================
// Version Info
// =============================================================================

/// Current version of caskdb
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
