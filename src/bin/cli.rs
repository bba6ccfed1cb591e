//! caskdb CLI
//!
//! Command-line interface for a local caskdb data file.

use std::path::Path;

use caskdb::datafile::Recovery;
use caskdb::{Config, Store};
use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, EnvFilter};

/// caskdb CLI
#[derive(Parser, Debug)]
#[command(name = "caskdb-cli")]
#[command(about = "CLI for the caskdb key-value store")]
#[command(version)]
struct Args {
    /// Data file path
    #[arg(short, long, default_value = "books.db")]
    file: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Get a value by key
    Get {
        /// The key to get
        key: String,
    },

    /// Set a key-value pair
    Set {
        /// The key to set
        key: String,

        /// The value to set
        value: String,
    },

    /// List all live keys
    Keys,

    /// Scan the data file and report what recovery would find
    Verify,
}

fn main() {
    // Initialize tracing/logging
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("warn,caskdb=info"));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    if let Err(e) = run(args) {
        tracing::error!("{}", e);
        std::process::exit(1);
    }
}

fn run(args: Args) -> caskdb::Result<()> {
    let path = Path::new(&args.file);

    match args.command {
        Commands::Get { key } => {
            let mut store = open_store(path)?;
            match store.get(key.as_bytes())? {
                Some(value) => println!("{}", String::from_utf8_lossy(&value)),
                None => println!("(nil)"),
            }
            store.close()
        }
        Commands::Set { key, value } => {
            let mut store = open_store(path)?;
            store.set(key.as_bytes(), value.as_bytes())?;
            println!("OK");
            store.close()
        }
        Commands::Keys => {
            let store = open_store(path)?;
            let mut keys: Vec<_> = store.keys().map(|k| k.to_vec()).collect();
            keys.sort();
            for key in keys {
                println!("{}", String::from_utf8_lossy(&key));
            }
            store.close()
        }
        Commands::Verify => {
            // Read-only scan: a torn tail is reported, not truncated
            let result = Recovery::verify(path)?;
            println!("records:   {}", result.records_recovered);
            println!("keys:      {}", result.keys_recovered);
            println!("valid_len: {}", result.valid_len);
            println!("discarded: {}", result.discarded_bytes);
            Ok(())
        }
    }
}

fn open_store(path: &Path) -> caskdb::Result<Store> {
    Store::open_with_config(Config::with_path(path))
}
