//! # agora-admin
//!
//! Operator tool for an Agora data directory:
//! - **gen-key** prints a fresh random collection key (hex)
//! - **seed** replaces a collection with the contents of a plaintext JSON file
//! - **dump** prints a decrypted collection
//! - **check** loads every collection and fails if any of them is corrupt
//!
//! The key and data directory come from `AGORA_DB_KEY` /
//! `AGORA_DB_PASSPHRASE` and `AGORA_DATA_PATH`.

use std::path::PathBuf;

use agora_server::AppConfig;
use agora_shared::crypto::generate_symmetric_key;
use agora_store::{CollectionKind, Database};
use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "agora-admin")]
#[command(about = "Manage an Agora encrypted data directory", long_about = None)]
#[command(version)]
struct Cli {
    /// Data directory (overrides AGORA_DATA_PATH)
    #[arg(long, global = true)]
    data_path: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print a new random 32-byte key, hex encoded
    GenKey,

    /// Replace a collection with the entities of a plaintext JSON file
    Seed {
        /// users, chats, messages, posts or tags
        collection: CollectionKind,
        /// File holding `{ "<collection>": [ ... ] }`
        file: PathBuf,
    },

    /// Print a decrypted collection as JSON
    Dump {
        collection: CollectionKind,
    },

    /// Load every collection and report its size
    Check,
}

fn open_database(data_path: Option<PathBuf>) -> Result<Database> {
    let mut config = AppConfig::from_env().context("loading configuration")?;
    if let Some(path) = data_path {
        config.data_path = path;
    }
    info!(data_path = %config.data_path.display(), "using data directory");
    Database::open_at(&config.data_path, config.codec)
        .with_context(|| format!("opening {}", config.data_path.display()))
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,agora_store=debug,agora_server=debug")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::GenKey => {
            println!("{}", hex::encode(generate_symmetric_key()));
        }
        Commands::Seed { collection, file } => {
            let db = open_database(cli.data_path)?;
            let json = std::fs::read_to_string(&file)
                .with_context(|| format!("reading {}", file.display()))?;
            let written = db
                .seed_json(collection, &json)
                .with_context(|| format!("seeding {collection}"))?;
            println!("{collection}: {written} entities written");
        }
        Commands::Dump { collection } => {
            let db = open_database(cli.data_path)?;
            let json = db
                .dump_json(collection)
                .with_context(|| format!("dumping {collection}"))?;
            println!("{json}");
        }
        Commands::Check => {
            let db = open_database(cli.data_path)?;
            let mut failures = 0;
            for (kind, result) in db.check() {
                match result {
                    Ok(count) => println!("{kind:<10} ok       {count} entities"),
                    Err(e) => {
                        failures += 1;
                        error!(collection = %kind, error = %e, "collection failed to load");
                        println!("{kind:<10} CORRUPT  {e}");
                    }
                }
            }
            if failures > 0 {
                bail!("{failures} collection(s) failed to load");
            }
        }
    }

    Ok(())
}
