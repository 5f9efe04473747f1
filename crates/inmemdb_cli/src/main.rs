//! InMemDB CLI
//!
//! Runs a command session against a fresh in-memory store, reading from
//! standard input or a script file.

use clap::Parser;
use inmemdb_cli::report::write_stats;
use inmemdb_cli::{open_input, Session, StatsFormat};
use inmemdb_core::{Config, TransactionalStore};
use std::io;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// In-memory key-value store with nested transactions.
#[derive(Parser)]
#[command(name = "inmemdb")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Read commands from this file instead of standard input
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Reject variable names longer than this many bytes
    #[arg(long)]
    max_name_len: Option<usize>,

    /// Reject values longer than this many bytes
    #[arg(long)]
    max_value_len: Option<usize>,

    /// Keep zero-count entries in the value index
    #[arg(long)]
    keep_zero_counts: bool,

    /// Print session statistics to standard error when done
    #[arg(long, value_enum)]
    stats: Option<StatsFormat>,
}

impl Cli {
    fn config(&self) -> Config {
        let mut config = Config::new().prune_zero_counts(!self.keep_zero_counts);
        config.max_name_len = self.max_name_len;
        config.max_value_len = self.max_value_len;
        config
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Logs share stderr with diagnostics; stdout carries results only.
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("warn")
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();

    info!(version = inmemdb_core::VERSION, "starting inmemdb");
    let store = TransactionalStore::with_config(cli.config());
    let mut session = Session::new(store, io::stdout().lock(), io::stderr());

    match &cli.input {
        Some(path) => session.run(open_input(path)?)?,
        None => session.run(io::stdin().lock())?,
    };

    if let Some(format) = cli.stats {
        let snapshot = session.store().stats().snapshot();
        write_stats(&mut io::stderr(), &snapshot, format)?;
    }

    Ok(())
}
