//! `zn-generate`: generates divisor-graph records into a SQLite database.
//!
//! Resumes one past the highest stored `n` and keeps going until Ctrl-C (or
//! `--until`). A stop request finishes the number in flight, commits the
//! partial batch, and exits cleanly.
//!
//! **Usage:**
//! ```text
//! zn-generate [--db <path>] [--config <file>] [--threshold <n>] [--batch-size <n>]
//!             [--start <n>] [--until <n>] [--compact] [-v...] [--quiet]
//! ```
//!
//! Exits non-zero if the database cannot be opened or a batch fails to commit.

#![deny(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    missing_docs,
    clippy::missing_errors_doc
)]

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::{fmt, EnvFilter};
use zn_engine::{CancellationToken, CheckpointedBatchWriter, EngineConfig, SqliteStore};

/// Generate Z_n divisor-graph records.
#[derive(Parser)]
#[command(
    name = "zn-generate",
    about = "Generate Z_n divisor-graph records into a SQLite database"
)]
struct Args {
    /// SQLite database file (created if missing).
    #[arg(long, default_value = "graph_data.db")]
    db: PathBuf,

    /// TOML configuration file; flags below override its values.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Build explicit graphs only for n below this value.
    #[arg(long)]
    threshold: Option<u64>,

    /// Records per committed batch.
    #[arg(long)]
    batch_size: Option<usize>,

    /// First n when the database is empty.
    #[arg(long)]
    start: Option<u64>,

    /// Stop after this n (inclusive) instead of running until interrupted.
    #[arg(long)]
    until: Option<u64>,

    /// Compact (VACUUM) the database after generation stops.
    #[arg(long)]
    compact: bool,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress all log output.
    #[arg(short, long)]
    quiet: bool,
}

impl Args {
    fn init_logging(&self) {
        if self.quiet {
            return;
        }
        let level = match self.verbose {
            0 => "info",
            1 => "debug",
            _ => "trace",
        };
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
        fmt().with_env_filter(filter).with_target(false).init();
    }

    fn engine_config(&self) -> Result<EngineConfig> {
        let mut config = match &self.config {
            Some(path) => EngineConfig::load(path)
                .with_context(|| format!("Failed to load config {}", path.display()))?,
            None => EngineConfig::default(),
        };
        if let Some(threshold) = self.threshold {
            config.graph_threshold = threshold;
        }
        if let Some(batch_size) = self.batch_size {
            config.batch_size = batch_size;
        }
        if let Some(start) = self.start {
            config.start_n = start;
        }
        if self.until.is_some() {
            config.stop_after = self.until;
        }
        config.compact_on_finish |= self.compact;
        Ok(config)
    }
}

fn main() -> Result<()> {
    let args = Args::parse();
    args.init_logging();

    let config = args.engine_config()?;
    let store = SqliteStore::open(&args.db)
        .with_context(|| format!("Failed to open database {}", args.db.display()))?;
    let mut writer =
        CheckpointedBatchWriter::new(store, config).context("Invalid engine configuration")?;

    let cancel = CancellationToken::new();
    let handle = cancel.clone();
    ctrlc::set_handler(move || {
        eprintln!("\nStopping generator... finishing current batch.");
        handle.cancel();
    })
    .context("Failed to install Ctrl-C handler")?;

    let summary = writer.run(&cancel).context("Generation failed")?;

    match summary.last_committed {
        Some(last) => println!(
            "Generated n = {}..={} ({} records in {} batches).",
            summary.resumed_at, last, summary.records, summary.batches
        ),
        None => println!("Nothing generated; next n is {}.", summary.resumed_at),
    }
    if writer.config().compact_on_finish {
        println!("Database compacted.");
    }
    println!("Database closed.");
    Ok(())
}
