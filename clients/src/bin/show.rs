//! `zn-show`: prints stored records from a generator database.
//!
//! **Usage:**
//! ```text
//! zn-show [--db <path>] <n>        # one record as JSON
//! zn-show [--db <path>] --max      # the checkpoint (highest stored n)
//! ```

#![deny(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    missing_docs,
    clippy::missing_errors_doc
)]

use std::path::PathBuf;
use std::process;

use anyhow::{Context, Result};
use clap::Parser;
use zn_engine::{RecordStore, SqliteStore};

/// Inspect a Z_n divisor-graph database.
#[derive(Parser)]
#[command(name = "zn-show", about = "Print stored Z_n divisor-graph records")]
struct Args {
    /// SQLite database file.
    #[arg(long, default_value = "graph_data.db")]
    db: PathBuf,

    /// Print the highest stored n and the record count instead of a record.
    #[arg(long, conflicts_with = "n")]
    max: bool,

    /// The number whose record to print.
    #[arg(required_unless_present = "max")]
    n: Option<u64>,
}

fn main() -> Result<()> {
    let args = Args::parse();

    if !args.db.exists() {
        eprintln!(
            "Database {} not found. Run zn-generate first.",
            args.db.display()
        );
        process::exit(1);
    }
    let store = SqliteStore::open(&args.db)
        .with_context(|| format!("Failed to open database {}", args.db.display()))?;

    if args.max {
        let max_n = store.max_n()?.unwrap_or(0);
        let count = store.count()?;
        println!("{}", serde_json::json!({ "max_n": max_n, "count": count }));
        return Ok(());
    }

    let Some(n) = args.n else {
        return Ok(());
    };
    match store.get(n).with_context(|| format!("Failed to read n = {}", n))? {
        Some(record) => {
            let mut value = serde_json::to_value(&record).context("Failed to encode record")?;
            value["components_str"] = serde_json::Value::String(record.components_str());
            println!(
                "{}",
                serde_json::to_string_pretty(&value).context("Failed to encode record")?
            );
        }
        None => {
            eprintln!("n = {} is not stored.", n);
            process::exit(1);
        }
    }
    Ok(())
}
