use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use shiftpulse_core::{score_batch, score_batch_with_totals, MismatchStatus, ShiftRecord, Strictness};
use shiftpulse_ingest::{detect, normalize_batch_with, RawRow};

mod render;

use render::{GroupBy, SortMode};

#[derive(Parser, Debug)]
#[command(name = "shiftpulse", version, about = "Daily agent shift metrics")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Score one or more daily exports and print grouped tables
    Process {
        /// CSV export files, one per source system
        #[arg(required = true)]
        csv: Vec<PathBuf>,

        /// Report date (YYYY-MM-DD); goals depend on its weekday
        #[arg(long)]
        date: NaiveDate,

        #[arg(long, value_enum, default_value = "source")]
        group_by: GroupBy,

        #[arg(long, value_enum, default_value = "agent")]
        sort: SortMode,

        /// Treat unit-less duration text as missing instead of zero
        #[arg(long)]
        strict: bool,

        /// Skip the per-agent rollup rows
        #[arg(long)]
        no_totals: bool,
    },

    /// List only rows with data-quality anomalies (flagged or missing)
    Anomalies {
        /// CSV export files, one per source system
        #[arg(required = true)]
        csv: Vec<PathBuf>,

        /// Report date (YYYY-MM-DD)
        #[arg(long)]
        date: NaiveDate,

        /// Treat unit-less duration text as missing instead of zero
        #[arg(long)]
        strict: bool,
    },
}

/// Read one CSV export into raw rows keyed by header name.
fn read_export(path: &Path) -> Result<(Vec<String>, Vec<RawRow>)> {
    let mut rdr = csv::Reader::from_path(path)
        .with_context(|| format!("opening {}", path.display()))?;

    let headers: Vec<String> = rdr
        .headers()
        .with_context(|| format!("reading headers of {}", path.display()))?
        .iter()
        .map(|h| h.to_string())
        .collect();

    let mut rows = Vec::new();
    for record in rdr.records() {
        let record = record.with_context(|| format!("reading {}", path.display()))?;
        let row: RawRow = headers
            .iter()
            .cloned()
            .zip(record.iter().map(|c| c.to_string()))
            .collect();
        rows.push(row);
    }
    Ok((headers, rows))
}

/// Load every export, detecting each file's schema independently.
fn load_batch(paths: &[PathBuf], date: NaiveDate, strict: bool) -> Result<Vec<ShiftRecord>> {
    let strictness = if strict {
        Strictness::Strict
    } else {
        Strictness::Lenient
    };

    let mut records = Vec::new();
    for (i, path) in paths.iter().enumerate() {
        let (headers, rows) = read_export(path)?;
        let schema = detect(&headers)
            .with_context(|| format!("detecting schema of {}", path.display()))?;
        let label = format!("Server {}", i + 1);
        records.extend(normalize_batch_with(schema, &label, &rows, date, strictness));
    }
    Ok(records)
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Command::Process {
            csv,
            date,
            group_by,
            sort,
            strict,
            no_totals,
        } => {
            let records = load_batch(&csv, date, strict)?;
            println!(
                "Loaded {} shift records from {} export(s) for {}\n",
                records.len(),
                csv.len(),
                date.format("%A, %B %d, %Y")
            );

            let scored = if no_totals {
                score_batch(&records)
            } else {
                score_batch_with_totals(&records)
            };

            print!("{}", render::render_tables(&scored, group_by, sort));
            print!("{}", render::render_summary(&scored, group_by));
        }

        Command::Anomalies { csv, date, strict } => {
            let records = load_batch(&csv, date, strict)?;
            let scored = score_batch(&records);

            let anomalies: Vec<_> = scored
                .iter()
                .filter(|r| r.mismatch.status != MismatchStatus::Ok)
                .collect();

            println!(
                "{} of {} rows need attention\n",
                anomalies.len(),
                scored.len()
            );
            for rec in anomalies {
                println!("[{:?}] {}", rec.mismatch.status, rec.mismatch.detail);
            }
        }
    }

    Ok(())
}
