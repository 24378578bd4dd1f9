//! Budget Dashboard CLI
//!
//! Loads a JSON ledger export, applies the selected filters and prints the
//! dashboard report.
//!
//! # Usage
//!
//! ```bash
//! cargo run -- haushalt.json --year 2024 --group Schule --format text
//! ```
//!
//! # Environment Variables
//!
//! - `RUST_LOG`: Set to `debug` or `warn` to control logging verbosity

use budget_dashboard::report::{write_csv, write_json, write_text};
use budget_dashboard::{load_ledger, Filters, GroupFilter, GroupKey, Result, Session};
use clap::{Parser, ValueEnum};
use std::fs::File;
use std::io::{self, BufReader};
use std::path::PathBuf;
use std::process;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
    Json,
    Csv,
    Text,
}

/// Aggregate a budget ledger by account group.
#[derive(Debug, Parser)]
#[command(name = "budget-dashboard", version)]
struct Cli {
    /// Ledger file: a JSON array of row objects
    ledger: PathBuf,

    /// Only rows of this year
    #[arg(long)]
    year: Option<String>,

    /// Only rows of this super-group
    #[arg(long, value_name = "NAME")]
    level1: Option<String>,

    /// Only rows of these groups (repeatable)
    #[arg(long = "group", value_name = "NAME")]
    groups: Vec<String>,

    /// Account group to break down by account; "(none)" for rows without one
    #[arg(long, value_name = "ACCOUNT_GROUP")]
    detail: Option<String>,

    #[arg(long, value_enum, default_value_t = Format::Json)]
    format: Format,
}

fn main() {
    env_logger::init();

    if let Err(e) = run(Cli::parse()) {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let file = File::open(&cli.ledger)?;
    let rows = load_ledger(BufReader::new(file))?;

    let filters = Filters {
        year: cli.year,
        level1: GroupFilter::from_optional(cli.level1),
        groups: cli.groups.into_iter().collect(),
    };

    let mut session = Session::with_filters(rows, filters);
    if let Some(detail) = cli.detail.as_deref() {
        session.toggle_detail(GroupKey::from_label(detail));
    }

    let report = session.render();

    let stdout = io::stdout();
    let handle = stdout.lock();
    match cli.format {
        Format::Json => write_json(&report, handle),
        Format::Csv => write_csv(&report, handle),
        Format::Text => write_text(&report, handle),
    }
}
