//! CLI commands for the local ledger cache

use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use clap::Subcommand;
use tracing::warn;

use crate::config::SplitbookPaths;
use crate::display::truncate;
use crate::error::{SplitError, SplitResult};
use crate::models::ReportPeriod;
use crate::services::{LedgerEntry, LedgerPayload};
use crate::storage::LedgerCache;

/// Cache subcommands
#[derive(Subcommand, Debug)]
pub enum CacheCommands {
    /// Store a saved ledger API response, replacing the month it covers
    Import {
        /// Path to the JSON response
        file: PathBuf,

        /// Month the response covers (default: month of its oldest entry)
        #[arg(short, long)]
        month: Option<String>,
    },

    /// List cached entries
    List {
        /// Month or range to list (default: everything)
        #[arg(short, long)]
        period: Option<String>,
    },
}

/// Handle cache commands
pub fn handle_cache_command(paths: &SplitbookPaths, cmd: CacheCommands) -> SplitResult<()> {
    paths.ensure_directories()?;
    let cache = LedgerCache::new(paths.ledger_cache_file());
    cache.load()?;

    match cmd {
        CacheCommands::Import { file, month } => handle_import(&cache, &file, month),
        CacheCommands::List { period } => handle_list(&cache, period),
    }
}

fn parse_period(s: &str) -> SplitResult<ReportPeriod> {
    ReportPeriod::parse(s).map_err(|e| {
        SplitError::Validation(format!("Invalid period format: {}. Use YYYY-MM (e.g., 2025-01)", e))
    })
}

fn handle_import(cache: &LedgerCache, file: &Path, month: Option<String>) -> SplitResult<()> {
    let entries = LedgerPayload::read_file(file)?.into_entries()?;

    let period = match month {
        Some(m) => parse_period(&m)?,
        None => match entries.first() {
            Some(first) => ReportPeriod::month_of(first.entry.date),
            None => {
                return Err(SplitError::Validation(
                    "The response holds no payment records; pass --month to clear a month"
                        .into(),
                ))
            }
        },
    };

    let total = entries.len();
    let (inside, outside): (Vec<LedgerEntry>, Vec<LedgerEntry>) = entries
        .into_iter()
        .partition(|e| period.contains(e.entry.date));
    if !outside.is_empty() {
        warn!(%period, skipped = outside.len(), total, "ignoring entries outside the period");
    }

    let result = cache.replace_period(&period, inside)?;
    cache.save()?;

    println!(
        "Cached {} entries for {} ({} replaced)",
        result.stored, period, result.removed
    );
    if !outside.is_empty() {
        println!("Skipped {} entries outside {}", outside.len(), period);
    }
    Ok(())
}

fn handle_list(cache: &LedgerCache, period: Option<String>) -> SplitResult<()> {
    let (start, end) = match period {
        Some(p) => {
            let period = parse_period(&p)?;
            (period.start_date(), period.end_date())
        }
        None => (NaiveDate::MIN, NaiveDate::MAX),
    };

    let entries = cache.entries_between(start, end)?;
    if entries.is_empty() {
        println!("No cached entries.");
        return Ok(());
    }

    println!(
        "{:<10} {:<10} {:<28} {:<20} {:>10}",
        "ID", "Date", "Category", "Name", "Amount"
    );
    println!("{}", "-".repeat(82));
    for e in &entries {
        println!(
            "{:<10} {:<10} {:<28} {:<20} {:>10}",
            e.id,
            e.entry.date.format("%Y-%m-%d"),
            truncate(&e.entry.category, 28),
            truncate(&e.entry.name, 20),
            e.entry.amount.to_string()
        );
    }
    println!("\n{} cached entries", entries.len());
    Ok(())
}
