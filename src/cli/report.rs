//! CLI command for the settlement report
//!
//! Loads entries from a CSV export, a saved ledger API response, or the
//! local cache, classifies them and prints or exports the settlement.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use clap::{Args, ValueEnum};
use csv::ReaderBuilder;
use tracing::{debug, info};

use crate::config::{Settings, SplitbookPaths};
use crate::error::{SplitError, SplitResult};
use crate::models::{RawEntry, ReportPeriod};
use crate::reports::SettlementReport;
use crate::services::{Classifier, ColumnMapping, CsvImportService, LedgerPayload};
use crate::storage::LedgerCache;

/// Output format of the report
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum ReportFormat {
    #[default]
    Terminal,
    Csv,
    Json,
    Yaml,
}

/// Column layout of a CSV source
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum CsvLayout {
    /// The ledger app's own export
    #[default]
    Export,
    /// date, category, genre, name, place, comment, amount
    Compact,
    /// Guess the columns from the header row
    Detect,
}

/// Arguments of `splitbook report`
#[derive(Args, Debug)]
pub struct ReportArgs {
    /// Read entries from the ledger's CSV export
    #[arg(long, value_name = "FILE", conflicts_with = "ledger")]
    pub csv: Option<PathBuf>,

    /// Column layout of the CSV file
    #[arg(long, value_enum, default_value_t = CsvLayout::Export)]
    pub layout: CsvLayout,

    /// Read entries from a saved ledger API response (JSON)
    #[arg(long, value_name = "FILE")]
    pub ledger: Option<PathBuf>,

    /// Start date (YYYY-MM-DD)
    #[arg(short, long)]
    pub start: Option<String>,

    /// End date (YYYY-MM-DD)
    #[arg(short, long)]
    pub end: Option<String>,

    /// Month or range to report on, e.g. "2025-01" (alternative to start/end)
    #[arg(short, long, conflicts_with_all = ["start", "end"])]
    pub period: Option<String>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = ReportFormat::Terminal)]
    pub format: ReportFormat,

    /// Write to a file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Also print the per-entry table (terminal format only)
    #[arg(long)]
    pub entries: bool,
}

impl ReportArgs {
    /// Requested period; `None` means every entry of a file source
    fn resolve_period(&self) -> SplitResult<Option<ReportPeriod>> {
        if let Some(period) = &self.period {
            return ReportPeriod::parse(period).map(Some).map_err(|e| {
                SplitError::Validation(format!(
                    "Invalid period: {}. Use YYYY-MM or YYYY-MM-DD..YYYY-MM-DD",
                    e
                ))
            });
        }

        let from_file = self.csv.is_some() || self.ledger.is_some();
        if from_file && self.start.is_none() && self.end.is_none() {
            return Ok(None);
        }

        let current = ReportPeriod::current_month();
        let start = match &self.start {
            Some(s) => parse_date("start", s)?,
            None => current.start_date(),
        };
        let end = match &self.end {
            Some(e) => parse_date("end", e)?,
            None => chrono::Local::now().date_naive(),
        };

        ReportPeriod::range(start, end)
            .map(Some)
            .map_err(|e| SplitError::Validation(format!("Invalid date range: {}", e)))
    }
}

fn parse_date(what: &str, s: &str) -> SplitResult<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d").map_err(|_| {
        SplitError::Validation(format!("Invalid {} date format: {}. Use YYYY-MM-DD", what, s))
    })
}

/// Handle the report command
pub fn handle_report_command(
    paths: &SplitbookPaths,
    settings: &Settings,
    args: ReportArgs,
) -> SplitResult<()> {
    let period = args.resolve_period()?;
    let entries = load_entries(paths, &args, period.as_ref())?;

    let classifier = Classifier::new(settings.markers.clone());
    let payments = classifier.classify_all(&entries)?;
    let report = SettlementReport::generate(&payments, settings, period.as_ref());

    match &args.output {
        Some(path) => {
            let file = File::create(path).map_err(|e| {
                SplitError::Export(format!("Failed to create file {}: {}", path.display(), e))
            })?;
            let mut writer = BufWriter::new(file);
            write_report(&report, &args, &mut writer)?;
            writer
                .flush()
                .map_err(|e| SplitError::Export(e.to_string()))?;
            println!("Settlement report exported to: {}", path.display());
        }
        None => {
            let stdout = io::stdout();
            let mut writer = stdout.lock();
            write_report(&report, &args, &mut writer)?;
        }
    }

    Ok(())
}

fn write_report<W: Write>(
    report: &SettlementReport,
    args: &ReportArgs,
    writer: &mut W,
) -> SplitResult<()> {
    match args.format {
        ReportFormat::Terminal => {
            let mut text = report.format_terminal();
            if args.entries {
                text.push('\n');
                text.push_str(&report.format_entries_table());
            }
            writer
                .write_all(text.as_bytes())
                .map_err(|e| SplitError::Export(e.to_string()))
        }
        ReportFormat::Csv => report.export_csv(writer),
        ReportFormat::Json => {
            report.export_json(&mut *writer, true)?;
            writeln!(writer).map_err(|e| SplitError::Export(e.to_string()))
        }
        ReportFormat::Yaml => report.export_yaml(writer),
    }
}

/// Load the entries a report covers, oldest first
fn load_entries(
    paths: &SplitbookPaths,
    args: &ReportArgs,
    period: Option<&ReportPeriod>,
) -> SplitResult<Vec<RawEntry>> {
    let entries = if let Some(path) = &args.csv {
        let mapping = csv_mapping(path, args.layout)?;
        CsvImportService::new(mapping).read_file(path)?
    } else if let Some(path) = &args.ledger {
        LedgerPayload::read_file(path)?
            .into_entries()?
            .into_iter()
            .map(|e| e.entry)
            .collect()
    } else {
        let period = period.cloned().unwrap_or_else(ReportPeriod::current_month);
        let cache = LedgerCache::new(paths.ledger_cache_file());
        cache.load()?;
        let cached = cache.entries_between(period.start_date(), period.end_date())?;
        info!(%period, count = cached.len(), "using cached ledger entries");
        return Ok(cached.into_iter().map(|e| e.entry).collect());
    };

    Ok(match period {
        Some(period) => {
            let total = entries.len();
            let kept: Vec<RawEntry> = entries
                .into_iter()
                .filter(|e| period.contains(e.date))
                .collect();
            debug!(%period, total, kept = kept.len(), "filtered entries by period");
            kept
        }
        None => entries,
    })
}

fn csv_mapping(path: &Path, layout: CsvLayout) -> SplitResult<ColumnMapping> {
    match layout {
        CsvLayout::Export => Ok(ColumnMapping::default()),
        CsvLayout::Compact => Ok(ColumnMapping::compact()),
        CsvLayout::Detect => {
            let mut reader = ReaderBuilder::new()
                .has_headers(true)
                .from_path(path)
                .map_err(|e| {
                    SplitError::Import(format!("Failed to open {}: {}", path.display(), e))
                })?;
            let headers = reader.headers()?.clone();
            ColumnMapping::detect_from_headers(&headers).ok_or_else(|| {
                SplitError::Import(
                    "Could not find date, category and amount columns in the header".into(),
                )
            })
        }
    }
}
