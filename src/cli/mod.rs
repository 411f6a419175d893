//! CLI command handlers
//!
//! Bridges clap argument parsing with the services and reports.

pub mod cache;
pub mod report;

pub use cache::{handle_cache_command, CacheCommands};
pub use report::{handle_report_command, CsvLayout, ReportArgs, ReportFormat};
