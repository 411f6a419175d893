//! splitbook - expense splitting and settlement for two people
//!
//! Reads a household ledger (the app's CSV export or a saved API response),
//! classifies every payment by who paid and whether it is shared, and works
//! out the single transfer that evens out shared spending.
//!
//! # Architecture
//!
//! - `config`: Configuration and path management
//! - `error`: Custom error types
//! - `models`: Entries, classified payments, summaries, settlements
//! - `services`: Ingestion and classification
//! - `storage`: Local JSON cache of ledger entries
//! - `reports`: Settlement report rendering and export
//! - `cli`: Command handlers for the `splitbook` binary
//!
//! # Example
//!
//! ```rust,ignore
//! use splitbook::config::Settings;
//! use splitbook::reports::SettlementReport;
//! use splitbook::services::{Classifier, CsvImportService};
//!
//! let entries = CsvImportService::default().read_file(path)?;
//! let settings = Settings::default();
//! let payments = Classifier::new(settings.markers.clone()).classify_all(&entries)?;
//! let report = SettlementReport::generate(&payments, &settings, None);
//! println!("{}", report.format_terminal());
//! ```

pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod models;
pub mod reports;
pub mod services;
pub mod storage;

pub use error::{SplitError, SplitResult};
