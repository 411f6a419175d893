//! Service layer for splitbook
//!
//! Ingestion of ledger data (CSV export or saved API payload) and the
//! classifier that turns raw entries into payments.

pub mod classifier;
pub mod import;
pub mod ledger;

pub use classifier::{classify_category, CategoryClass, Classifier};
pub use import::{ColumnMapping, CsvImportService};
pub use ledger::{LedgerEntry, LedgerPayload, LedgerRecord};
