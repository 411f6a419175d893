//! Reports module for splitbook
//!
//! Renders settlement runs: the summary sections and one row per entry.

pub mod rows;
pub mod settlement;

pub use rows::{format_rows_table, PaymentRow};
pub use settlement::SettlementReport;
