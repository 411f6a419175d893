//! Display formatting for terminal output

pub mod report;

pub use report::{double_separator, first_line, format_amount, separator, truncate};
