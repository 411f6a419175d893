//! Core data models for splitbook
//!
//! Raw ledger entries, their classified form, the running summary and the
//! settlement derived from it.

pub mod entry;
pub mod markers;
pub mod money;
pub mod payment;
pub mod period;
pub mod settlement;
pub mod summary;

pub use entry::RawEntry;
pub use markers::{CategoryTags, MarkerSet};
pub use money::{Money, MoneyParseError};
pub use payment::{ClassifiedPayment, CommentDirective, Party, Payer};
pub use period::{PeriodParseError, ReportPeriod};
pub use settlement::{settle, Settlement};
pub use summary::PaymentSummary;
