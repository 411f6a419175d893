//! Raw expense entry model
//!
//! The normalized shape every ingestion source (CSV export, ledger API
//! payload, local cache) produces before classification.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::money::Money;
use crate::error::{SplitError, SplitResult};

/// Date format used by every ingestion source
pub const ENTRY_DATE_FORMAT: &str = "%Y-%m-%d";

/// One expense entry as supplied by a source collaborator
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawEntry {
    /// Date the expense was incurred
    pub date: NaiveDate,

    /// Category, possibly carrying payer / personal markers
    pub category: String,

    /// Sub-category
    #[serde(default)]
    pub genre: String,

    /// Item or merchant name
    #[serde(default)]
    pub name: String,

    /// Shop or location
    #[serde(default)]
    pub place: String,

    /// Free text; the first line may carry a directive
    #[serde(default)]
    pub comment: String,

    /// Amount in the smallest currency unit, never negative
    pub amount: Money,
}

impl RawEntry {
    /// Create an entry from already-typed values
    pub fn new(date: NaiveDate, category: impl Into<String>, amount: Money) -> Self {
        Self {
            date,
            category: category.into(),
            genre: String::new(),
            name: String::new(),
            place: String::new(),
            comment: String::new(),
            amount,
        }
    }

    /// Set the comment
    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = comment.into();
        self
    }

    /// Set genre, name and place
    pub fn with_details(
        mut self,
        genre: impl Into<String>,
        name: impl Into<String>,
        place: impl Into<String>,
    ) -> Self {
        self.genre = genre.into();
        self.name = name.into();
        self.place = place.into();
        self
    }

    /// Build an entry from string fields, rejecting bad dates and amounts
    ///
    /// `row` is the 1-based position of the record in its source and is only
    /// used for error reporting.
    #[allow(clippy::too_many_arguments)]
    pub fn parse_fields(
        row: usize,
        date: &str,
        category: &str,
        genre: &str,
        name: &str,
        place: &str,
        comment: &str,
        amount: &str,
    ) -> SplitResult<Self> {
        let date = parse_entry_date(row, date)?;
        let amount = parse_entry_amount(row, amount)?;

        Ok(Self {
            date,
            category: category.trim().to_string(),
            genre: genre.trim().to_string(),
            name: name.trim().to_string(),
            place: place.trim().to_string(),
            comment: comment.to_string(),
            amount,
        })
    }
}

/// Parse an ISO `YYYY-MM-DD` date, mapping failure to `MalformedRecord`
pub fn parse_entry_date(row: usize, s: &str) -> SplitResult<NaiveDate> {
    let s = s.trim();
    NaiveDate::parse_from_str(s, ENTRY_DATE_FORMAT)
        .map_err(|_| SplitError::malformed(row, format!("invalid date '{}'", s)))
}

/// Parse a non-negative integer amount, mapping failure to `MalformedRecord`
pub fn parse_entry_amount(row: usize, s: &str) -> SplitResult<Money> {
    let amount = Money::parse(s).map_err(|e| SplitError::malformed(row, e.to_string()))?;
    check_amount(row, amount)
}

/// Largest amount a single entry may carry
///
/// Keeps running totals far from `i64` overflow: millions of entries at
/// this size still sum safely.
pub const MAX_ENTRY_AMOUNT: i64 = 1_000_000_000_000;

/// Reject negative and implausibly large amounts
pub fn check_amount(row: usize, amount: Money) -> SplitResult<Money> {
    if amount.is_negative() {
        return Err(SplitError::malformed(
            row,
            format!("negative amount {}", amount),
        ));
    }
    if amount.units() > MAX_ENTRY_AMOUNT {
        return Err(SplitError::malformed(
            row,
            format!("amount {} exceeds {}", amount, MAX_ENTRY_AMOUNT),
        ));
    }
    Ok(amount)
}
