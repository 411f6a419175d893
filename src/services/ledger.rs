//! Ledger API payload import
//!
//! Reads the `money` listing returned by the household ledger's REST API,
//! saved to disk as JSON. Category and genre names are taken from the record
//! when present, otherwise resolved through the id/name tables that the
//! payload may carry alongside the listing.

use std::collections::HashMap;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::error::{SplitError, SplitResult};
use crate::models::entry::{check_amount, parse_entry_amount, parse_entry_date};
use crate::models::{Money, RawEntry};

/// Record mode the settlement cares about
pub const PAYMENT_MODE: &str = "payment";

/// An amount as it appears in the payload
///
/// Anything other than a whole number or a numeric string is kept as-is so
/// the record, not the whole payload, is rejected.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum LedgerAmount {
    Number(serde_json::Number),
    Text(String),
    Other(serde_json::Value),
}

impl LedgerAmount {
    fn to_money(&self, row: usize) -> SplitResult<Money> {
        match self {
            Self::Number(n) => match n.as_i64() {
                Some(units) => check_amount(row, Money::from_units(units)),
                None => Err(SplitError::malformed(
                    row,
                    format!("amount {} is not a whole number", n),
                )),
            },
            Self::Text(s) => parse_entry_amount(row, s),
            Self::Other(value) => Err(SplitError::malformed(
                row,
                format!("unsupported amount {}", value),
            )),
        }
    }
}

/// One record of the `money` listing
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LedgerRecord {
    pub id: u64,
    #[serde(default)]
    pub mode: Option<String>,
    pub date: String,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub category_id: Option<u64>,
    #[serde(default)]
    pub genre: Option<String>,
    #[serde(default)]
    pub genre_id: Option<u64>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub place: Option<String>,
    #[serde(default)]
    pub comment: Option<String>,
    pub amount: LedgerAmount,
}

/// Id/name pair from the category or genre listing
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NamedId {
    pub id: u64,
    pub name: String,
}

/// A saved API response
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LedgerPayload {
    pub money: Vec<LedgerRecord>,
    #[serde(default)]
    pub categories: Vec<NamedId>,
    #[serde(default)]
    pub genres: Vec<NamedId>,
}

/// A ledger entry with its ledger id
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerEntry {
    pub id: u64,
    #[serde(flatten)]
    pub entry: RawEntry,
}

impl LedgerPayload {
    /// Parse a payload from JSON text
    pub fn from_json(json: &str) -> SplitResult<Self> {
        serde_json::from_str(json)
            .map_err(|e| SplitError::Import(format!("Invalid ledger payload: {}", e)))
    }

    /// Read a payload from a file
    pub fn read_file(path: &Path) -> SplitResult<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| {
            SplitError::Import(format!("Failed to read {}: {}", path.display(), e))
        })?;
        let payload = Self::from_json(&contents)?;
        info!(path = %path.display(), records = payload.money.len(), "read ledger payload");
        Ok(payload)
    }

    /// Convert payment records to entries, oldest first
    ///
    /// The API lists newest first, so the listing is reversed.
    pub fn into_entries(self) -> SplitResult<Vec<LedgerEntry>> {
        let categories: HashMap<u64, String> =
            self.categories.into_iter().map(|c| (c.id, c.name)).collect();
        let genres: HashMap<u64, String> =
            self.genres.into_iter().map(|g| (g.id, g.name)).collect();

        let total = self.money.len();
        let mut entries = Vec::with_capacity(total);

        for (idx, record) in self.money.iter().enumerate() {
            let row = idx + 1;
            if let Some(mode) = &record.mode {
                if mode != PAYMENT_MODE {
                    debug!(id = record.id, %mode, "skipping non-payment record");
                    continue;
                }
            }

            let category =
                resolve_name(row, "category", &record.category, record.category_id, &categories)?;
            let genre = match (&record.genre, record.genre_id) {
                (None, None) => String::new(),
                _ => resolve_name(row, "genre", &record.genre, record.genre_id, &genres)
                    .unwrap_or_else(|e| {
                        warn!(id = record.id, error = %e, "leaving genre empty");
                        String::new()
                    }),
            };

            let entry = RawEntry {
                date: parse_entry_date(row, &record.date)?,
                category,
                genre,
                name: record.name.clone().unwrap_or_default(),
                place: record.place.clone().unwrap_or_default(),
                comment: record.comment.clone().unwrap_or_default(),
                amount: record.amount.to_money(row)?,
            };

            entries.push(LedgerEntry { id: record.id, entry });
        }

        entries.reverse();
        debug!(total, kept = entries.len(), "converted ledger records");
        Ok(entries)
    }
}

fn resolve_name(
    row: usize,
    what: &str,
    name: &Option<String>,
    id: Option<u64>,
    table: &HashMap<u64, String>,
) -> SplitResult<String> {
    if let Some(name) = name {
        return Ok(name.clone());
    }
    match id {
        Some(id) => table
            .get(&id)
            .cloned()
            .ok_or_else(|| SplitError::malformed(row, format!("unknown {} id {}", what, id))),
        None => Err(SplitError::malformed(row, format!("missing {}", what))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    const PAYLOAD: &str = r#"{
        "money": [
            {"id": 3, "mode": "payment", "date": "2025-01-20", "category_id": 101,
             "genre_id": 10101, "name": "Lunch", "place": "Cafe", "comment": "", "amount": "1,300"},
            {"id": 2, "mode": "income", "date": "2025-01-18", "category_id": 11,
             "amount": 250000},
            {"id": 1, "mode": "payment", "date": "2025-01-10", "category": "Personal_Hobby_B",
             "genre": "Games", "comment": "dp", "amount": 4800}
        ],
        "categories": [{"id": 101, "name": "Food_A"}, {"id": 11, "name": "Salary"}],
        "genres": [{"id": 10101, "name": "Eating out"}]
    }"#;

    #[test]
    fn test_into_entries_resolves_and_orders() {
        let entries = LedgerPayload::from_json(PAYLOAD)
            .unwrap()
            .into_entries()
            .unwrap();

        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].id, 1);
        assert_eq!(entries[0].entry.category, "Personal_Hobby_B");
        assert_eq!(entries[0].entry.amount.units(), 4800);

        assert_eq!(entries[1].id, 3);
        assert_eq!(entries[1].entry.category, "Food_A");
        assert_eq!(entries[1].entry.genre, "Eating out");
        assert_eq!(entries[1].entry.amount.units(), 1300);
        assert_eq!(
            entries[1].entry.date,
            NaiveDate::from_ymd_opt(2025, 1, 20).unwrap()
        );
    }

    #[test]
    fn test_unknown_category_id() {
        let json = r#"{"money": [{"id": 1, "date": "2025-01-10", "category_id": 9, "amount": 1}]}"#;
        let err = LedgerPayload::from_json(json)
            .unwrap()
            .into_entries()
            .unwrap_err();
        assert!(err.is_malformed());
        assert!(err.to_string().contains("unknown category id 9"));
    }

    #[test]
    fn test_bad_amount_and_date() {
        let json = r#"{"money": [{"id": 1, "date": "2025-01-10", "category": "Food", "amount": "ten"}]}"#;
        assert!(LedgerPayload::from_json(json)
            .unwrap()
            .into_entries()
            .unwrap_err()
            .is_malformed());

        let json = r#"{"money": [{"id": 1, "date": "10 Jan", "category": "Food", "amount": 10}]}"#;
        assert!(LedgerPayload::from_json(json)
            .unwrap()
            .into_entries()
            .unwrap_err()
            .is_malformed());

        let json = r#"{"money": [{"id": 1, "date": "2025-01-10", "category": "Food", "amount": -10}]}"#;
        assert!(LedgerPayload::from_json(json)
            .unwrap()
            .into_entries()
            .unwrap_err()
            .is_malformed());
    }

    #[test]
    fn test_fractional_and_oversized_amounts_are_malformed() {
        for amount in ["12.5", "1e30", "true", "18446744073709551615"] {
            let json = format!(
                r#"{{"money": [
                    {{"id": 2, "date": "2025-01-11", "category": "Food", "amount": 10}},
                    {{"id": 1, "date": "2025-01-10", "category": "Food", "amount": {}}}
                ]}}"#,
                amount
            );
            let err = LedgerPayload::from_json(&json)
                .unwrap()
                .into_entries()
                .unwrap_err();
            assert!(err.is_malformed(), "{}: {}", amount, err);
            assert!(err.to_string().contains("row 2"), "{}: {}", amount, err);
        }
    }

    #[test]
    fn test_unknown_genre_id_leaves_genre_empty() {
        let json = r#"{"money": [
            {"id": 1, "date": "2025-01-10", "category": "Food", "genre_id": 77, "amount": 10},
            {"id": 2, "date": "2025-01-11", "category": "Food", "amount": 20}
        ]}"#;
        let entries = LedgerPayload::from_json(json)
            .unwrap()
            .into_entries()
            .unwrap();
        assert!(entries.iter().all(|e| e.entry.genre.is_empty()));
    }

    #[test]
    fn test_invalid_json() {
        let err = LedgerPayload::from_json("{\"money\": 5}").unwrap_err();
        assert!(matches!(err, SplitError::Import(_)));
    }

    #[test]
    fn test_ledger_entry_serializes_flat() {
        let entry = LedgerEntry {
            id: 7,
            entry: RawEntry::new(
                NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
                "Food",
                Money::from_units(100),
            ),
        };
        let json = serde_json::to_value(&entry).unwrap();
        assert_eq!(json["id"], 7);
        assert_eq!(json["category"], "Food");
        assert_eq!(json["date"], "2025-01-01");
        assert_eq!(json["amount"], 100);
    }
}
