//! CSV import service
//!
//! Reads the expense ledger's CSV export into `RawEntry` values using a
//! column mapping. A malformed row aborts the import: a settlement computed
//! over a partial set of rows would be wrong.

use std::io::Read;
use std::path::Path;

use csv::{ReaderBuilder, StringRecord};
use tracing::{debug, info};

use crate::error::{SplitError, SplitResult};
use crate::models::RawEntry;

/// Column mapping configuration for CSV import
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnMapping {
    pub date_column: usize,
    pub category_column: usize,
    pub genre_column: Option<usize>,
    pub name_column: Option<usize>,
    pub place_column: Option<usize>,
    pub comment_column: Option<usize>,
    pub amount_column: usize,
    /// Whether the first row is a header
    pub has_header: bool,
    /// Delimiter character
    pub delimiter: u8,
}

impl Default for ColumnMapping {
    /// Layout of the ledger app's CSV export
    fn default() -> Self {
        Self {
            date_column: 0,
            category_column: 2,
            genre_column: Some(3),
            name_column: Some(6),
            place_column: Some(8),
            comment_column: Some(9),
            amount_column: 11,
            has_header: true,
            delimiter: b',',
        }
    }
}

impl ColumnMapping {
    /// A compact layout: date, category, genre, name, place, comment, amount
    pub fn compact() -> Self {
        Self {
            date_column: 0,
            category_column: 1,
            genre_column: Some(2),
            name_column: Some(3),
            place_column: Some(4),
            comment_column: Some(5),
            amount_column: 6,
            has_header: true,
            delimiter: b',',
        }
    }

    /// Detect a mapping from a header row
    ///
    /// Returns `None` unless at least the date, category and amount columns
    /// can be identified by name.
    pub fn detect_from_headers(headers: &StringRecord) -> Option<Self> {
        let mut date = None;
        let mut category = None;
        let mut amount = None;
        let mut mapping = Self {
            genre_column: None,
            name_column: None,
            place_column: None,
            comment_column: None,
            ..Self::default()
        };

        for (idx, header) in headers.iter().enumerate() {
            let h = header.trim().to_lowercase();

            if date.is_none() && h.contains("date") {
                date = Some(idx);
            } else if category.is_none() && h.contains("category") {
                category = Some(idx);
            } else if h.contains("genre") || h.contains("subcategory") {
                mapping.genre_column.get_or_insert(idx);
            } else if amount.is_none()
                && (h.contains("amount") || h.contains("price") || h.contains("payment"))
            {
                amount = Some(idx);
            } else if h.contains("place") || h.contains("shop") || h.contains("store") {
                mapping.place_column.get_or_insert(idx);
            } else if h.contains("comment") || h.contains("memo") || h.contains("note") {
                mapping.comment_column.get_or_insert(idx);
            } else if h.contains("name") || h.contains("item") {
                mapping.name_column.get_or_insert(idx);
            }
        }

        mapping.date_column = date?;
        mapping.category_column = category?;
        mapping.amount_column = amount?;
        Some(mapping)
    }
}

/// Service for CSV import
#[derive(Debug, Clone, Default)]
pub struct CsvImportService {
    mapping: ColumnMapping,
}

impl CsvImportService {
    /// Create an import service with a fixed mapping
    pub fn new(mapping: ColumnMapping) -> Self {
        Self { mapping }
    }

    /// Read entries from a CSV file
    pub fn read_file(&self, path: &Path) -> SplitResult<Vec<RawEntry>> {
        let file = std::fs::File::open(path).map_err(|e| {
            SplitError::Import(format!("Failed to open {}: {}", path.display(), e))
        })?;
        let entries = self.read_from(file)?;
        info!(path = %path.display(), count = entries.len(), "read CSV entries");
        Ok(entries)
    }

    /// Read entries from any reader
    pub fn read_from<R: Read>(&self, reader: R) -> SplitResult<Vec<RawEntry>> {
        let mut reader = ReaderBuilder::new()
            .has_headers(self.mapping.has_header)
            .delimiter(self.mapping.delimiter)
            .flexible(true)
            .from_reader(reader);

        let mut entries = Vec::new();
        for (idx, result) in reader.records().enumerate() {
            let row = idx + 1;
            let record =
                result.map_err(|e| SplitError::malformed(row, format!("unreadable row: {}", e)))?;
            entries.push(self.parse_record(&record, row)?);
        }

        debug!(count = entries.len(), "parsed CSV records");
        Ok(entries)
    }

    /// Parse a single CSV record
    fn parse_record(&self, record: &StringRecord, row: usize) -> SplitResult<RawEntry> {
        let required = |col: usize, what: &str| {
            record
                .get(col)
                .ok_or_else(|| SplitError::malformed(row, format!("missing {} column", what)))
        };
        let optional = |col: Option<usize>| col.and_then(|c| record.get(c)).unwrap_or("");

        RawEntry::parse_fields(
            row,
            required(self.mapping.date_column, "date")?,
            required(self.mapping.category_column, "category")?,
            optional(self.mapping.genre_column),
            optional(self.mapping.name_column),
            optional(self.mapping.place_column),
            optional(self.mapping.comment_column),
            required(self.mapping.amount_column, "amount")?,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const EXPORT: &str = "\
date,method,category,genre,from,to,name,receipt,place,comment,income,payment
2025-01-15,payment,Food_A,Groceries,Wallet,,Vegetables,,Market,,,1200
2025-01-16,payment,Personal_Hobby_B,Books,Card,,Novel,,Bookshop,\"dp\nsaved\",,1500
";

    #[test]
    fn test_parse_default_export() {
        let service = CsvImportService::default();
        let entries = service.read_from(EXPORT.as_bytes()).unwrap();

        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].date, NaiveDate::from_ymd_opt(2025, 1, 15).unwrap());
        assert_eq!(entries[0].category, "Food_A");
        assert_eq!(entries[0].genre, "Groceries");
        assert_eq!(entries[0].name, "Vegetables");
        assert_eq!(entries[0].place, "Market");
        assert_eq!(entries[0].amount.units(), 1200);
        assert_eq!(entries[1].comment, "dp\nsaved");
    }

    #[test]
    fn test_compact_mapping() {
        let csv_data = "Date,Category,Genre,Name,Place,Comment,Amount\n\
                        2025-02-01,Daily_B,Soap,Soap,Drugstore,,398\n";
        let service = CsvImportService::new(ColumnMapping::compact());
        let entries = service.read_from(csv_data.as_bytes()).unwrap();
        assert_eq!(entries[0].category, "Daily_B");
        assert_eq!(entries[0].amount.units(), 398);
    }

    #[test]
    fn test_malformed_date_reports_row() {
        let csv_data = "Date,Category,Genre,Name,Place,Comment,Amount\n\
                        2025-02-01,Food,,,,,100\n\
                        02/03/2025,Food,,,,,100\n";
        let service = CsvImportService::new(ColumnMapping::compact());
        let err = service.read_from(csv_data.as_bytes()).unwrap_err();
        assert!(err.is_malformed());
        assert!(err.to_string().contains("row 2"));
    }

    #[test]
    fn test_non_integer_amount_rejected() {
        let csv_data = "Date,Category,Genre,Name,Place,Comment,Amount\n\
                        2025-02-01,Food,,,,,12.50\n";
        let service = CsvImportService::new(ColumnMapping::compact());
        assert!(service.read_from(csv_data.as_bytes()).unwrap_err().is_malformed());
    }

    #[test]
    fn test_missing_column() {
        let csv_data = "Date,Category\n2025-02-01,Food\n";
        let service = CsvImportService::new(ColumnMapping::compact());
        let err = service.read_from(csv_data.as_bytes()).unwrap_err();
        assert!(err.to_string().contains("missing amount column"));
    }

    #[test]
    fn test_detect_mapping() {
        let header = "Transaction Date,Memo,Category,Subcategory,Item Name,Shop,Amount";
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .from_reader(header.as_bytes());
        let headers = reader.headers().unwrap().clone();
        let mapping = ColumnMapping::detect_from_headers(&headers).unwrap();

        assert_eq!(mapping.date_column, 0);
        assert_eq!(mapping.comment_column, Some(1));
        assert_eq!(mapping.category_column, 2);
        assert_eq!(mapping.genre_column, Some(3));
        assert_eq!(mapping.name_column, Some(4));
        assert_eq!(mapping.place_column, Some(5));
        assert_eq!(mapping.amount_column, 6);
    }

    #[test]
    fn test_detect_mapping_requires_core_columns() {
        let headers = StringRecord::from(vec!["When", "What", "How much"]);
        assert!(ColumnMapping::detect_from_headers(&headers).is_none());
    }

    #[test]
    fn test_read_file() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(EXPORT.as_bytes()).unwrap();

        let entries = CsvImportService::default().read_file(file.path()).unwrap();
        assert_eq!(entries.len(), 2);
    }
}
