//! Report period representation
//!
//! A reporting run covers either a calendar month ("2025-01") or an explicit
//! inclusive date range ("2025-01-01..2025-01-15").

use chrono::{Datelike, Duration, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;

/// An inclusive date range used to select entries for a report
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ReportPeriod {
    start: NaiveDate,
    end: NaiveDate,
    monthly: bool,
}

impl ReportPeriod {
    /// Create a calendar-month period
    pub fn monthly(year: i32, month: u32) -> Result<Self, PeriodParseError> {
        if !(1..=12).contains(&month) {
            return Err(PeriodParseError::InvalidMonth(month));
        }

        let start = NaiveDate::from_ymd_opt(year, month, 1)
            .ok_or_else(|| PeriodParseError::InvalidFormat(format!("{}-{:02}", year, month)))?;
        let next_month = if month == 12 {
            NaiveDate::from_ymd_opt(year + 1, 1, 1)
        } else {
            NaiveDate::from_ymd_opt(year, month + 1, 1)
        };
        let end = next_month
            .map(|d| d - Duration::days(1))
            .ok_or_else(|| PeriodParseError::InvalidFormat(format!("{}-{:02}", year, month)))?;

        Ok(Self {
            start,
            end,
            monthly: true,
        })
    }

    /// Create a custom inclusive range
    pub fn range(start: NaiveDate, end: NaiveDate) -> Result<Self, PeriodParseError> {
        if end < start {
            return Err(PeriodParseError::EndBeforeStart { start, end });
        }
        Ok(Self {
            start,
            end,
            monthly: false,
        })
    }

    /// The month containing a date
    pub fn month_of(date: NaiveDate) -> Self {
        let start = date.with_day(1).unwrap_or(date);
        let end = start
            .checked_add_months(chrono::Months::new(1))
            .map(|d| d - Duration::days(1))
            .unwrap_or(date);
        Self {
            start,
            end,
            monthly: true,
        }
    }

    /// The current calendar month
    pub fn current_month() -> Self {
        Self::month_of(chrono::Local::now().date_naive())
    }

    /// First day of the period
    pub fn start_date(&self) -> NaiveDate {
        self.start
    }

    /// Last day of the period (inclusive)
    pub fn end_date(&self) -> NaiveDate {
        self.end
    }

    /// Whether this period is a whole calendar month
    pub fn is_monthly(&self) -> bool {
        self.monthly
    }

    /// Check if a date falls within this period
    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start && date <= self.end
    }

    /// Parse a period string
    ///
    /// Formats:
    /// - Monthly: "2025-01"
    /// - Custom: "2025-01-01..2025-01-15"
    pub fn parse(s: &str) -> Result<Self, PeriodParseError> {
        let s = s.trim();

        if let Some((start, end)) = s.split_once("..") {
            let start = NaiveDate::parse_from_str(start.trim(), "%Y-%m-%d")
                .map_err(|_| PeriodParseError::InvalidFormat(s.to_string()))?;
            let end = NaiveDate::parse_from_str(end.trim(), "%Y-%m-%d")
                .map_err(|_| PeriodParseError::InvalidFormat(s.to_string()))?;
            return Self::range(start, end);
        }

        let parts: Vec<&str> = s.split('-').collect();
        if parts.len() == 2 {
            let year: i32 = parts[0]
                .parse()
                .map_err(|_| PeriodParseError::InvalidFormat(s.to_string()))?;
            let month: u32 = parts[1]
                .parse()
                .map_err(|_| PeriodParseError::InvalidFormat(s.to_string()))?;
            return Self::monthly(year, month);
        }

        Err(PeriodParseError::InvalidFormat(s.to_string()))
    }
}

impl fmt::Display for ReportPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.monthly {
            write!(f, "{:04}-{:02}", self.start.year(), self.start.month())
        } else {
            write!(
                f,
                "{}..{}",
                self.start.format("%Y-%m-%d"),
                self.end.format("%Y-%m-%d")
            )
        }
    }
}

/// Error type for period parsing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PeriodParseError {
    InvalidFormat(String),
    InvalidMonth(u32),
    EndBeforeStart { start: NaiveDate, end: NaiveDate },
}

impl fmt::Display for PeriodParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PeriodParseError::InvalidFormat(s) => write!(f, "Invalid period format: {}", s),
            PeriodParseError::InvalidMonth(m) => write!(f, "Invalid month: {}", m),
            PeriodParseError::EndBeforeStart { start, end } => {
                write!(f, "Period ends ({}) before it starts ({})", end, start)
            }
        }
    }
}

impl std::error::Error for PeriodParseError {}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_monthly_period() {
        let period = ReportPeriod::monthly(2024, 2).unwrap();
        assert_eq!(period.start_date(), date(2024, 2, 1));
        assert_eq!(period.end_date(), date(2024, 2, 29));

        let dec = ReportPeriod::monthly(2024, 12).unwrap();
        assert_eq!(dec.end_date(), date(2024, 12, 31));
    }

    #[test]
    fn test_month_of() {
        let period = ReportPeriod::month_of(date(2025, 4, 17));
        assert_eq!(period, ReportPeriod::monthly(2025, 4).unwrap());
    }

    #[test]
    fn test_contains() {
        let jan = ReportPeriod::monthly(2025, 1).unwrap();
        assert!(jan.contains(date(2025, 1, 31)));
        assert!(!jan.contains(date(2025, 2, 1)));
    }

    #[test]
    fn test_parse() {
        assert_eq!(
            ReportPeriod::parse("2025-01").unwrap(),
            ReportPeriod::monthly(2025, 1).unwrap()
        );

        let range = ReportPeriod::parse("2025-01-05..2025-01-20").unwrap();
        assert_eq!(range.start_date(), date(2025, 1, 5));
        assert_eq!(range.end_date(), date(2025, 1, 20));
        assert!(!range.is_monthly());

        assert_eq!(
            ReportPeriod::parse("2025-13"),
            Err(PeriodParseError::InvalidMonth(13))
        );
        assert!(ReportPeriod::parse("January").is_err());
        assert!(ReportPeriod::parse("2025-02-01..2025-01-01").is_err());
    }

    #[test]
    fn test_display() {
        assert_eq!(ReportPeriod::monthly(2025, 1).unwrap().to_string(), "2025-01");
        assert_eq!(
            ReportPeriod::parse("2025-01-05..2025-01-20").unwrap().to_string(),
            "2025-01-05..2025-01-20"
        );
    }
}
