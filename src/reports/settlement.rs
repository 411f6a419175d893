//! Settlement Report
//!
//! Classifies nothing itself: takes classified payments, folds them into a
//! `PaymentSummary`, derives the `Settlement`, and renders the result for
//! the terminal or as a sheet-shaped CSV / JSON / YAML document.

use std::io::Write;

use csv::WriterBuilder;
use serde::Serialize;
use tracing::info;

use super::rows::{format_rows_table, PaymentRow};
use crate::config::Settings;
use crate::display::{double_separator, format_amount, separator};
use crate::error::{SplitError, SplitResult};
use crate::models::{ClassifiedPayment, Money, Party, PaymentSummary, ReportPeriod, Settlement};

const WIDTH: usize = 60;

/// Summary, settlement and entry rows for one reporting run
#[derive(Debug, Clone, Serialize)]
pub struct SettlementReport {
    /// `YYYY-MM` or an explicit range; used as the sheet name
    pub period: String,
    pub party_a_name: String,
    pub party_b_name: String,
    #[serde(skip)]
    settings: Settings,
    pub summary: PaymentSummary,
    pub settlement: Settlement,
    pub rows: Vec<PaymentRow>,
}

impl SettlementReport {
    /// Build the report for a run
    ///
    /// Without an explicit period the label comes from the first payment.
    pub fn generate(
        payments: &[ClassifiedPayment],
        settings: &Settings,
        period: Option<&ReportPeriod>,
    ) -> Self {
        let summary = PaymentSummary::from_payments(payments);
        let settlement = Settlement::from_summary(&summary);

        let period = period
            .map(|p| p.to_string())
            .or_else(|| payments.first().map(|p| p.period_label()))
            .unwrap_or_default();

        info!(
            %period,
            entries = summary.entry_count,
            total_paid = %summary.total_paid(),
            paid_a = %summary.total_paid_a,
            paid_b = %summary.total_paid_b,
            owed_a = %summary.total_owed_a,
            owed_b = %summary.total_owed_b,
            "generated settlement report"
        );

        Self {
            period,
            party_a_name: settings.party_a_name.clone(),
            party_b_name: settings.party_b_name.clone(),
            settings: settings.clone(),
            summary,
            settlement,
            rows: payments.iter().map(PaymentRow::from).collect(),
        }
    }

    fn party_name(&self, party: Party) -> &str {
        self.settings.party_name(party)
    }

    fn money(&self, amount: Money) -> String {
        format_amount(amount, &self.settings.currency_symbol)
    }

    /// One-line description of the settlement
    pub fn settlement_line(&self) -> String {
        if self.settlement.is_settled() {
            "Settled: nothing to transfer".to_string()
        } else {
            format!(
                "{} pays {} {}",
                self.party_name(self.settlement.from),
                self.party_name(self.settlement.to),
                self.money(self.settlement.amount)
            )
        }
    }

    /// Format the report for terminal display
    pub fn format_terminal(&self) -> String {
        let s = &self.summary;
        let mut output = String::new();

        output.push_str(&format!("Settlement Report: {}\n", self.period));
        output.push_str(&double_separator(WIDTH));
        output.push('\n');
        output.push_str(&format!("Entries: {}\n\n", s.entry_count));

        output.push_str("PAID\n");
        for party in Party::ALL {
            let label = format!("{} paid", self.party_name(party));
            output.push_str(&self.line(&label, s.total_paid_by(party)));
        }
        output.push_str(&self.line("Total", s.total_paid()));
        output.push('\n');

        output.push_str("OWED\n");
        for party in Party::ALL {
            let label = format!("{} owed", self.party_name(party));
            output.push_str(&self.line(&label, s.total_owed_by(party)));
        }
        output.push('\n');

        output.push_str(&separator(WIDTH));
        output.push('\n');
        output.push_str(&format!("{}\n", self.settlement_line()));
        output.push_str(&separator(WIDTH));
        output.push_str("\n\n");

        output.push_str("SHARED BY CATEGORY\n");
        if s.category_total.is_empty() {
            output.push_str("  (none)\n");
        }
        for (category, total) in &s.category_total {
            output.push_str(&self.line(category, *total));
        }

        for party in Party::ALL {
            output.push_str(&format!(
                "\nPERSONAL: {}\n",
                self.party_name(party).to_uppercase()
            ));
            for (category, total) in s.self_category_total(party) {
                output.push_str(&self.line(category, *total));
            }
            output.push_str(&self.line("Total", s.total_self_paid(party)));
        }

        output
    }

    fn line(&self, label: &str, amount: Money) -> String {
        format!("  {:<36} {:>18}\n", label, self.money(amount))
    }

    /// Format the per-entry table
    pub fn format_entries_table(&self) -> String {
        format_rows_table(&self.rows)
    }

    /// Export the report as a sheet-shaped CSV
    ///
    /// Summary sections come first, then the entry header and one line per
    /// entry. Amounts are plain integers.
    pub fn export_csv<W: Write>(&self, writer: W) -> SplitResult<()> {
        let s = &self.summary;
        let mut out = WriterBuilder::new().flexible(true).from_writer(writer);

        let mut rows: Vec<Vec<String>> = Vec::new();
        let pair = |label: String, amount: Money| vec![label, amount.to_string()];

        rows.push(vec![format!("# Paid ({})", self.period)]);
        for party in Party::ALL {
            rows.push(pair(format!("{} paid", self.party_name(party)), s.total_paid_by(party)));
        }
        rows.push(pair("Total".to_string(), s.total_paid()));
        rows.push(vec![String::new()]);

        rows.push(vec!["# Owed".to_string()]);
        for party in Party::ALL {
            rows.push(pair(format!("{} owed", self.party_name(party)), s.total_owed_by(party)));
        }
        rows.push(pair(
            format!(
                "Settlement ({} -> {})",
                self.party_name(self.settlement.from),
                self.party_name(self.settlement.to)
            ),
            self.settlement.amount,
        ));
        rows.push(vec![String::new()]);

        rows.push(vec!["# Shared by category".to_string()]);
        for (category, total) in &s.category_total {
            rows.push(pair(category.clone(), *total));
        }
        rows.push(vec![String::new()]);

        rows.push(vec!["# Personal".to_string()]);
        for party in Party::ALL {
            rows.push(pair(
                format!("{} personal total", self.party_name(party)),
                s.total_self_paid(party),
            ));
            for (category, total) in s.self_category_total(party) {
                rows.push(pair(category.clone(), *total));
            }
            rows.push(vec![String::new()]);
        }

        rows.push(vec!["# Entries".to_string()]);
        rows.push(PaymentRow::header(&self.party_a_name, &self.party_b_name));
        rows.extend(self.rows.iter().map(PaymentRow::to_record));

        for row in rows {
            out.write_record(&row)
                .map_err(|e| SplitError::Export(e.to_string()))?;
        }
        out.flush().map_err(|e| SplitError::Export(e.to_string()))?;
        Ok(())
    }

    /// Export the report as JSON
    pub fn export_json<W: Write>(&self, writer: W, pretty: bool) -> SplitResult<()> {
        let result = if pretty {
            serde_json::to_writer_pretty(writer, self)
        } else {
            serde_json::to_writer(writer, self)
        };
        result.map_err(|e| SplitError::Export(e.to_string()))
    }

    /// Export the report as YAML
    pub fn export_yaml<W: Write>(&self, writer: W) -> SplitResult<()> {
        serde_yaml::to_writer(writer, self).map_err(|e| SplitError::Export(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::RawEntry;
    use crate::services::Classifier;
    use chrono::NaiveDate;

    fn payments() -> Vec<ClassifiedPayment> {
        let classifier = Classifier::default();
        [
            ("Food_A", 1000, ""),
            ("Food_B", 999, ""),
            ("Personal_Food_A", 2000, ""),
            ("Daily", 100, ""),
            ("Travel_A", 5000, "dp"),
        ]
        .iter()
        .enumerate()
        .map(|(i, (category, price, comment))| {
            let entry = RawEntry::new(
                NaiveDate::from_ymd_opt(2025, 1, 10 + i as u32).unwrap(),
                *category,
                Money::from_units(*price),
            )
            .with_comment(*comment);
            classifier.classify(&entry).unwrap()
        })
        .collect()
    }

    fn report() -> SettlementReport {
        SettlementReport::generate(&payments(), &Settings::default(), None)
    }

    #[test]
    fn test_generate() {
        let report = report();
        assert_eq!(report.period, "2025-01");
        assert_eq!(report.rows.len(), 5);

        // A paid 1000 + 50 + 5000, owes 500 + 500 + 50
        assert_eq!(report.summary.total_paid_a.units(), 6050);
        assert_eq!(report.summary.total_owed_a.units(), 1050);
        assert_eq!(report.settlement.from, Party::B);
        assert_eq!(report.settlement.amount.units(), 5000);
    }

    #[test]
    fn test_explicit_period_label() {
        let period = ReportPeriod::parse("2025-01-01..2025-01-15").unwrap();
        let report = SettlementReport::generate(&payments(), &Settings::default(), Some(&period));
        assert_eq!(report.period, "2025-01-01..2025-01-15");
    }

    #[test]
    fn test_empty_run() {
        let report = SettlementReport::generate(&[], &Settings::default(), None);
        assert_eq!(report.period, "");
        assert!(report.settlement.is_settled());
        assert!(report.format_terminal().contains("Settled: nothing to transfer"));
    }

    #[test]
    fn test_format_terminal() {
        let mut settings = Settings::default();
        settings.party_a_name = "Alex".into();
        settings.party_b_name = "Sam".into();
        let report = SettlementReport::generate(&payments(), &settings, None);

        let output = report.format_terminal();
        assert!(output.contains("Settlement Report: 2025-01"));
        assert!(output.contains("Sam pays Alex ¥5,000"));
        assert!(output.contains("PERSONAL: ALEX"));
        assert!(output.contains("Travel"));
    }

    #[test]
    fn test_export_csv() {
        let mut buffer = Vec::new();
        report().export_csv(&mut buffer).unwrap();
        let csv = String::from_utf8(buffer).unwrap();

        assert!(csv.contains("A paid,6050"));
        assert!(csv.contains("B paid,1049"));
        assert!(csv.contains("Settlement (B -> A),5000"));
        assert!(csv.contains("Food,1999"));
        assert!(csv.contains("A personal total,2000"));
        assert!(csv.contains("Date,Category,Genre,Name,Comment,Place,Price,A paid,B paid"));
        assert!(csv.contains("2025-01-14,Travel_A,,,dp,,5000,5000,0,0,0,0,0"));
    }

    #[test]
    fn test_export_json() {
        let mut buffer = Vec::new();
        report().export_json(&mut buffer, false).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&buffer).unwrap();

        assert_eq!(value["period"], "2025-01");
        assert_eq!(value["settlement"]["from"], "b");
        assert_eq!(value["settlement"]["amount"], 5000);
        assert_eq!(value["summary"]["category_total"]["Food"], 1999);
        assert_eq!(value["rows"].as_array().unwrap().len(), 5);
        assert!(value.get("currency_symbol").is_none());
    }

    #[test]
    fn test_export_yaml() {
        let mut buffer = Vec::new();
        report().export_yaml(&mut buffer).unwrap();
        let yaml = String::from_utf8(buffer).unwrap();
        assert!(yaml.contains("2025-01"));
        assert!(yaml.contains("total_paid_a: 6050"));
    }
}
