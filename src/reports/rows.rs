//! Per-transaction report rows
//!
//! One row per classified payment, in the column order downstream tables
//! expect.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tabled::settings::Style;
use tabled::{Table, Tabled};

use crate::display::{first_line, truncate};
use crate::models::{ClassifiedPayment, Money};

/// One flat row of the entry listing
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentRow {
    pub date: NaiveDate,
    pub category: String,
    pub genre: String,
    pub name: String,
    pub comment: String,
    pub place: String,
    pub price: Money,
    pub paid_a: Money,
    pub paid_b: Money,
    pub owed_a: Money,
    pub owed_b: Money,
    pub self_paid_a: Money,
    pub self_paid_b: Money,
}

impl From<&ClassifiedPayment> for PaymentRow {
    fn from(p: &ClassifiedPayment) -> Self {
        Self {
            date: p.date,
            category: p.category.clone(),
            genre: p.genre.clone(),
            name: p.name.clone(),
            comment: p.comment.clone(),
            place: p.place.clone(),
            price: p.price,
            paid_a: p.paid_a,
            paid_b: p.paid_b,
            owed_a: p.owed_a,
            owed_b: p.owed_b,
            self_paid_a: p.self_paid_a,
            self_paid_b: p.self_paid_b,
        }
    }
}

impl PaymentRow {
    /// Column headers, with party display names filled in
    pub fn header(party_a: &str, party_b: &str) -> Vec<String> {
        vec![
            "Date".to_string(),
            "Category".to_string(),
            "Genre".to_string(),
            "Name".to_string(),
            "Comment".to_string(),
            "Place".to_string(),
            "Price".to_string(),
            format!("{} paid", party_a),
            format!("{} paid", party_b),
            format!("{} owed", party_a),
            format!("{} owed", party_b),
            format!("{} personal", party_a),
            format!("{} personal", party_b),
        ]
    }

    /// Row values in header order
    pub fn to_record(&self) -> Vec<String> {
        vec![
            self.date.format("%Y-%m-%d").to_string(),
            self.category.clone(),
            self.genre.clone(),
            self.name.clone(),
            self.comment.clone(),
            self.place.clone(),
            self.price.to_string(),
            self.paid_a.to_string(),
            self.paid_b.to_string(),
            self.owed_a.to_string(),
            self.owed_b.to_string(),
            self.self_paid_a.to_string(),
            self.self_paid_b.to_string(),
        ]
    }
}

#[derive(Tabled)]
struct EntryLine {
    #[tabled(rename = "Date")]
    date: String,
    #[tabled(rename = "Category")]
    category: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Comment")]
    comment: String,
    #[tabled(rename = "Price")]
    price: Money,
    #[tabled(rename = "Paid A")]
    paid_a: Money,
    #[tabled(rename = "Paid B")]
    paid_b: Money,
    #[tabled(rename = "Owed A")]
    owed_a: Money,
    #[tabled(rename = "Owed B")]
    owed_b: Money,
    #[tabled(rename = "Self A")]
    self_paid_a: Money,
    #[tabled(rename = "Self B")]
    self_paid_b: Money,
}

/// Render rows as a terminal table
pub fn format_rows_table(rows: &[PaymentRow]) -> String {
    if rows.is_empty() {
        return "No entries found.\n".to_string();
    }

    let lines = rows.iter().map(|row| EntryLine {
        date: row.date.format("%Y-%m-%d").to_string(),
        category: truncate(&row.category, 24),
        name: truncate(&row.name, 24),
        comment: truncate(first_line(&row.comment), 16),
        price: row.price,
        paid_a: row.paid_a,
        paid_b: row.paid_b,
        owed_a: row.owed_a,
        owed_b: row.owed_b,
        self_paid_a: row.self_paid_a,
        self_paid_b: row.self_paid_b,
    });

    let mut table = Table::new(lines);
    table.with(Style::psql());
    format!("{}\n", table)
}
