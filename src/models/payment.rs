//! Classified payment model
//!
//! A `ClassifiedPayment` is a `RawEntry` after the classifier has decided who
//! fronted the money, whether the cost is shared, and each party's paid and
//! owed amounts.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::entry::RawEntry;
use super::money::Money;

/// One of the two parties sharing expenses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Party {
    A,
    B,
}

impl Party {
    pub const ALL: [Party; 2] = [Party::A, Party::B];

    /// The other party
    pub fn other(self) -> Self {
        match self {
            Self::A => Self::B,
            Self::B => Self::A,
        }
    }
}

impl fmt::Display for Party {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::A => write!(f, "A"),
            Self::B => write!(f, "B"),
        }
    }
}

/// Who fronted the money for a payment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Payer {
    #[default]
    Unknown,
    PartyA,
    PartyB,
}

impl Payer {
    /// The paying party, if known
    pub fn party(self) -> Option<Party> {
        match self {
            Self::Unknown => None,
            Self::PartyA => Some(Party::A),
            Self::PartyB => Some(Party::B),
        }
    }
}

impl From<Party> for Payer {
    fn from(party: Party) -> Self {
        match party {
            Party::A => Self::PartyA,
            Party::B => Self::PartyB,
        }
    }
}

/// Directive carried by the first line of a comment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CommentDirective {
    #[default]
    None,
    /// Already settled outside the shared pool; owes nothing
    Deferred,
    /// Paid with an employee or corporate ID; recorded only
    PaidById,
}

/// A payment with its split amounts decided
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassifiedPayment {
    pub date: NaiveDate,

    /// Category as it arrived, markers included
    pub category: String,

    /// Category with every marker token removed
    pub normalized_category: String,

    pub genre: String,
    pub name: String,
    pub place: String,
    pub comment: String,
    pub price: Money,

    pub payer: Payer,

    /// Personal expense, excluded from settlement
    pub is_self: bool,

    pub directive: CommentDirective,

    /// Fronted for shared expenses
    pub paid_a: Money,
    pub paid_b: Money,

    /// Spent on personal expenses
    pub self_paid_a: Money,
    pub self_paid_b: Money,

    /// Fair share of shared expenses
    pub owed_a: Money,
    pub owed_b: Money,
}

impl ClassifiedPayment {
    /// Start a payment from its source entry with every amount at zero
    pub(crate) fn from_entry(entry: &RawEntry, normalized_category: String) -> Self {
        Self {
            date: entry.date,
            category: entry.category.clone(),
            normalized_category,
            genre: entry.genre.clone(),
            name: entry.name.clone(),
            place: entry.place.clone(),
            comment: entry.comment.clone(),
            price: entry.amount,
            payer: Payer::Unknown,
            is_self: false,
            directive: CommentDirective::None,
            paid_a: Money::zero(),
            paid_b: Money::zero(),
            self_paid_a: Money::zero(),
            self_paid_b: Money::zero(),
            owed_a: Money::zero(),
            owed_b: Money::zero(),
        }
    }

    /// Whether this payment is excluded from the owed split
    pub fn is_deferred(&self) -> bool {
        self.directive == CommentDirective::Deferred
    }

    /// Amount the given party fronted for shared expenses
    pub fn paid_by(&self, party: Party) -> Money {
        match party {
            Party::A => self.paid_a,
            Party::B => self.paid_b,
        }
    }

    /// Amount the given party spent on itself
    pub fn self_paid_by(&self, party: Party) -> Money {
        match party {
            Party::A => self.self_paid_a,
            Party::B => self.self_paid_b,
        }
    }

    /// Share of the cost the given party owes
    pub fn owed_by(&self, party: Party) -> Money {
        match party {
            Party::A => self.owed_a,
            Party::B => self.owed_b,
        }
    }

    /// Month of the payment as `YYYY-MM`
    pub fn period_label(&self) -> String {
        self.date.format("%Y-%m").to_string()
    }
}
