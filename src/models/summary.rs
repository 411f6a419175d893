//! Payment summary accumulator
//!
//! Folds classified payments into per-category and per-party running
//! totals. Every field is a sum, so folding order never changes the result
//! and partial summaries over disjoint payments can be merged.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::money::Money;
use super::payment::{ClassifiedPayment, Party};

/// Running totals for one reporting run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentSummary {
    /// Shared spend per normalized category
    pub category_total: BTreeMap<String, Money>,

    /// Party A's personal spend per normalized category
    pub party_a_category_total: BTreeMap<String, Money>,

    /// Party B's personal spend per normalized category
    pub party_b_category_total: BTreeMap<String, Money>,

    pub total_paid_a: Money,
    pub total_paid_b: Money,
    pub total_owed_a: Money,
    pub total_owed_b: Money,
    pub total_self_paid_a: Money,
    pub total_self_paid_b: Money,

    /// Number of payments folded in
    pub entry_count: usize,
}

impl PaymentSummary {
    /// Create an empty summary
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a summary from a sequence of payments
    pub fn from_payments<'a, I>(payments: I) -> Self
    where
        I: IntoIterator<Item = &'a ClassifiedPayment>,
    {
        let mut summary = Self::new();
        for payment in payments {
            summary.append(payment);
        }
        summary
    }

    /// Fold one payment into the totals
    ///
    /// A personal record touches both parties' category maps, so the
    /// non-payer's breakdown still lists the category at zero.
    pub fn append(&mut self, payment: &ClassifiedPayment) {
        let category = payment.normalized_category.as_str();

        for party in Party::ALL {
            if payment.is_self {
                let amount = payment.self_paid_by(party);
                add_to(self.self_category_total_mut(party), category, amount);
                *self.total_self_paid_mut(party) += amount;
            } else {
                *self.total_paid_mut(party) += payment.paid_by(party);
                *self.total_owed_mut(party) += payment.owed_by(party);
            }
        }
        if !payment.is_self {
            add_to(&mut self.category_total, category, payment.price);
        }

        self.entry_count += 1;
    }

    /// Merge another summary into this one
    pub fn merge(&mut self, other: &PaymentSummary) {
        merge_into(&mut self.category_total, &other.category_total);
        merge_into(&mut self.party_a_category_total, &other.party_a_category_total);
        merge_into(&mut self.party_b_category_total, &other.party_b_category_total);

        self.total_paid_a += other.total_paid_a;
        self.total_paid_b += other.total_paid_b;
        self.total_owed_a += other.total_owed_a;
        self.total_owed_b += other.total_owed_b;
        self.total_self_paid_a += other.total_self_paid_a;
        self.total_self_paid_b += other.total_self_paid_b;
        self.entry_count += other.entry_count;
    }

    /// Total fronted by both parties for shared expenses
    pub fn total_paid(&self) -> Money {
        self.total_paid_a + self.total_paid_b
    }

    /// Total shared spend across categories
    pub fn total_shared(&self) -> Money {
        self.category_total.values().copied().sum()
    }

    /// Personal spend per category for a party
    pub fn self_category_total(&self, party: Party) -> &BTreeMap<String, Money> {
        match party {
            Party::A => &self.party_a_category_total,
            Party::B => &self.party_b_category_total,
        }
    }

    /// Personal spend total for a party
    pub fn total_self_paid(&self, party: Party) -> Money {
        match party {
            Party::A => self.total_self_paid_a,
            Party::B => self.total_self_paid_b,
        }
    }

    /// Amount a party fronted for shared expenses
    pub fn total_paid_by(&self, party: Party) -> Money {
        match party {
            Party::A => self.total_paid_a,
            Party::B => self.total_paid_b,
        }
    }

    /// Share of shared expenses a party owes
    pub fn total_owed_by(&self, party: Party) -> Money {
        match party {
            Party::A => self.total_owed_a,
            Party::B => self.total_owed_b,
        }
    }

    fn self_category_total_mut(&mut self, party: Party) -> &mut BTreeMap<String, Money> {
        match party {
            Party::A => &mut self.party_a_category_total,
            Party::B => &mut self.party_b_category_total,
        }
    }

    fn total_paid_mut(&mut self, party: Party) -> &mut Money {
        match party {
            Party::A => &mut self.total_paid_a,
            Party::B => &mut self.total_paid_b,
        }
    }

    fn total_owed_mut(&mut self, party: Party) -> &mut Money {
        match party {
            Party::A => &mut self.total_owed_a,
            Party::B => &mut self.total_owed_b,
        }
    }

    fn total_self_paid_mut(&mut self, party: Party) -> &mut Money {
        match party {
            Party::A => &mut self.total_self_paid_a,
            Party::B => &mut self.total_self_paid_b,
        }
    }
}

fn add_to(map: &mut BTreeMap<String, Money>, category: &str, amount: Money) {
    *map.entry(category.to_string()).or_insert_with(Money::zero) += amount;
}

fn merge_into(target: &mut BTreeMap<String, Money>, source: &BTreeMap<String, Money>) {
    for (category, amount) in source {
        add_to(target, category, *amount);
    }
}
