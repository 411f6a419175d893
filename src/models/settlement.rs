//! Settlement between the two parties
//!
//! Personal spending never enters the settlement; only what party A fronted
//! for shared expenses against what A owes for them.

use serde::{Deserialize, Serialize};

use super::money::Money;
use super::payment::Party;
use super::summary::PaymentSummary;

/// The single transfer that evens out shared spending
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settlement {
    /// Party that pays
    pub from: Party,
    /// Party that receives
    pub to: Party,
    /// Non-negative transfer amount
    pub amount: Money,
}

impl Settlement {
    /// Derive the settlement from aggregate totals
    ///
    /// `diff = total_paid_a - total_owed_a`. A non-negative diff means B pays
    /// A; a negative one means A pays B the absolute value.
    pub fn from_summary(summary: &PaymentSummary) -> Self {
        let diff = summary.total_paid_a - summary.total_owed_a;
        let from = if diff.is_negative() { Party::A } else { Party::B };
        Self {
            from,
            to: from.other(),
            amount: diff.abs(),
        }
    }

    /// Nothing needs to change hands
    pub fn is_settled(&self) -> bool {
        self.amount.is_zero()
    }
}

/// Compute the settlement for a summary
pub fn settle(summary: &PaymentSummary) -> Settlement {
    Settlement::from_summary(summary)
}
