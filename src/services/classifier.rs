//! Payment classifier
//!
//! Turns a `RawEntry` into a `ClassifiedPayment`: decides who paid, whether
//! the cost is personal or shared, and fills in paid / owed amounts. Pure,
//! no I/O.

use tracing::trace;

use crate::error::{SplitError, SplitResult};
use crate::models::{ClassifiedPayment, CommentDirective, MarkerSet, Payer, RawEntry};

/// Ownership classes a category can fall into
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CategoryClass {
    SelfPartyA,
    SelfPartyB,
    /// Personal expense with no payer marker; cannot be attributed
    SelfUnknown,
    SharedPartyA,
    SharedPartyB,
    SharedUnknown,
}

impl CategoryClass {
    pub fn is_self(self) -> bool {
        matches!(self, Self::SelfPartyA | Self::SelfPartyB | Self::SelfUnknown)
    }

    pub fn payer(self) -> Payer {
        match self {
            Self::SelfPartyA | Self::SharedPartyA => Payer::PartyA,
            Self::SelfPartyB | Self::SharedPartyB => Payer::PartyB,
            Self::SelfUnknown | Self::SharedUnknown => Payer::Unknown,
        }
    }
}

/// Classify a category string, returning its class and normalized form
///
/// When both party markers are present, party A wins.
pub fn classify_category(category: &str, markers: &MarkerSet) -> (CategoryClass, String) {
    let tags = markers.tag_category(category);

    let class = match (tags.is_self, tags.party_a, tags.party_b) {
        (true, true, _) => CategoryClass::SelfPartyA,
        (true, false, true) => CategoryClass::SelfPartyB,
        (true, false, false) => CategoryClass::SelfUnknown,
        (false, true, _) => CategoryClass::SharedPartyA,
        (false, false, true) => CategoryClass::SharedPartyB,
        (false, false, false) => CategoryClass::SharedUnknown,
    };

    (class, tags.normalized)
}

/// Classifies raw entries against a marker set
#[derive(Debug, Clone, Default)]
pub struct Classifier {
    markers: MarkerSet,
}

impl Classifier {
    /// Create a classifier for the given markers
    pub fn new(markers: MarkerSet) -> Self {
        Self { markers }
    }

    /// Classify one entry
    ///
    /// # Errors
    ///
    /// Returns `SplitError::Classification` for a personal expense whose
    /// category names no payer.
    pub fn classify(&self, entry: &RawEntry) -> SplitResult<ClassifiedPayment> {
        let (class, normalized) = classify_category(&entry.category, &self.markers);
        let mut payment = ClassifiedPayment::from_entry(entry, normalized);
        let price = entry.amount;

        payment.payer = class.payer();
        payment.is_self = class.is_self();
        payment.directive = self.markers.comment_directive(&entry.comment);

        match class {
            CategoryClass::SelfPartyA => payment.self_paid_a = price,
            CategoryClass::SelfPartyB => payment.self_paid_b = price,
            CategoryClass::SelfUnknown => {
                return Err(SplitError::Classification {
                    category: entry.category.clone(),
                    reason: "personal expense without a payer marker".to_string(),
                });
            }
            CategoryClass::SharedPartyA => payment.paid_a = price,
            CategoryClass::SharedPartyB => payment.paid_b = price,
            CategoryClass::SharedUnknown => {
                let (a_share, b_share) = price.split_even();
                payment.paid_a = a_share;
                payment.paid_b = b_share;
            }
        }

        if !payment.is_self && payment.directive != CommentDirective::Deferred {
            let (a_share, b_share) = price.split_even();
            payment.owed_a = a_share;
            payment.owed_b = b_share;
        }

        trace!(
            date = %payment.date,
            category = %payment.category,
            class = ?class,
            directive = ?payment.directive,
            price = %payment.price,
            "classified entry"
        );

        Ok(payment)
    }

    /// Classify entries in order, stopping at the first failure
    pub fn classify_all(&self, entries: &[RawEntry]) -> SplitResult<Vec<ClassifiedPayment>> {
        entries.iter().map(|entry| self.classify(entry)).collect()
    }
}
