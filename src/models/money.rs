//! Money type for representing currency amounts
//!
//! Amounts are stored as whole units of the smallest currency denomination
//! (i64), so every split is exact integer arithmetic.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, AddAssign, Neg, Sub, SubAssign};

/// A monetary amount in the smallest currency unit (e.g. yen, cents)
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Money(i64);

impl Money {
    /// Create a Money amount from smallest-unit integers
    ///
    /// # Examples
    /// ```
    /// use splitbook::models::Money;
    /// let amount = Money::from_units(1050);
    /// assert_eq!(amount.units(), 1050);
    /// ```
    pub const fn from_units(units: i64) -> Self {
        Self(units)
    }

    /// Create a zero Money amount
    pub const fn zero() -> Self {
        Self(0)
    }

    /// Get the amount in smallest units
    pub const fn units(&self) -> i64 {
        self.0
    }

    /// Check if the amount is zero
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Check if the amount is negative
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Get the absolute value
    pub const fn abs(&self) -> Self {
        Self(self.0.abs())
    }

    /// Split evenly between two parties, returning `(a_share, b_share)`
    ///
    /// Party B receives the floor of half; party A receives the rest, so an
    /// odd remainder always lands on A.
    ///
    /// ```
    /// use splitbook::models::Money;
    /// let (a, b) = Money::from_units(999).split_even();
    /// assert_eq!((a.units(), b.units()), (500, 499));
    /// ```
    pub const fn split_even(&self) -> (Self, Self) {
        let b_share = self.0 / 2;
        (Self(self.0 - b_share), Self(b_share))
    }

    /// Parse an integer amount from a string
    ///
    /// Accepts surrounding whitespace, a leading sign, and `,` thousands
    /// separators ("1,200", "-300", " 42 "). A comma must separate groups
    /// of exactly three digits. Fractions are rejected.
    pub fn parse(s: &str) -> Result<Self, MoneyParseError> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(MoneyParseError::Empty);
        }
        let invalid = || MoneyParseError::InvalidFormat(trimmed.to_string());

        let (sign, digits) = match trimmed.strip_prefix(|c| c == '-' || c == '+') {
            Some(rest) => (&trimmed[..1], rest),
            None => ("", trimmed),
        };

        let mut groups = digits.split(',');
        let lead = groups.next().unwrap_or("");
        let mut cleaned = format!("{}{}", sign, lead);
        let mut grouped = false;
        for group in groups {
            if group.len() != 3 {
                return Err(invalid());
            }
            cleaned.push_str(group);
            grouped = true;
        }
        if grouped && !(1..=3).contains(&lead.len()) {
            return Err(invalid());
        }
        if !digits.bytes().all(|b| b.is_ascii_digit() || b == b',') {
            return Err(invalid());
        }

        cleaned.parse::<i64>().map(Self).map_err(|_| invalid())
    }

    /// Format with a currency symbol and thousands grouping
    pub fn format_with_symbol(&self, symbol: &str) -> String {
        let sign = if self.is_negative() { "-" } else { "" };
        format!("{}{}{}", sign, symbol, group_thousands(self.0.unsigned_abs()))
    }
}

fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Add for Money {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self(self.0 + other.0)
    }
}

impl AddAssign for Money {
    fn add_assign(&mut self, other: Self) {
        self.0 += other.0;
    }
}

impl Sub for Money {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        Self(self.0 - other.0)
    }
}

impl SubAssign for Money {
    fn sub_assign(&mut self, other: Self) {
        self.0 -= other.0;
    }
}

impl Neg for Money {
    type Output = Self;

    fn neg(self) -> Self {
        Self(-self.0)
    }
}

impl std::iter::Sum for Money {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Money::zero(), |acc, m| acc + m)
    }
}

/// Error type for money parsing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MoneyParseError {
    Empty,
    InvalidFormat(String),
}

impl fmt::Display for MoneyParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MoneyParseError::Empty => write!(f, "empty amount"),
            MoneyParseError::InvalidFormat(s) => write!(f, "invalid amount '{}'", s),
        }
    }
}

impl std::error::Error for MoneyParseError {}
