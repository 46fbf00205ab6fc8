//! Shared types for the expense splitter.
//!
//! These types form the data model used across all modules. Every value
//! here is built fresh from form input for a single computation and
//! dropped once the result has been rendered.

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use std::fmt;

// ---------------------------------------------------------------------------
// Money helpers
// ---------------------------------------------------------------------------

/// Decimal places used when a value is shown to a person.
pub const DEFAULT_DISPLAY_DECIMALS: u32 = 2;

/// Round a monetary value for presentation (half away from zero).
///
/// Only call this at the display boundary; arithmetic stays at full precision.
pub fn round_money(value: Decimal, decimals: u32) -> Decimal {
    value.round_dp_with_strategy(decimals, RoundingStrategy::MidpointAwayFromZero)
}

// ---------------------------------------------------------------------------
// Participant
// ---------------------------------------------------------------------------

/// One person taking part in a split, with what they actually paid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Participant {
    pub name: String,
    pub paid: Decimal,
}

impl Participant {
    pub fn new(name: impl Into<String>, paid: Decimal) -> Self {
        Self {
            name: name.into(),
            paid,
        }
    }
}

impl fmt::Display for Participant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} (paid {:.2})",
            self.name,
            round_money(self.paid, DEFAULT_DISPLAY_DECIMALS)
        )
    }
}

// ---------------------------------------------------------------------------
// Balance
// ---------------------------------------------------------------------------

/// Where a participant stands against the fair share.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BalanceStatus {
    /// Paid more than the fair share; is owed money.
    Overpaid,
    /// Paid less than the fair share; owes money.
    Underpaid,
    /// Within tolerance of the fair share.
    Settled,
}

impl BalanceStatus {
    /// Classify a raw balance with the given tolerance.
    pub fn classify(amount: Decimal, epsilon: Decimal) -> Self {
        if amount > epsilon {
            BalanceStatus::Overpaid
        } else if amount < -epsilon {
            BalanceStatus::Underpaid
        } else {
            BalanceStatus::Settled
        }
    }
}

impl fmt::Display for BalanceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BalanceStatus::Overpaid => write!(f, "overpaid"),
            BalanceStatus::Underpaid => write!(f, "underpaid"),
            BalanceStatus::Settled => write!(f, "settled"),
        }
    }
}

/// A participant's contribution measured against the fair share.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Balance {
    pub name: String,
    pub paid: Decimal,
    /// `paid - fair_share`. Positive means the participant is owed money.
    pub amount: Decimal,
    pub status: BalanceStatus,
}

impl Balance {
    /// Amount this participant still has to pay (zero unless underpaid).
    pub fn owed(&self) -> Decimal {
        if self.status == BalanceStatus::Underpaid {
            -self.amount
        } else {
            Decimal::ZERO
        }
    }

    /// Amount this participant should get back (zero unless overpaid).
    pub fn receivable(&self) -> Decimal {
        if self.status == BalanceStatus::Overpaid {
            self.amount
        } else {
            Decimal::ZERO
        }
    }
}

impl fmt::Display for Balance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let shown = round_money(self.amount, DEFAULT_DISPLAY_DECIMALS);
        let sign = if shown > Decimal::ZERO { "+" } else { "" };
        write!(f, "{}: {sign}{shown:.2} ({})", self.name, self.status)
    }
}

// ---------------------------------------------------------------------------
// Transaction
// ---------------------------------------------------------------------------

/// A single transfer that moves money from a debtor to a creditor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    pub payer: String,
    pub payee: String,
    /// Always strictly positive, kept at full precision.
    pub amount: Decimal,
}

impl Transaction {
    pub fn new(payer: impl Into<String>, payee: impl Into<String>, amount: Decimal) -> Self {
        Self {
            payer: payer.into(),
            payee: payee.into(),
            amount,
        }
    }
}

impl fmt::Display for Transaction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} pays {} {:.2}",
            self.payer,
            self.payee,
            round_money(self.amount, DEFAULT_DISPLAY_DECIMALS)
        )
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
