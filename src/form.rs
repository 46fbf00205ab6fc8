//! Form layer — turns raw text input into a typed, validated split.
//!
//! Everything the calculator must never see is handled here: blank names
//! fall back to `Person N`, numeric text is parsed into decimals, and bad
//! input becomes a [`FormError`] whose message can be shown to a person
//! as-is.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::str::FromStr;
use thiserror::Error;

use crate::types::Participant;

/// Upper bound on the number of people in one split.
pub const MAX_PARTICIPANTS: i64 = 1_000;

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// User-facing validation failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormError {
    #[error("{field} must be a number, got \"{value}\"")]
    InvalidNumber { field: String, value: String },

    #[error("Total amount must be greater than 0.")]
    NonPositiveTotal,

    #[error("Number of people must be at least 1.")]
    NoParticipants,

    #[error("Number of people must be at most {max}, got {count}.")]
    TooManyParticipants { count: i64, max: i64 },

    #[error("{rows} contribution rows given for {people} people.")]
    TooManyRows { rows: usize, people: i64 },

    #[error("Amount paid by {name} cannot be negative.")]
    NegativeAmount { name: String },

    #[error("Name \"{0}\" is used more than once.")]
    DuplicateName(String),

    #[error("Amounts are too large to add up.")]
    AmountOutOfRange,
}

// ---------------------------------------------------------------------------
// Raw input
// ---------------------------------------------------------------------------

/// One row of the "who paid what" table, exactly as typed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContributionRow {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub paid: Option<String>,
}

impl ContributionRow {
    pub fn new(name: &str, paid: &str) -> Self {
        Self {
            name: Some(name.to_string()),
            paid: Some(paid.to_string()),
        }
    }
}

/// The expense form as submitted: a total, a head count and optional
/// per-person contributions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExpenseForm {
    pub total_amount: String,
    pub num_people: i64,
    #[serde(default)]
    pub contributions: Vec<ContributionRow>,
}

/// A split whose inputs have all been checked and typed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedSplit {
    pub total_amount: Decimal,
    pub num_people: u32,
    /// One entry per person, in form order.
    pub participants: Vec<Participant>,
}

impl ValidatedSplit {
    /// Sum of what everyone actually paid.
    pub fn total_paid(&self) -> Decimal {
        self.participants.iter().map(|p| p.paid).sum()
    }
}

impl ExpenseForm {
    /// Validate and normalise the form.
    pub fn validate(&self) -> Result<ValidatedSplit, FormError> {
        let total_amount = parse_amount("Total amount", &self.total_amount)?;
        if total_amount <= Decimal::ZERO {
            return Err(FormError::NonPositiveTotal);
        }

        if self.num_people < 1 {
            return Err(FormError::NoParticipants);
        }
        if self.num_people > MAX_PARTICIPANTS {
            return Err(FormError::TooManyParticipants {
                count: self.num_people,
                max: MAX_PARTICIPANTS,
            });
        }
        if self.contributions.len() as i64 > self.num_people {
            return Err(FormError::TooManyRows {
                rows: self.contributions.len(),
                people: self.num_people,
            });
        }

        let count = self.num_people as usize;
        let blank = ContributionRow::default();
        let mut participants = Vec::with_capacity(count);
        let mut seen = HashSet::with_capacity(count);
        let mut running = Decimal::ZERO;

        for index in 0..count {
            let row = self.contributions.get(index).unwrap_or(&blank);
            let name = display_name(row.name.as_deref(), index);

            let paid = match row.paid.as_deref().map(str::trim) {
                None | Some("") => Decimal::ZERO,
                Some(text) => parse_amount(&format!("Paid by {name}"), text)?,
            };
            if paid < Decimal::ZERO {
                return Err(FormError::NegativeAmount { name });
            }
            running = running
                .checked_add(paid)
                .ok_or(FormError::AmountOutOfRange)?;

            if !seen.insert(name.clone()) {
                return Err(FormError::DuplicateName(name));
            }
            participants.push(Participant { name, paid });
        }

        Ok(ValidatedSplit {
            total_amount,
            num_people: count as u32,
            participants,
        })
    }
}

/// Trimmed name, or `Person {index+1}` when left blank.
fn display_name(raw: Option<&str>, index: usize) -> String {
    match raw.map(str::trim) {
        Some(name) if !name.is_empty() => name.to_string(),
        _ => format!("Person {}", index + 1),
    }
}

fn parse_amount(field: &str, text: &str) -> Result<Decimal, FormError> {
    let trimmed = text.trim();
    Decimal::from_str(trimmed)
        .or_else(|_| Decimal::from_scientific(trimmed))
        .map_err(|_| FormError::InvalidNumber {
            field: field.to_string(),
            value: text.to_string(),
        })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
