//! Closure audit — replays a settlement against the balances it came from.
//!
//! Every payer's balance rises by what they pay and every payee's balance
//! falls by what they receive. A well-formed settlement leaves each
//! participant within tolerance of zero.

use rust_decimal::Decimal;
use serde::Serialize;
use std::collections::HashMap;

use crate::types::{Balance, Transaction};

/// A participant's balance after all transfers have been applied.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Residual {
    pub name: String,
    pub amount: Decimal,
}

/// Apply `transactions` to `balances` and return the leftover per
/// participant, in balance order.
///
/// Transfers naming someone absent from `balances` are ignored.
pub fn residuals(balances: &[Balance], transactions: &[Transaction]) -> Vec<Residual> {
    let mut index: HashMap<&str, usize> = HashMap::with_capacity(balances.len());
    for (i, b) in balances.iter().enumerate() {
        index.entry(b.name.as_str()).or_insert(i);
    }

    let mut amounts: Vec<Decimal> = balances.iter().map(|b| b.amount).collect();
    for tx in transactions {
        if let Some(&i) = index.get(tx.payer.as_str()) {
            amounts[i] += tx.amount;
        }
        if let Some(&j) = index.get(tx.payee.as_str()) {
            amounts[j] -= tx.amount;
        }
    }

    balances
        .iter()
        .zip(amounts)
        .map(|(b, amount)| Residual {
            name: b.name.clone(),
            amount,
        })
        .collect()
}

/// Participants whose residual is still outside `epsilon` after settlement.
pub fn unsettled(
    balances: &[Balance],
    transactions: &[Transaction],
    epsilon: Decimal,
) -> Vec<Residual> {
    residuals(balances, transactions)
        .into_iter()
        .filter(|r| r.amount.abs() > epsilon)
        .collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
