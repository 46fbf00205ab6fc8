//! Settlement calculator — two-pointer greedy debtor/creditor matching.
//!
//! Given what each participant paid and a shared fair share, produces the
//! list of transfers that brings every balance back to zero. Debtors and
//! creditors are visited in input order; each step moves the smaller of the
//! two outstanding amounts, so at least one side is cleared per transfer.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::types::{Balance, BalanceStatus, Participant, Transaction};

/// Tolerance below which a balance counts as settled.
pub const DEFAULT_EPSILON: Decimal = dec!(0.000001);

/// Stateless settlement calculator.
///
/// Holds only its tolerance, so one instance can be shared freely across
/// threads and requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SettlementCalculator {
    epsilon: Decimal,
}

impl Default for SettlementCalculator {
    fn default() -> Self {
        Self {
            epsilon: DEFAULT_EPSILON,
        }
    }
}

impl SettlementCalculator {
    /// Build a calculator with a custom tolerance. Negative values are
    /// treated as their magnitude.
    pub fn new(epsilon: Decimal) -> Self {
        Self {
            epsilon: epsilon.abs(),
        }
    }

    pub fn epsilon(&self) -> Decimal {
        self.epsilon
    }

    /// Each participant's contribution against the fair share, in input order.
    pub fn balances(&self, participants: &[Participant], fair_share: Decimal) -> Vec<Balance> {
        participants
            .iter()
            .map(|p| {
                let amount = p.paid - fair_share;
                Balance {
                    name: p.name.clone(),
                    paid: p.paid,
                    amount,
                    status: BalanceStatus::classify(amount, self.epsilon),
                }
            })
            .collect()
    }

    /// Compute debtor → creditor transfers that clear all balances.
    ///
    /// Amounts are kept at full precision. When contributions do not
    /// reconcile with the fair share, whatever cannot be matched is left
    /// outstanding rather than paired with an invented counterparty.
    pub fn settle(&self, participants: &[Participant], fair_share: Decimal) -> Vec<Transaction> {
        let balances = self.balances(participants, fair_share);

        let mut debtors: Vec<(&str, Decimal)> = balances
            .iter()
            .filter(|b| b.status == BalanceStatus::Underpaid)
            .map(|b| (b.name.as_str(), -b.amount))
            .collect();
        let mut creditors: Vec<(&str, Decimal)> = balances
            .iter()
            .filter(|b| b.status == BalanceStatus::Overpaid)
            .map(|b| (b.name.as_str(), b.amount))
            .collect();

        let mut transactions = Vec::with_capacity(debtors.len() + creditors.len());
        let (mut i, mut j) = (0, 0);

        while i < debtors.len() && j < creditors.len() {
            let (debtor, owed) = debtors[i];
            let (creditor, receivable) = creditors[j];

            let transfer = owed.min(receivable);
            transactions.push(Transaction::new(debtor, creditor, transfer));

            debtors[i].1 = owed - transfer;
            creditors[j].1 = receivable - transfer;

            if debtors[i].1 <= self.epsilon {
                i += 1;
            }
            if creditors[j].1 <= self.epsilon {
                j += 1;
            }
        }

        transactions
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
