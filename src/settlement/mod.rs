//! Settlement pipeline.
//!
//! Ties together fair-share computation, balance derivation, greedy
//! settlement and the closure audit into a single [`SplitSummary`].

pub mod audit;
pub mod calculator;

use rust_decimal::Decimal;
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::form::ValidatedSplit;
use crate::types::{round_money, Balance, BalanceStatus, Transaction, DEFAULT_DISPLAY_DECIMALS};
use calculator::SettlementCalculator;

/// `total / count`, or `None` when there is nobody to split between.
pub fn fair_share(total: Decimal, count: u32) -> Option<Decimal> {
    if count == 0 {
        return None;
    }
    total.checked_div(Decimal::from(count))
}

// ---------------------------------------------------------------------------
// Warnings
// ---------------------------------------------------------------------------

/// Non-fatal findings attached to a split. The split is still computed.
///
/// Amounts are full precision; `report` formats them for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SplitWarning {
    /// What people say they paid does not add up to the bill.
    ContributionMismatch {
        total_paid: Decimal,
        total_amount: Decimal,
    },
    /// A participant still owes (`Underpaid`) or is still owed (`Overpaid`)
    /// `amount` after all transfers. `amount` is always positive.
    Unsettled {
        name: String,
        status: BalanceStatus,
        amount: Decimal,
    },
}

// ---------------------------------------------------------------------------
// Summary
// ---------------------------------------------------------------------------

/// Full result of one split, at full precision.
#[derive(Debug, Clone, Serialize)]
pub struct SplitSummary {
    pub total_amount: Decimal,
    pub num_people: u32,
    pub fair_share: Decimal,
    pub total_paid: Decimal,
    pub balances: Vec<Balance>,
    pub transactions: Vec<Transaction>,
    pub warnings: Vec<SplitWarning>,
}

impl SplitSummary {
    /// True when no transfers are needed.
    pub fn is_settled(&self) -> bool {
        self.transactions.is_empty()
    }

    /// Sum of all transfer amounts.
    pub fn total_transferred(&self) -> Decimal {
        self.transactions.iter().map(|t| t.amount).sum()
    }
}

// ---------------------------------------------------------------------------
// Splitter
// ---------------------------------------------------------------------------

/// Runs the full split for a validated form.
#[derive(Debug, Clone, Copy, Default)]
pub struct Splitter {
    calculator: SettlementCalculator,
}

impl Splitter {
    pub fn new(calculator: SettlementCalculator) -> Self {
        Self { calculator }
    }

    pub fn calculator(&self) -> &SettlementCalculator {
        &self.calculator
    }

    /// Compute fair share, balances, settlement and warnings.
    pub fn split(&self, input: &ValidatedSplit) -> SplitSummary {
        let epsilon = self.calculator.epsilon();
        debug_assert!(input.num_people >= 1, "split needs at least one person");
        debug_assert_eq!(input.participants.len(), input.num_people as usize);
        let fair_share = fair_share(input.total_amount, input.num_people).unwrap_or(Decimal::ZERO);
        let total_paid = input.total_paid();

        let mut warnings = Vec::new();
        if total_paid > Decimal::ZERO && (total_paid - input.total_amount).abs() > epsilon {
            warn!(
                total_paid = %total_paid,
                total_amount = %input.total_amount,
                "Contributions do not match total; settling on contributions entered"
            );
            warnings.push(SplitWarning::ContributionMismatch {
                total_paid,
                total_amount: input.total_amount,
            });
        }

        let balances = self.calculator.balances(&input.participants, fair_share);
        let transactions = self.calculator.settle(&input.participants, fair_share);

        for tx in &transactions {
            debug!(payer = %tx.payer, payee = %tx.payee, amount = %tx.amount, "Transfer");
        }

        // With nothing entered there is nothing to reconcile; every balance
        // is simply the fair share still to be paid.
        if total_paid > Decimal::ZERO {
            for open in audit::unsettled(&balances, &transactions, epsilon) {
                debug!(name = %open.name, amount = %open.amount, "Balance left open");
                warnings.push(SplitWarning::Unsettled {
                    name: open.name,
                    status: BalanceStatus::classify(open.amount, epsilon),
                    amount: open.amount.abs(),
                });
            }
        }

        info!(
            people = input.num_people,
            fair_share = %round_money(fair_share, DEFAULT_DISPLAY_DECIMALS),
            transfers = transactions.len(),
            warnings = warnings.len(),
            "Split computed"
        );

        SplitSummary {
            total_amount: input.total_amount,
            num_people: input.num_people,
            fair_share,
            total_paid,
            balances,
            transactions,
            warnings,
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
