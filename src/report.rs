//! Display boundary — the only place amounts get rounded.
//!
//! Renders a [`SplitSummary`] as plain text lines, a display-ready JSON
//! view, or CSV rows of transfers.

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use std::fmt::Write as _;

use crate::config::DisplayConfig;
use crate::settlement::{SplitSummary, SplitWarning};
use crate::types::{round_money, BalanceStatus};

// ---------------------------------------------------------------------------
// Text
// ---------------------------------------------------------------------------

/// Human-readable report: fair share, balances, warnings, settlement.
pub fn render_text(summary: &SplitSummary, display: &DisplayConfig) -> String {
    let money = |value: Decimal| format_money(value, display);
    let mut out = String::new();

    let _ = writeln!(
        out,
        "Total {} split {} ways: {} each",
        money(summary.total_amount),
        summary.num_people,
        money(summary.fair_share),
    );

    out.push_str("\nIndividual balances\n");
    for b in &summary.balances {
        let line = match b.status {
            BalanceStatus::Overpaid => format!("{} should get back {}", b.name, money(b.amount)),
            BalanceStatus::Underpaid => format!("{} should pay {} more", b.name, money(-b.amount)),
            BalanceStatus::Settled => format!("{} is settled up", b.name),
        };
        let _ = writeln!(out, "  {line}");
    }

    if !summary.warnings.is_empty() {
        out.push_str("\nWarnings\n");
        for w in &summary.warnings {
            let _ = writeln!(out, "  {}", format_warning(w, display));
        }
    }

    out.push_str("\nSettlement (who pays whom)\n");
    if summary.is_settled() {
        out.push_str("  Everyone is already settled!\n");
    } else {
        for tx in &summary.transactions {
            let _ = writeln!(out, "  {} pays {} {}", tx.payer, tx.payee, money(tx.amount));
        }
    }

    out
}

/// `₹12.50`-style amount with the configured precision.
pub fn format_money(value: Decimal, display: &DisplayConfig) -> String {
    let dp = display.decimals as usize;
    format!(
        "{}{:.*}",
        display.currency_symbol,
        dp,
        round_money(value, display.decimals)
    )
}

/// One warning as a sentence, amounts in the configured currency.
pub fn format_warning(warning: &SplitWarning, display: &DisplayConfig) -> String {
    match warning {
        SplitWarning::ContributionMismatch {
            total_paid,
            total_amount,
        } => format!(
            "Contributions entered ({}) do not match total amount ({}).",
            format_money(*total_paid, display),
            format_money(*total_amount, display),
        ),
        SplitWarning::Unsettled {
            name,
            status: BalanceStatus::Overpaid,
            amount,
        } => format!(
            "{name} is still owed {} with no one left to collect from",
            format_money(*amount, display)
        ),
        SplitWarning::Unsettled { name, amount, .. } => format!(
            "{name} still owes {} with no one left to pay",
            format_money(*amount, display)
        ),
    }
}

// ---------------------------------------------------------------------------
// JSON
// ---------------------------------------------------------------------------

/// Rounded, display-ready view of a split.
#[derive(Debug, Clone, Serialize)]
pub struct SummaryView {
    pub computed_at: DateTime<Utc>,
    pub currency: String,
    pub total_amount: Decimal,
    pub num_people: u32,
    pub fair_share: Decimal,
    pub total_paid: Decimal,
    pub balances: Vec<BalanceView>,
    pub transactions: Vec<TransactionView>,
    pub warnings: Vec<String>,
    pub settled: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct BalanceView {
    pub name: String,
    pub paid: Decimal,
    pub balance: Decimal,
    pub status: BalanceStatus,
}

#[derive(Debug, Clone, Serialize)]
pub struct TransactionView {
    pub payer: String,
    pub payee: String,
    pub amount: Decimal,
    /// `"{payer} pays {payee} {amount}"`
    pub line: String,
}

impl SummaryView {
    pub fn new(summary: &SplitSummary, display: &DisplayConfig) -> Self {
        let dp = display.decimals;
        Self {
            computed_at: Utc::now(),
            currency: display.currency_symbol.clone(),
            total_amount: round_money(summary.total_amount, dp),
            num_people: summary.num_people,
            fair_share: round_money(summary.fair_share, dp),
            total_paid: round_money(summary.total_paid, dp),
            balances: summary
                .balances
                .iter()
                .map(|b| BalanceView {
                    name: b.name.clone(),
                    paid: round_money(b.paid, dp),
                    balance: round_money(b.amount, dp),
                    status: b.status,
                })
                .collect(),
            transactions: summary
                .transactions
                .iter()
                .map(|t| TransactionView {
                    payer: t.payer.clone(),
                    payee: t.payee.clone(),
                    amount: round_money(t.amount, dp),
                    line: format!("{} pays {} {}", t.payer, t.payee, format_money(t.amount, display)),
                })
                .collect(),
            warnings: summary
                .warnings
                .iter()
                .map(|w| format_warning(w, display))
                .collect(),
            settled: summary.is_settled(),
        }
    }
}

/// Pretty-printed JSON of the rounded view.
pub fn render_json(summary: &SplitSummary, display: &DisplayConfig) -> Result<String> {
    serde_json::to_string_pretty(&SummaryView::new(summary, display))
        .context("Failed to serialise split summary")
}

// ---------------------------------------------------------------------------
// CSV
// ---------------------------------------------------------------------------

/// `payer,payee,amount` rows, one per transfer.
pub fn render_csv(summary: &SplitSummary, display: &DisplayConfig) -> Result<String> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(["payer", "payee", "amount"])?;

    let dp = display.decimals as usize;
    for tx in &summary.transactions {
        let amount = format!("{:.*}", dp, round_money(tx.amount, display.decimals));
        writer.write_record([tx.payer.as_str(), tx.payee.as_str(), amount.as_str()])?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| anyhow::anyhow!("Failed to flush CSV writer: {e}"))?;
    String::from_utf8(bytes).context("CSV output was not UTF-8")
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
