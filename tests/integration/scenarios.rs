//! End-to-end scenarios: raw form in, settlement out.

use expense_splitter::config::DisplayConfig;
use expense_splitter::form::{ContributionRow, ExpenseForm, FormError};
use expense_splitter::report::render_text;
use expense_splitter::settlement::calculator::SettlementCalculator;
use expense_splitter::settlement::{SplitSummary, SplitWarning, Splitter};
use expense_splitter::types::{BalanceStatus, Participant};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

fn run(total: &str, rows: &[(&str, &str)]) -> SplitSummary {
    let form = ExpenseForm {
        total_amount: total.to_string(),
        num_people: rows.len() as i64,
        contributions: rows.iter().map(|(n, p)| ContributionRow::new(n, p)).collect(),
    };
    Splitter::default().split(&form.validate().unwrap())
}

fn tuples(summary: &SplitSummary) -> Vec<(String, String, Decimal)> {
    summary
        .transactions
        .iter()
        .map(|t| (t.payer.clone(), t.payee.clone(), t.amount))
        .collect()
}

#[test]
fn scenario_one_person_paid_everything() {
    let s = run("300", &[("A", "300"), ("B", "0"), ("C", "0")]);

    let amounts: Vec<_> = s.balances.iter().map(|b| b.amount).collect();
    assert_eq!(amounts, vec![dec!(200), dec!(-100), dec!(-100)]);
    assert_eq!(
        tuples(&s),
        vec![
            ("B".to_string(), "A".to_string(), dec!(100)),
            ("C".to_string(), "A".to_string(), dec!(100)),
        ]
    );
}

#[test]
fn scenario_everyone_paid_their_share() {
    let s = run("300", &[("A", "100"), ("B", "100"), ("C", "100")]);
    assert!(s.transactions.is_empty());
    assert!(s.warnings.is_empty());
}

#[test]
fn scenario_one_settled_participant() {
    let s = run("300", &[("A", "150"), ("B", "50"), ("C", "100")]);

    assert_eq!(s.balances[2].status, BalanceStatus::Settled);
    assert_eq!(
        tuples(&s),
        vec![("B".to_string(), "A".to_string(), dec!(50))]
    );
}

#[test]
fn scenario_contributions_short_of_total() {
    let s = run("300", &[("A", "90"), ("B", "90"), ("C", "90")]);

    assert!(s.balances.iter().all(|b| b.amount == dec!(-10)));
    assert!(s.transactions.is_empty());
    assert!(matches!(s.warnings[0], SplitWarning::ContributionMismatch { .. }));
    assert!(s.warnings[1..].iter().all(|w| matches!(
        w,
        SplitWarning::Unsettled { status: BalanceStatus::Underpaid, amount, .. } if *amount == dec!(10)
    )));
}

#[test]
fn scenario_contributions_over_total() {
    let s = run("200", &[("A", "200"), ("B", "100")]);

    assert!(s.transactions.is_empty());
    assert_eq!(s.warnings.len(), 2);
    assert_eq!(
        s.warnings[1],
        SplitWarning::Unsettled {
            name: "A".into(),
            status: BalanceStatus::Overpaid,
            amount: dec!(100),
        }
    );
}

#[test]
fn scenario_calculator_called_directly() {
    let calc = SettlementCalculator::default();
    let input = vec![
        Participant::new("A", dec!(300)),
        Participant::new("B", dec!(0)),
        Participant::new("C", dec!(0)),
    ];
    let txs = calc.settle(&input, dec!(100));
    let lines: Vec<_> = txs.iter().map(|t| t.to_string()).collect();
    assert_eq!(lines, vec!["B pays A 100.00", "C pays A 100.00"]);
}

#[test]
fn scenario_uneven_thirds_render_at_two_decimals() {
    let s = run("100", &[("A", "100"), ("B", ""), ("C", "")]);
    let text = render_text(&s, &DisplayConfig::default());

    assert!(text.contains("₹33.33 each"));
    assert!(text.contains("B pays A ₹33.33"));
    assert!(text.contains("C pays A ₹33.33"));
    // Full precision is kept internally.
    assert!(s.transactions[0].amount > dec!(33.33));
}

#[test]
fn scenario_invalid_input_never_reaches_calculator() {
    let form = ExpenseForm {
        total_amount: "300".into(),
        num_people: 2,
        contributions: vec![ContributionRow::new("A", "a lot")],
    };
    assert!(matches!(form.validate(), Err(FormError::InvalidNumber { .. })));
}
