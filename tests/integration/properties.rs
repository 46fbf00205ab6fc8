//! Seeded randomized checks of the settlement invariants.

use expense_splitter::settlement::audit;
use expense_splitter::settlement::calculator::{SettlementCalculator, DEFAULT_EPSILON};
use expense_splitter::settlement::fair_share;
use expense_splitter::types::{Participant, Transaction};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use std::collections::HashSet;

const CASES: usize = 500;

/// Random group whose contributions add up to the bill.
fn random_group(rng: &mut StdRng) -> (Vec<Participant>, Decimal) {
    let n = rng.gen_range(1..=9);
    let participants: Vec<_> = (0..n)
        .map(|i| {
            // Whole cents, with a good share of people paying nothing.
            let cents: i64 = if rng.gen_bool(0.4) { 0 } else { rng.gen_range(1..250_000) };
            Participant::new(format!("P{i}"), Decimal::new(cents, 2))
        })
        .collect();
    let total: Decimal = participants.iter().map(|p| p.paid).sum();
    let share = fair_share(total, n as u32).unwrap();
    (participants, share)
}

/// Random group whose bill is drawn separately, so contributions land above
/// or below it.
fn mismatched_group(rng: &mut StdRng) -> (Vec<Participant>, Decimal, Decimal) {
    let (participants, _) = random_group(rng);
    let paid: Decimal = participants.iter().map(|p| p.paid).sum();
    let total = if rng.gen_bool(0.5) {
        paid + Decimal::new(rng.gen_range(1..100_000), 2)
    } else {
        // Over-contribution; keep the bill positive.
        let cut = Decimal::new(rng.gen_range(1..100_000), 2);
        if paid > cut {
            paid - cut
        } else {
            Decimal::new(rng.gen_range(1..=99), 2)
        }
    };
    let share = fair_share(total, participants.len() as u32).unwrap();
    (participants, share, total)
}

fn tolerance(n: usize) -> Decimal {
    DEFAULT_EPSILON * Decimal::from(n.max(1))
}

fn sum(txs: &[Transaction]) -> Decimal {
    txs.iter().map(|t| t.amount).sum()
}

#[test]
fn transfers_conserve_money() {
    let calc = SettlementCalculator::default();
    let mut rng = StdRng::seed_from_u64(7);

    for _ in 0..CASES {
        let (people, share) = random_group(&mut rng);
        let balances = calc.balances(&people, share);
        let txs = calc.settle(&people, share);

        let owed_to_creditors: Decimal = balances.iter().map(|b| b.receivable()).sum();
        assert!(
            (sum(&txs) - owed_to_creditors).abs() <= tolerance(people.len()),
            "transferred {} but creditors are owed {}",
            sum(&txs),
            owed_to_creditors
        );
    }
}

#[test]
fn transfers_zero_every_balance() {
    let calc = SettlementCalculator::default();
    let mut rng = StdRng::seed_from_u64(11);

    for _ in 0..CASES {
        let (people, share) = random_group(&mut rng);
        let balances = calc.balances(&people, share);
        let txs = calc.settle(&people, share);

        for r in audit::residuals(&balances, &txs) {
            assert!(
                r.amount.abs() <= tolerance(people.len()),
                "{} left with {}",
                r.name,
                r.amount
            );
        }
    }
}

#[test]
fn transfers_are_positive_and_never_to_self() {
    let calc = SettlementCalculator::default();
    let mut rng = StdRng::seed_from_u64(23);

    for _ in 0..CASES {
        let (people, share) = random_group(&mut rng);
        for tx in calc.settle(&people, share) {
            assert!(tx.amount > Decimal::ZERO);
            assert_ne!(tx.payer, tx.payee);
        }
    }
}

#[test]
fn greedy_uses_at_most_n_minus_one_transfers() {
    let calc = SettlementCalculator::default();
    let mut rng = StdRng::seed_from_u64(31);

    for _ in 0..CASES {
        let (people, share) = random_group(&mut rng);
        let txs = calc.settle(&people, share);
        assert!(txs.len() < people.len().max(1));
    }
}

#[test]
fn payers_are_debtors_and_payees_are_creditors() {
    let calc = SettlementCalculator::default();
    let mut rng = StdRng::seed_from_u64(43);

    for _ in 0..CASES {
        let (people, share) = random_group(&mut rng);
        let balances = calc.balances(&people, share);
        let debtors: HashSet<_> = balances
            .iter()
            .filter(|b| b.owed() > Decimal::ZERO)
            .map(|b| b.name.clone())
            .collect();
        let creditors: HashSet<_> = balances
            .iter()
            .filter(|b| b.receivable() > Decimal::ZERO)
            .map(|b| b.name.clone())
            .collect();

        for tx in calc.settle(&people, share) {
            assert!(debtors.contains(&tx.payer));
            assert!(creditors.contains(&tx.payee));
        }
    }
}

#[test]
fn settled_input_produces_nothing() {
    let calc = SettlementCalculator::default();
    let mut rng = StdRng::seed_from_u64(59);

    for _ in 0..CASES {
        let n = rng.gen_range(1..=9);
        let each = Decimal::new(rng.gen_range(0..100_000), 2);
        let people: Vec<_> = (0..n)
            .map(|i| {
                // Jitter well inside epsilon.
                let jitter = Decimal::new(rng.gen_range(-9..=9), 8);
                Participant::new(format!("P{i}"), each + jitter)
            })
            .collect();
        assert!(calc.settle(&people, each).is_empty());
    }
}

#[test]
fn debtor_order_follows_input_order() {
    let calc = SettlementCalculator::default();
    let people = vec![
        Participant::new("Zed", dec!(0)),
        Participant::new("Amy", dec!(0)),
        Participant::new("Max", dec!(300)),
    ];
    let payers: Vec<_> = calc
        .settle(&people, dec!(100))
        .into_iter()
        .map(|t| t.payer)
        .collect();
    assert_eq!(payers, vec!["Zed", "Amy"]);
}

#[test]
fn mismatched_totals_still_give_sane_transfers() {
    let calc = SettlementCalculator::default();
    let mut rng = StdRng::seed_from_u64(67);

    for _ in 0..CASES {
        let (people, share, _) = mismatched_group(&mut rng);
        let txs = calc.settle(&people, share);

        assert!(txs.len() < people.len().max(1));
        for tx in &txs {
            assert!(tx.amount > Decimal::ZERO);
            assert_ne!(tx.payer, tx.payee);
        }
    }
}

#[test]
fn mismatched_leftovers_sit_on_one_side() {
    let calc = SettlementCalculator::default();
    let mut rng = StdRng::seed_from_u64(71);
    let (mut short, mut over) = (0, 0);

    for _ in 0..CASES {
        let (people, share, total) = mismatched_group(&mut rng);
        let paid: Decimal = people.iter().map(|p| p.paid).sum();
        let balances = calc.balances(&people, share);
        let txs = calc.settle(&people, share);

        let leftovers: Vec<Decimal> = audit::residuals(&balances, &txs)
            .into_iter()
            .map(|r| r.amount)
            .filter(|a| a.abs() > tolerance(people.len()))
            .collect();

        let all_owing = leftovers.iter().all(|a| *a < Decimal::ZERO);
        let all_owed = leftovers.iter().all(|a| *a > Decimal::ZERO);
        assert!(all_owing || all_owed, "mixed leftovers {leftovers:?}");

        // What is left open is exactly the gap between paid and billed.
        let open: Decimal = leftovers.iter().copied().sum();
        assert!(
            (open - (paid - total)).abs() <= tolerance(people.len()) * Decimal::from(2),
            "open {open}, gap {}",
            paid - total
        );
        if paid < total {
            short += 1;
            assert!(all_owing);
        } else {
            over += 1;
            assert!(all_owed);
        }
    }

    assert!(short > 0 && over > 0);
}
