//! The sample sheets shipped in `sheets/` parse and split as documented.

use expense_splitter::settlement::Splitter;
use expense_splitter::sheet::load_sheet;
use rust_decimal_macros::dec;

fn sheet_path(name: &str) -> std::path::PathBuf {
    std::path::Path::new(env!("CARGO_MANIFEST_DIR")).join("sheets").join(name)
}

#[test]
fn dinner_sheet_settles_in_three_transfers() {
    let form = load_sheet(sheet_path("dinner.toml")).unwrap();
    let summary = Splitter::default().split(&form.validate().unwrap());

    assert_eq!(summary.fair_share, dec!(600));
    let lines: Vec<_> = summary.transactions.iter().map(|t| t.to_string()).collect();
    assert_eq!(
        lines,
        vec![
            "Chen pays Asha 600.00",
            "Person 4 pays Asha 300.00",
            "Person 4 pays Ben 300.00",
        ]
    );
    assert!(summary.warnings.is_empty());
}

#[test]
fn trip_sheet_matches_toml_equivalent() {
    let form = load_sheet(sheet_path("trip.json")).unwrap();
    let summary = Splitter::default().split(&form.validate().unwrap());

    assert_eq!(summary.transactions.len(), 1);
    assert_eq!(summary.transactions[0].to_string(), "B pays A 50.00");
}
