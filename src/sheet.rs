//! Expense sheets on disk.
//!
//! A sheet is an [`ExpenseForm`] written as TOML or JSON, picked by file
//! extension. Sheets are read-only inputs; nothing is written back.

use anyhow::{bail, Context, Result};
use std::path::Path;
use tracing::{debug, info};

use crate::form::ExpenseForm;

/// Load an expense sheet from a `.toml` or `.json` file.
pub fn load_sheet(path: impl AsRef<Path>) -> Result<ExpenseForm> {
    let path = path.as_ref();
    let shown = path.display();

    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read sheet from {shown}"))?;

    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase);

    let form = match extension.as_deref() {
        Some("toml") => parse_toml(&contents),
        Some("json") => parse_json(&contents),
        other => bail!(
            "Unsupported sheet format {:?} for {shown} (expected .toml or .json)",
            other.unwrap_or("")
        ),
    }
    .with_context(|| format!("Failed to parse sheet from {shown}"))?;

    info!(
        path = %shown,
        people = form.num_people,
        rows = form.contributions.len(),
        "Sheet loaded"
    );
    Ok(form)
}

/// Parse a sheet written as TOML.
pub fn parse_toml(contents: &str) -> Result<ExpenseForm> {
    let form: ExpenseForm = toml::from_str(contents)?;
    debug!(total = %form.total_amount, "Parsed TOML sheet");
    Ok(form)
}

/// Parse a sheet written as JSON.
pub fn parse_json(contents: &str) -> Result<ExpenseForm> {
    let form: ExpenseForm = serde_json::from_str(contents)?;
    debug!(total = %form.total_amount, "Parsed JSON sheet");
    Ok(form)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
