//! Expense splitter — fair shares, balances and who-pays-whom settlement.
//!
//! Library crate exposing all modules for use by integration tests
//! and the binary entry point.

pub mod config;
pub mod types;
pub mod form;
pub mod settlement;
pub mod sheet;
pub mod report;
pub mod server;
