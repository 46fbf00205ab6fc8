//! Configuration loading from TOML.
//!
//! Reads `config.toml` and deserializes into strongly-typed structs. Every
//! section is optional; missing keys take the defaults below.

use anyhow::{Context, Result};
use rust_decimal::Decimal;
use serde::Deserialize;
use std::fs;
use std::path::Path;
use tracing::info;

use crate::settlement::calculator::{SettlementCalculator, DEFAULT_EPSILON};
use crate::types::DEFAULT_DISPLAY_DECIMALS;

/// Top-level application configuration.
#[derive(Debug, Deserialize, Clone, Default)]
#[serde(default)]
pub struct AppConfig {
    pub app: AppSection,
    pub settlement: SettlementConfig,
    pub server: ServerConfig,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct AppSection {
    pub name: String,
    /// Prefix printed before every amount.
    pub currency_symbol: String,
}

impl Default for AppSection {
    fn default() -> Self {
        Self {
            name: "Expense Splitter".to_string(),
            currency_symbol: "₹".to_string(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct SettlementConfig {
    /// Balances within this distance of zero count as settled.
    pub epsilon: Decimal,
    /// Decimal places shown in reports.
    pub display_decimals: u32,
}

impl Default for SettlementConfig {
    fn default() -> Self {
        Self {
            epsilon: DEFAULT_EPSILON,
            display_decimals: DEFAULT_DISPLAY_DECIMALS,
        }
    }
}

impl SettlementConfig {
    pub fn calculator(&self) -> SettlementCalculator {
        SettlementCalculator::new(self.epsilon)
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
        }
    }
}

/// What the report layer needs to format amounts.
#[derive(Debug, Clone)]
pub struct DisplayConfig {
    pub currency_symbol: String,
    pub decimals: u32,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        AppConfig::default().display()
    }
}

impl AppConfig {
    /// Load configuration from a TOML file.
    pub fn load(path: &str) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {path}"))?;
        Self::parse(&contents).with_context(|| format!("Failed to parse config file: {path}"))
    }

    /// Load from `path` if it exists, otherwise fall back to defaults.
    pub fn load_or_default(path: &str) -> Result<Self> {
        if Path::new(path).exists() {
            Self::load(path)
        } else {
            info!(path, "No config file found, using defaults");
            Ok(Self::default())
        }
    }

    /// Parse configuration from TOML text.
    pub fn parse(contents: &str) -> Result<Self> {
        let config: AppConfig = toml::from_str(contents)?;
        if config.settlement.epsilon < Decimal::ZERO {
            anyhow::bail!("settlement.epsilon must not be negative");
        }
        Ok(config)
    }

    pub fn display(&self) -> DisplayConfig {
        DisplayConfig {
            currency_symbol: self.app.currency_symbol.clone(),
            decimals: self.settlement.display_decimals,
        }
    }
}
