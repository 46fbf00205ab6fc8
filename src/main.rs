//! Expense splitter CLI.
//!
//! Entry point. Loads configuration, initialises structured logging, then
//! either splits a single expense sheet or serves the HTTP API.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{error, info};

use expense_splitter::config::AppConfig;
use expense_splitter::report;
use expense_splitter::server::{self, routes::ServerState};
use expense_splitter::settlement::Splitter;
use expense_splitter::sheet;

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(name = "splitter", version, about = "Split a shared bill and work out who pays whom")]
struct Cli {
    /// Path to the TOML configuration file.
    #[arg(short, long, default_value = "config.toml", global = true)]
    config: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Split an expense sheet (.toml or .json) and print the settlement.
    Split {
        /// Expense sheet to read.
        sheet: PathBuf,

        /// Output format.
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },
    /// Serve the JSON API and HTML form.
    Serve {
        /// Port to listen on (overrides the config file).
        #[arg(short, long)]
        port: Option<u16>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
    Csv,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present (non-fatal if missing)
    let _ = dotenv::dotenv();

    let cli = Cli::parse();
    let cfg = AppConfig::load_or_default(&cli.config)?;

    init_logging();

    match cli.command {
        Command::Split { sheet, format } => run_split(&cfg, &sheet, format),
        Command::Serve { port } => {
            let port = port.unwrap_or(cfg.server.port);
            info!(
                name = %cfg.app.name,
                currency = %cfg.app.currency_symbol,
                epsilon = %cfg.settlement.epsilon,
                "Starting splitter server"
            );
            let state = Arc::new(ServerState::new(&cfg));
            server::serve(state, &cfg.server.host, port).await
        }
    }
}

/// Split one sheet and print it in the requested format.
fn run_split(cfg: &AppConfig, path: &Path, format: OutputFormat) -> Result<()> {
    let form = sheet::load_sheet(path)?;
    let validated = match form.validate() {
        Ok(v) => v,
        Err(e) => {
            error!(error = %e, "Invalid expense sheet");
            return Err(e).with_context(|| format!("Invalid expense sheet {}", path.display()));
        }
    };

    let splitter = Splitter::new(cfg.settlement.calculator());
    let summary = splitter.split(&validated);
    let display = cfg.display();

    let output = match format {
        OutputFormat::Text => report::render_text(&summary, &display),
        OutputFormat::Json => report::render_json(&summary, &display)?,
        OutputFormat::Csv => report::render_csv(&summary, &display)?,
    };
    print!("{output}");
    if format == OutputFormat::Json {
        println!();
    }

    Ok(())
}

/// Initialise the `tracing` subscriber.
///
/// Logs go to stderr so that report output on stdout stays pipeable.
fn init_logging() {
    use tracing_subscriber::{fmt, EnvFilter};

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("expense_splitter=info,splitter=info"));

    let json_logging = std::env::var("SPLITTER_LOG_JSON").is_ok();

    if json_logging {
        fmt()
            .json()
            .with_env_filter(env_filter)
            .with_target(true)
            .with_writer(std::io::stderr)
            .init();
    } else {
        fmt()
            .with_env_filter(env_filter)
            .with_target(true)
            .with_writer(std::io::stderr)
            .init();
    }
}
