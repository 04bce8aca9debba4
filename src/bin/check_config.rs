//! Configuration self-check
//!
//! Verifies that the environment file exists, that the configuration
//! resolves, and that credentials look plausible, then prints next steps.
//!
//! # Usage
//! ```sh
//! cargo run --bin check_config -- --env-file .env
//! ```

use anyhow::{Context, Result};
use clap::Parser;
use std::io::Write;
use tracing::Level;
use tradebot::config::{DEFAULT_ENV_FILE, ENV_TEMPLATE_FILE};
use tradebot::diagnostics::Diagnostics;

#[derive(Parser)]
#[command(author, version, about = "Check the trading bot configuration", long_about = None)]
struct Cli {
    /// Environment file to check
    #[arg(long, default_value = DEFAULT_ENV_FILE)]
    env_file: String,

    /// Template the environment file is created from
    #[arg(long, default_value = ENV_TEMPLATE_FILE)]
    template: String,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // The report goes to stdout; only warnings from the library reach stderr
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_max_level(Level::WARN)
        .with_target(false)
        .init();

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    let report = Diagnostics::from_process()
        .env_file(&cli.env_file)
        .template(&cli.template)
        .run(&mut out)
        .context("Failed to write diagnostic report")?;
    out.flush().context("Failed to flush stdout")?;

    std::process::exit(report.exit_code());
}
