//! Trading bot entry point
//!
//! Resolves the configuration once, installs logging (stdout + log file) and
//! prints the configuration summary. Strategy execution consumes the
//! resolved configuration from here.
//!
//! # Environment Variables
//! - `ALPACA_API_KEY`, `ALPACA_SECRET_KEY` - required
//! - `MODE` - `backtest` (default), `paper` or `live`
//! - `LOG_LEVEL`, `LOG_FILE` - logging (overridden by `RUST_LOG`)
//!
//! See `.env.example` for every setting.

use anyhow::{Context, Result};
use std::fs::OpenOptions;
use std::sync::Mutex;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::prelude::*;
use tradebot::config::{LoggingConfig, Resolver};

fn init_logging(logging: &LoggingConfig) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(logging.filter_directive()));

    let stdout_layer = tracing_subscriber::fmt::layer().with_target(false).pretty();

    let log_file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&logging.file_path)
        .with_context(|| format!("Failed to open log file {}", logging.file_path))?;

    let file_layer = tracing_subscriber::fmt::layer()
        .with_writer(Mutex::new(log_file))
        .with_ansi(false) // No color codes in the file
        .with_target(false);

    tracing_subscriber::registry()
        .with(filter)
        .with(stdout_layer)
        .with(file_layer)
        .init();

    Ok(())
}

fn main() -> Result<()> {
    // Logging depends on the configuration, so resolve first
    let config = Resolver::from_process()
        .resolve()
        .context("Failed to load configuration")?;

    init_logging(config.logging())?;

    info!("Trading bot {} starting...", env!("CARGO_PKG_VERSION"));
    config.log_summary();
    print!("{}", config.describe());

    if config.mode().is_live() {
        warn!("Live trading enabled against {}", config.broker().base_url);
        if config.broker().is_sandbox_url() {
            warn!("MODE=live but orders go to the paper trading endpoint");
        }
    }
    if !config.strategy().has_symbols() {
        warn!("No symbols configured, the strategy has nothing to trade");
    }

    let risk = config.risk();
    info!(
        "Risk: max ${} per trade, reward/risk {:.1}",
        risk.max_risk_per_trade_usd(),
        risk.reward_risk_ratio()
    );
    info!(
        "Data: Polygon={}, Yahoo={}, Monitoring={}",
        config.data_sources().has_polygon(),
        config.data_sources().use_yahoo,
        config.monitoring().is_enabled()
    );

    info!(
        "Configuration loaded successfully: Mode={}, Strategy={}, Window={}..{} ({} days)",
        config.mode(),
        config.strategy().name,
        config.backtest_window().start_iso(),
        config.backtest_window().end_iso(),
        config.backtest_window().days()
    );

    Ok(())
}
