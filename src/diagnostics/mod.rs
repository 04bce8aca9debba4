//! Operator self-check for the trading bot configuration.
//!
//! Runs a fixed sequence of checks, writing a line-oriented report. The
//! environment file and resolution checks halt the run when they fail; the
//! others always run so the operator sees as much as possible at once.

mod report;

pub use report::{CheckId, CheckOutcome, CheckStatus, Report};

use crate::config::{
    DEFAULT_ENV_FILE, ENV_TEMPLATE_FILE, RawEnvironment, ResolvedConfig, Resolver, TradingMode,
    format_usd,
};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Credentials at or below this length are treated as placeholders
pub const MIN_CREDENTIAL_LEN: usize = 10;

const PASS: &str = "✅";
const FAIL: &str = "❌";
const WARN: &str = "⚠️ ";

/// Configuration self-check
#[derive(Debug, Clone)]
pub struct Diagnostics {
    env: RawEnvironment,
    env_file: PathBuf,
    template: PathBuf,
}

impl Diagnostics {
    pub fn new(env: RawEnvironment) -> Self {
        Self {
            env,
            env_file: PathBuf::from(DEFAULT_ENV_FILE),
            template: PathBuf::from(ENV_TEMPLATE_FILE),
        }
    }

    pub fn from_process() -> Self {
        Self::new(RawEnvironment::from_process())
    }

    pub fn env_file(mut self, path: impl AsRef<Path>) -> Self {
        self.env_file = path.as_ref().to_path_buf();
        self
    }

    pub fn template(mut self, path: impl AsRef<Path>) -> Self {
        self.template = path.as_ref().to_path_buf();
        self
    }

    /// Run every check, writing the report to `out`
    pub fn run<W: Write>(&self, out: &mut W) -> io::Result<Report> {
        let mut report = Report::default();
        let rule = "=".repeat(60);

        writeln!(out, "{}", rule)?;
        writeln!(out, "Trading Bot Configuration Check")?;
        writeln!(out, "{}", rule)?;
        writeln!(out)?;

        let status = self.check_env_file(out)?;
        report.record(CheckId::EnvFile, status);
        if status.is_failure() {
            report.skip_remaining();
            return Ok(report);
        }
        writeln!(out)?;

        let Some(config) = self.check_resolution(out)? else {
            report.record(CheckId::Resolution, CheckStatus::Failed);
            report.skip_remaining();
            return Ok(report);
        };
        report.record(CheckId::Resolution, CheckStatus::Passed);
        writeln!(out)?;

        let status = check_credentials(&config, out)?;
        report.record(CheckId::Credentials, status);
        writeln!(out)?;

        let status = check_mode(config.mode(), out)?;
        report.record(CheckId::Mode, status);
        writeln!(out)?;

        let status = check_strategy(&config, out)?;
        report.record(CheckId::Strategy, status);
        writeln!(out)?;

        self.write_footer(&report, out)?;
        Ok(report)
    }

    fn check_env_file<W: Write>(&self, out: &mut W) -> io::Result<CheckStatus> {
        let name = self.env_file.display();
        if !self.env_file.is_file() {
            writeln!(out, "{} {} file not found", FAIL, name)?;
            writeln!(out)?;
            writeln!(out, "📝 To fix:")?;
            writeln!(out, "   1. Copy {} to {}", self.template.display(), name)?;
            writeln!(out, "   2. Edit {} with your API keys", name)?;
            writeln!(out, "   3. Run this check again")?;
            return Ok(CheckStatus::Failed);
        }
        writeln!(out, "{} {} file found", PASS, name)?;
        Ok(CheckStatus::Passed)
    }

    fn check_resolution<W: Write>(&self, out: &mut W) -> io::Result<Option<ResolvedConfig>> {
        let resolved = Resolver::new(self.env.clone())
            .env_file(&self.env_file)
            .resolve();

        match resolved {
            Ok(config) => {
                writeln!(out, "{} Configuration loaded successfully", PASS)?;
                Ok(Some(config))
            }
            Err(e) if e.is_setup_error() => {
                writeln!(out, "{} Configuration error: {}", FAIL, e)?;
                Ok(None)
            }
            Err(e) => {
                warn!("Unexpected configuration failure: {:?}", e);
                writeln!(out, "{} Unexpected error: {}", FAIL, e)?;
                writeln!(out, "   Details: {:?}", e)?;
                Ok(None)
            }
        }
    }

    fn write_footer<W: Write>(&self, report: &Report, out: &mut W) -> io::Result<()> {
        let rule = "=".repeat(60);
        writeln!(out, "{}", rule)?;
        if report.passed() {
            writeln!(out, "{} ALL CHECKS PASSED!", PASS)?;
            writeln!(out, "{}", rule)?;
            writeln!(out)?;
            writeln!(out, "Next steps:")?;
            writeln!(out, "  1. Run a backtest: MODE=backtest tradebot")?;
            writeln!(out, "  2. Try paper trading: MODE=paper tradebot")?;
            writeln!(
                out,
                "  3. Read {} for every available setting",
                self.template.display()
            )?;
        } else {
            let failed: Vec<String> = report.failures().map(|id| id.to_string()).collect();
            writeln!(
                out,
                "{} {} check(s) failed: {}",
                FAIL,
                failed.len(),
                failed.join(", ")
            )?;
            writeln!(out, "{}", rule)?;
        }
        writeln!(out)?;
        Ok(())
    }
}

fn check_credentials<W: Write>(config: &ResolvedConfig, out: &mut W) -> io::Result<CheckStatus> {
    let broker = config.broker();
    let mut ok = true;

    for (label, value) in [("API Key", &broker.api_key), ("Secret Key", &broker.api_secret)] {
        if is_plausible_credential(value) {
            writeln!(out, "{} Alpaca {} is set", PASS, label)?;
        } else {
            writeln!(out, "{} Alpaca {} is missing or invalid", FAIL, label)?;
            ok = false;
        }
    }

    if ok {
        return Ok(CheckStatus::Passed);
    }

    writeln!(out)?;
    writeln!(out, "📝 To fix:")?;
    writeln!(out, "   1. Go to https://alpaca.markets/")?;
    writeln!(out, "   2. Sign up for paper trading account")?;
    writeln!(out, "   3. Get API keys from dashboard")?;
    writeln!(out, "   4. Add to your environment file")?;
    Ok(CheckStatus::Failed)
}

/// Shallow sanity check; no API call is made
pub fn is_plausible_credential(value: &str) -> bool {
    value.chars().count() > MIN_CREDENTIAL_LEN
}

fn check_mode<W: Write>(mode: TradingMode, out: &mut W) -> io::Result<CheckStatus> {
    match mode {
        TradingMode::Backtest | TradingMode::Paper => {
            writeln!(out, "{} Trading mode: {}", PASS, mode)?;
            Ok(CheckStatus::Passed)
        }
        TradingMode::Live => {
            writeln!(out, "{} Trading mode: {}", PASS, mode)?;
            writeln!(out, "   {} WARNING: Live trading mode - real money at risk!", WARN)?;
            Ok(CheckStatus::Warning)
        }
    }
}

fn check_strategy<W: Write>(config: &ResolvedConfig, out: &mut W) -> io::Result<CheckStatus> {
    let strategy = config.strategy();
    debug!("Strategy review: {} on {} symbol(s)", strategy.name, strategy.symbols.len());

    writeln!(out, "{} Strategy: {}", PASS, strategy.name)?;
    writeln!(out, "{} Symbols: {}", PASS, strategy.symbols_display())?;
    writeln!(out, "{} Initial Cash: {}", PASS, format_usd(config.risk().initial_cash))?;
    Ok(CheckStatus::Passed)
}
