//! Broker configuration and trading mode.
//!
//! The base URL is derived from the paper flag unless the operator set one
//! explicitly, in which case it is used verbatim.

use super::error::ConfigError;
use super::fields::{ALLOWED_MODES, KEY_MODE, describe_allowed};
use std::fmt;
use std::str::FromStr;

/// Alpaca sandbox (paper trading) endpoint
pub const PAPER_BASE_URL: &str = "https://paper-api.alpaca.markets";

/// Alpaca production endpoint
pub const LIVE_BASE_URL: &str = "https://api.alpaca.markets";

/// How the bot is run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TradingMode {
    #[default]
    Backtest,
    Paper,
    Live,
}

impl TradingMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            TradingMode::Backtest => "backtest",
            TradingMode::Paper => "paper",
            TradingMode::Live => "live",
        }
    }

    /// Real capital is at risk
    pub fn is_live(&self) -> bool {
        matches!(self, TradingMode::Live)
    }
}

impl FromStr for TradingMode {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "backtest" => Ok(TradingMode::Backtest),
            "paper" => Ok(TradingMode::Paper),
            "live" => Ok(TradingMode::Live),
            _ => Err(ConfigError::InvalidEnumValue {
                key: KEY_MODE,
                value: s.to_string(),
                allowed: describe_allowed(ALLOWED_MODES),
            }),
        }
    }
}

impl fmt::Display for TradingMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Alpaca API configuration
#[derive(Clone, PartialEq)]
pub struct BrokerConfig {
    pub api_key: String,
    pub api_secret: String,
    pub paper_mode: bool,
    pub base_url: String,
}

impl BrokerConfig {
    pub fn new(
        api_key: String,
        api_secret: String,
        paper_mode: bool,
        explicit_base_url: Option<String>,
    ) -> Self {
        let base_url = explicit_base_url.unwrap_or_else(|| default_base_url(paper_mode).to_string());
        Self {
            api_key,
            api_secret,
            paper_mode,
            base_url,
        }
    }

    /// True when the URL points at the sandbox endpoint
    pub fn is_sandbox_url(&self) -> bool {
        self.base_url.trim_end_matches('/') == PAPER_BASE_URL
    }

    /// Whether the base URL parses with a scheme; it is used as given either way
    pub fn has_absolute_base_url(&self) -> bool {
        url::Url::parse(&self.base_url).is_ok()
    }
}

// Credentials never show up in debug output
impl fmt::Debug for BrokerConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BrokerConfig")
            .field("api_key", &"<redacted>")
            .field("api_secret", &"<redacted>")
            .field("paper_mode", &self.paper_mode)
            .field("base_url", &self.base_url)
            .finish()
    }
}

pub fn default_base_url(paper_mode: bool) -> &'static str {
    if paper_mode {
        PAPER_BASE_URL
    } else {
        LIVE_BASE_URL
    }
}
