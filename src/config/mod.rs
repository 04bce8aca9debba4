//! Configuration module for the trading bot.
//!
//! Settings come from environment variables, optionally supplemented by a
//! `.env` file. Precedence is: live environment, then the file, then the
//! built-in default. Resolution either yields a fully validated
//! [`ResolvedConfig`] or fails with the first [`ConfigError`] encountered.

mod backtest_config;
mod broker_config;
mod environment;
mod error;
pub mod fields;
mod notification_config;
mod observability_config;
mod risk_config;
mod strategy_config;
mod summary;

pub use backtest_config::BacktestWindow;
pub use broker_config::{BrokerConfig, LIVE_BASE_URL, PAPER_BASE_URL, TradingMode};
pub use environment::{DEFAULT_ENV_FILE, ENV_TEMPLATE_FILE, OverlayStatus, RawEnvironment};
pub use error::ConfigError;
pub use notification_config::{DataSourceConfig, NotificationConfig};
pub use observability_config::{LoggingConfig, MonitoringConfig};
pub use risk_config::RiskConfig;
pub use strategy_config::StrategyConfig;
pub use summary::{format_percent, format_usd};

use fields::*;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Fully validated runtime configuration.
///
/// Only the resolver builds one; collaborators receive it by reference and
/// never mutate it.
#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    broker: BrokerConfig,
    mode: TradingMode,
    risk: RiskConfig,
    strategy: StrategyConfig,
    data_sources: DataSourceConfig,
    notifications: NotificationConfig,
    logging: LoggingConfig,
    backtest_window: BacktestWindow,
    database_url: String,
    monitoring: MonitoringConfig,
}

impl ResolvedConfig {
    pub fn broker(&self) -> &BrokerConfig {
        &self.broker
    }

    pub fn mode(&self) -> TradingMode {
        self.mode
    }

    pub fn risk(&self) -> &RiskConfig {
        &self.risk
    }

    pub fn strategy(&self) -> &StrategyConfig {
        &self.strategy
    }

    pub fn data_sources(&self) -> &DataSourceConfig {
        &self.data_sources
    }

    pub fn notifications(&self) -> &NotificationConfig {
        &self.notifications
    }

    pub fn logging(&self) -> &LoggingConfig {
        &self.logging
    }

    pub fn backtest_window(&self) -> &BacktestWindow {
        &self.backtest_window
    }

    pub fn database_url(&self) -> &str {
        &self.database_url
    }

    pub fn monitoring(&self) -> &MonitoringConfig {
        &self.monitoring
    }

    pub fn monitoring_dsn(&self) -> Option<&str> {
        self.monitoring.dsn.as_deref()
    }

    /// Human readable summary without credentials
    pub fn describe(&self) -> String {
        summary::describe(self)
    }

    /// Log the resolved settings; call once a subscriber is installed
    pub fn log_summary(&self) {
        info!(
            "Configuration resolved: Mode={}, Paper={}, Symbols={:?}",
            self.mode, self.broker.paper_mode, self.strategy.symbols
        );
        if self.mode.is_live() {
            warn!("Live trading mode - real money at risk");
        }
        if !self.broker.has_absolute_base_url() {
            warn!(
                "ALPACA_BASE_URL is not an absolute URL, using it verbatim: {}",
                self.broker.base_url
            );
        }
    }

    fn from_fields(mut fields: ResolvedFields) -> Result<Self, ConfigError> {
        // Required rows are guaranteed present by the resolution loop
        let api_key = fields.text(KEY_API_KEY).unwrap_or_default();
        let api_secret = fields.text(KEY_API_SECRET).unwrap_or_default();
        let mode = fields
            .text(KEY_MODE)
            .unwrap_or_default()
            .parse::<TradingMode>()?;

        let broker = BrokerConfig::new(
            api_key,
            api_secret,
            fields.flag(KEY_PAPER),
            fields.text(KEY_BASE_URL),
        );

        let risk = RiskConfig {
            initial_cash: fields.money(KEY_INITIAL_CASH),
            risk_per_trade: fields.ratio(KEY_RISK_PER_TRADE),
            max_positions: fields.count(KEY_MAX_POSITIONS),
            stop_loss_pct: fields.ratio(KEY_STOP_LOSS_PCT),
            take_profit_pct: fields.ratio(KEY_TAKE_PROFIT_PCT),
        };

        let strategy = StrategyConfig {
            name: fields.text(KEY_STRATEGY_NAME).unwrap_or_default(),
            symbols: fields.list(KEY_SYMBOLS),
            timeframe: fields.text(KEY_TIMEFRAME).unwrap_or_default(),
        };

        let data_sources = DataSourceConfig {
            polygon_api_key: fields.text(KEY_POLYGON_API_KEY),
            use_yahoo: fields.flag(KEY_YAHOO_FINANCE),
        };

        let notifications = NotificationConfig {
            slack_webhook: fields.text(KEY_SLACK_WEBHOOK),
            email_enabled: fields.flag(KEY_EMAIL_ENABLED),
            email_to: fields.text(KEY_EMAIL_TO),
        };

        let logging = LoggingConfig {
            level: fields.text(KEY_LOG_LEVEL).unwrap_or_default(),
            file_path: fields.text(KEY_LOG_FILE).unwrap_or_default(),
        };

        let backtest_window = BacktestWindow::new(
            fields.date(KEY_BACKTEST_START).unwrap_or_default(),
            fields.date(KEY_BACKTEST_END).unwrap_or_default(),
        )?;

        Ok(Self {
            broker,
            mode,
            risk,
            strategy,
            data_sources,
            notifications,
            logging,
            backtest_window,
            database_url: fields.text(KEY_DATABASE_URL).unwrap_or_default(),
            monitoring: MonitoringConfig {
                dsn: fields.text(KEY_SENTRY_DSN),
            },
        })
    }
}

/// Builds a [`ResolvedConfig`] from a base environment plus an optional
/// overlay file.
#[derive(Debug, Clone)]
pub struct Resolver {
    env: RawEnvironment,
    env_file: Option<PathBuf>,
    create_log_dir: bool,
}

impl Resolver {
    pub fn new(env: RawEnvironment) -> Self {
        Self {
            env,
            env_file: Some(PathBuf::from(DEFAULT_ENV_FILE)),
            create_log_dir: true,
        }
    }

    /// Live process environment with the conventional `.env` overlay
    pub fn from_process() -> Self {
        Self::new(RawEnvironment::from_process())
    }

    pub fn env_file(mut self, path: impl AsRef<Path>) -> Self {
        self.env_file = Some(path.as_ref().to_path_buf());
        self
    }

    /// Resolve from the base environment alone
    pub fn without_env_file(mut self) -> Self {
        self.env_file = None;
        self
    }

    /// Skip creating the log directory
    pub fn skip_log_dir(mut self) -> Self {
        self.create_log_dir = false;
        self
    }

    pub fn resolve(self) -> Result<ResolvedConfig, ConfigError> {
        let Resolver {
            mut env,
            env_file,
            create_log_dir,
        } = self;

        if let Some(path) = env_file.as_deref() {
            env.apply_overlay(path)?;
        }

        let fields = ResolvedFields::resolve(FIELDS, &env)?;
        let config = ResolvedConfig::from_fields(fields)?;

        if create_log_dir {
            config.logging.ensure_log_dir()?;
        }

        Ok(config)
    }
}

/// Resolve from the process environment and `./.env`.
///
/// Call once at startup and pass the result to collaborators.
pub fn resolve() -> Result<ResolvedConfig, ConfigError> {
    Resolver::from_process().resolve()
}
