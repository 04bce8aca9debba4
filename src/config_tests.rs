use crate::config::{
    ConfigError, LIVE_BASE_URL, PAPER_BASE_URL, RawEnvironment, ResolvedConfig, Resolver,
    TradingMode,
};
use std::io::Write;
use std::path::Path;

const KEY: &str = "PKABCDEFGHIJKL";
const SECRET: &str = "sk_0123456789abcdef";

fn env_with(extra: &[(&str, &str)]) -> RawEnvironment {
    let mut pairs = vec![("ALPACA_API_KEY", KEY), ("ALPACA_SECRET_KEY", SECRET)];
    pairs.extend_from_slice(extra);
    RawEnvironment::from_pairs(pairs)
}

fn resolve_env(env: RawEnvironment) -> Result<ResolvedConfig, ConfigError> {
    Resolver::new(env).without_env_file().skip_log_dir().resolve()
}

fn write_env_file(dir: &Path, lines: &[&str]) -> std::path::PathBuf {
    let path = dir.join(".env");
    let mut file = std::fs::File::create(&path).unwrap();
    for line in lines {
        writeln!(file, "{}", line).unwrap();
    }
    path
}

#[test]
fn test_live_environment_wins_over_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_env_file(dir.path(), &["MODE=paper", "MAX_POSITIONS=3"]);

    let config = Resolver::new(env_with(&[("MODE", "live")]))
        .env_file(&path)
        .skip_log_dir()
        .resolve()
        .unwrap();

    assert_eq!(config.mode(), TradingMode::Live);
    assert_eq!(config.risk().max_positions, 3);
}

#[test]
fn test_file_wins_over_default() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_env_file(dir.path(), &["# overlay", "STRATEGY_NAME=MeanReversion"]);

    let config = Resolver::new(env_with(&[]))
        .env_file(&path)
        .skip_log_dir()
        .resolve()
        .unwrap();

    assert_eq!(config.strategy().name, "MeanReversion");
}

#[test]
fn test_default_used_when_neither_sets_value() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_env_file(dir.path(), &["STRATEGY_NAME=MeanReversion"]);

    let config = Resolver::new(env_with(&[]))
        .env_file(&path)
        .skip_log_dir()
        .resolve()
        .unwrap();

    assert_eq!(config.strategy().timeframe, "1Day");
    assert_eq!(config.mode(), TradingMode::Backtest);
}

#[test]
fn test_credentials_can_come_from_file_only() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_env_file(
        dir.path(),
        &["ALPACA_API_KEY=PKFROMFILE12345", "ALPACA_SECRET_KEY=SECRETFROMFILE1"],
    );

    let config = Resolver::new(RawEnvironment::default())
        .env_file(&path)
        .skip_log_dir()
        .resolve()
        .unwrap();

    assert_eq!(config.broker().api_key, "PKFROMFILE12345");
}

#[test]
fn test_missing_env_file_is_not_fatal() {
    let dir = tempfile::tempdir().unwrap();
    let config = Resolver::new(env_with(&[]))
        .env_file(dir.path().join("does-not-exist.env"))
        .skip_log_dir()
        .resolve();

    assert!(config.is_ok());
}

#[test]
fn test_missing_key_regardless_of_secret() {
    for env in [
        RawEnvironment::default(),
        RawEnvironment::from_pairs([("ALPACA_SECRET_KEY", SECRET)]),
    ] {
        let err = resolve_env(env).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::MissingRequiredValue {
                key: "ALPACA_API_KEY",
                ..
            }
        ));
        assert!(err.to_string().contains("ALPACA_API_KEY"));
    }
}

#[test]
fn test_invalid_modes_are_rejected() {
    for mode in ["", "LIVE", "Paper", "production", "back test"] {
        let err = resolve_env(env_with(&[("MODE", mode)])).unwrap_err();
        match err {
            ConfigError::InvalidEnumValue { value, allowed, .. } => {
                assert_eq!(value, mode);
                assert!(allowed.contains("'backtest'"));
            }
            other => panic!("Expected InvalidEnumValue for {:?}, got {:?}", mode, other),
        }
    }
}

#[test]
fn test_base_url_derivation() {
    let paper = resolve_env(env_with(&[("ALPACA_PAPER", "true")])).unwrap();
    assert_eq!(paper.broker().base_url, PAPER_BASE_URL);

    let live = resolve_env(env_with(&[("ALPACA_PAPER", "False")])).unwrap();
    assert!(!live.broker().paper_mode);
    assert_eq!(live.broker().base_url, LIVE_BASE_URL);

    let explicit = "https://custom.example.com";
    for paper in ["true", "false"] {
        let config = resolve_env(env_with(&[
            ("ALPACA_PAPER", paper),
            ("ALPACA_BASE_URL", explicit),
        ]))
        .unwrap();
        assert_eq!(config.broker().base_url, explicit);
    }
}

#[test]
fn test_symbols_parsing() {
    let config = resolve_env(env_with(&[("SYMBOLS", "SPY,QQQ,IWM")])).unwrap();
    assert_eq!(config.strategy().symbols, vec!["SPY", "QQQ", "IWM"]);

    let config = resolve_env(env_with(&[("SYMBOLS", "TSLA")])).unwrap();
    assert_eq!(config.strategy().symbols, vec!["TSLA"]);
}

#[test]
fn test_empty_symbols_resolve_to_empty_list() {
    let config = resolve_env(env_with(&[("SYMBOLS", "")])).unwrap();
    assert!(config.strategy().symbols.is_empty());
    assert!(config.describe().contains("Symbols: (none)"));
}

#[test]
fn test_malformed_number_propagates() {
    let err = resolve_env(env_with(&[("INITIAL_CASH", "a lot")])).unwrap_err();
    assert!(matches!(
        err,
        ConfigError::MalformedValue {
            key: "INITIAL_CASH",
            ..
        }
    ));
    assert!(!err.is_setup_error());
}

#[test]
fn test_describe_never_leaks_credentials() {
    let cases: &[&[(&str, &str)]] = &[
        &[],
        &[("MODE", "live"), ("ALPACA_PAPER", "false")],
        &[("SLACK_WEBHOOK_URL", "https://hooks.slack.com/x"), ("SYMBOLS", "")],
        &[("EMAIL_NOTIFICATIONS", "TRUE"), ("STRATEGY_NAME", KEY)],
    ];

    for extra in cases {
        let config = resolve_env(env_with(extra)).unwrap();
        let summary = config.describe();
        assert!(!summary.contains(SECRET));
        // The key only shows up if the operator reused it as a strategy name
        if !extra.iter().any(|(_, v)| *v == KEY) {
            assert!(!summary.contains(KEY));
        }
    }
}

#[test]
fn test_describe_contents() {
    let config = resolve_env(env_with(&[])).unwrap();
    let summary = config.describe();

    assert!(summary.contains("Mode: backtest"));
    assert!(summary.contains("Alpaca Paper Trading: true"));
    assert!(summary.contains("Initial Cash: $100,000.00"));
    assert!(summary.contains("Risk Per Trade: 2.0%"));
    assert!(summary.contains("Max Positions: 10"));
    assert!(summary.contains("Strategy: MyStrategy"));
    assert!(summary.contains("Symbols: SPY, QQQ, IWM"));
    assert!(summary.contains("Timeframe: 1Day"));
    assert!(summary.contains("Notifications: Disabled"));

    // Deterministic
    assert_eq!(summary, config.describe());
}

#[test]
fn test_describe_layout() {
    let config = resolve_env(env_with(&[])).unwrap();
    let summary = config.describe();
    let lines: Vec<&str> = summary.lines().collect();
    let rule = "=".repeat(60);

    assert_eq!(lines.len(), 13);
    assert_eq!(lines[0], rule);
    assert_eq!(lines[1], "Trading Bot Configuration");
    assert_eq!(lines[2], rule);
    assert_eq!(lines[3], "Mode: backtest");
    assert_eq!(lines[11], "Notifications: Disabled");
    assert_eq!(lines[12], rule);
    assert!(summary.ends_with('\n'));
}

#[test]
fn test_notifications_enabled_in_summary() {
    let config = resolve_env(env_with(&[("EMAIL_NOTIFICATIONS", "TRUE")])).unwrap();
    assert!(config.describe().contains("Notifications: Enabled"));
}

#[test]
fn test_empty_log_file_is_rejected() {
    let err = resolve_env(env_with(&[("LOG_FILE", "")])).unwrap_err();
    assert_eq!(err.key(), Some("LOG_FILE"));
    assert!(!err.is_setup_error());
}

#[test]
fn test_log_directory_is_created() {
    let dir = tempfile::tempdir().unwrap();
    let log_file = dir.path().join("logs").join("trading.log");

    let env = env_with(&[("LOG_FILE", log_file.to_str().unwrap())]);
    Resolver::new(env.clone()).without_env_file().resolve().unwrap();
    // Second run with the directory already present
    Resolver::new(env).without_env_file().resolve().unwrap();

    assert!(dir.path().join("logs").is_dir());
    assert!(!log_file.exists());
}
