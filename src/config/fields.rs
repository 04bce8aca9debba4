//! Declarative field table and the single loop that resolves it.
//!
//! Adding a setting means adding a row to [`FIELDS`]; the loop handles
//! lookup, defaults, coercion and per-field checks. Rows are processed in
//! table order and the first failure is returned.

use super::environment::RawEnvironment;
use super::error::ConfigError;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use std::collections::HashMap;
use std::str::FromStr;

pub const KEY_API_KEY: &str = "ALPACA_API_KEY";
pub const KEY_API_SECRET: &str = "ALPACA_SECRET_KEY";
pub const KEY_MODE: &str = "MODE";
pub const KEY_PAPER: &str = "ALPACA_PAPER";
pub const KEY_BASE_URL: &str = "ALPACA_BASE_URL";
pub const KEY_INITIAL_CASH: &str = "INITIAL_CASH";
pub const KEY_RISK_PER_TRADE: &str = "RISK_PER_TRADE";
pub const KEY_MAX_POSITIONS: &str = "MAX_POSITIONS";
pub const KEY_STOP_LOSS_PCT: &str = "STOP_LOSS_PCT";
pub const KEY_TAKE_PROFIT_PCT: &str = "TAKE_PROFIT_PCT";
pub const KEY_STRATEGY_NAME: &str = "STRATEGY_NAME";
pub const KEY_SYMBOLS: &str = "SYMBOLS";
pub const KEY_TIMEFRAME: &str = "TIMEFRAME";
pub const KEY_POLYGON_API_KEY: &str = "POLYGON_API_KEY";
pub const KEY_YAHOO_FINANCE: &str = "YAHOO_FINANCE";
pub const KEY_SLACK_WEBHOOK: &str = "SLACK_WEBHOOK_URL";
pub const KEY_EMAIL_ENABLED: &str = "EMAIL_NOTIFICATIONS";
pub const KEY_EMAIL_TO: &str = "EMAIL_TO";
pub const KEY_LOG_LEVEL: &str = "LOG_LEVEL";
pub const KEY_LOG_FILE: &str = "LOG_FILE";
pub const KEY_BACKTEST_START: &str = "BACKTEST_START_DATE";
pub const KEY_BACKTEST_END: &str = "BACKTEST_END_DATE";
pub const KEY_DATABASE_URL: &str = "DATABASE_URL";
pub const KEY_SENTRY_DSN: &str = "SENTRY_DSN";

pub const ALLOWED_MODES: &[&str] = &["backtest", "paper", "live"];

const KEY_REMEDIATION: &str = "Please copy .env.example to .env and fill in your API keys.\n\
     Get keys from: https://alpaca.markets/";
const SECRET_REMEDIATION: &str =
    "Please copy .env.example to .env and fill in your API keys.";

/// Target type of a field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    /// Case-insensitive comparison against `"true"`
    Flag,
    Count,
    Ratio,
    Money,
    /// Comma separated, trimmed, blank entries dropped
    List,
    Date,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Requirement {
    Required { remediation: &'static str },
    Default(&'static str),
    Optional,
}

/// Constraint applied after coercion
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Check {
    None,
    OneOf(&'static [&'static str]),
    Positive,
    /// (0, 1]
    UnitInterval,
    NonEmpty,
}

#[derive(Debug, Clone, Copy)]
pub struct FieldSpec {
    pub key: &'static str,
    pub kind: FieldKind,
    pub requirement: Requirement,
    pub check: Check,
}

const fn field(
    key: &'static str,
    kind: FieldKind,
    requirement: Requirement,
    check: Check,
) -> FieldSpec {
    FieldSpec {
        key,
        kind,
        requirement,
        check,
    }
}

use Check as C;
use FieldKind as K;
use Requirement as R;

/// Every setting the bot reads, in validation order
pub const FIELDS: &[FieldSpec] = &[
    field(KEY_API_KEY, K::Text, R::Required { remediation: KEY_REMEDIATION }, C::None),
    field(KEY_API_SECRET, K::Text, R::Required { remediation: SECRET_REMEDIATION }, C::None),
    field(KEY_MODE, K::Text, R::Default("backtest"), C::OneOf(ALLOWED_MODES)),
    field(KEY_PAPER, K::Flag, R::Default("True"), C::None),
    field(KEY_BASE_URL, K::Text, R::Optional, C::None),
    field(KEY_INITIAL_CASH, K::Money, R::Default("100000"), C::Positive),
    field(KEY_RISK_PER_TRADE, K::Ratio, R::Default("0.02"), C::UnitInterval),
    field(KEY_MAX_POSITIONS, K::Count, R::Default("10"), C::Positive),
    field(KEY_STOP_LOSS_PCT, K::Ratio, R::Default("0.05"), C::UnitInterval),
    field(KEY_TAKE_PROFIT_PCT, K::Ratio, R::Default("0.10"), C::Positive),
    field(KEY_STRATEGY_NAME, K::Text, R::Default("MyStrategy"), C::None),
    field(KEY_SYMBOLS, K::List, R::Default("SPY,QQQ,IWM"), C::None),
    field(KEY_TIMEFRAME, K::Text, R::Default("1Day"), C::None),
    field(KEY_POLYGON_API_KEY, K::Text, R::Optional, C::None),
    field(KEY_YAHOO_FINANCE, K::Flag, R::Default("true"), C::None),
    field(KEY_SLACK_WEBHOOK, K::Text, R::Optional, C::None),
    field(KEY_EMAIL_ENABLED, K::Flag, R::Default("false"), C::None),
    field(KEY_EMAIL_TO, K::Text, R::Optional, C::None),
    field(KEY_LOG_LEVEL, K::Text, R::Default("INFO"), C::None),
    field(KEY_LOG_FILE, K::Text, R::Default("logs/trading.log"), C::NonEmpty),
    field(KEY_BACKTEST_START, K::Date, R::Default("2020-01-01"), C::None),
    field(KEY_BACKTEST_END, K::Date, R::Default("2024-12-31"), C::None),
    field(KEY_DATABASE_URL, K::Text, R::Default("sqlite:///trading.db"), C::None),
    field(KEY_SENTRY_DSN, K::Text, R::Optional, C::None),
];

/// A coerced field value
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Text(String),
    Flag(bool),
    Count(usize),
    Ratio(f64),
    Money(Decimal),
    List(Vec<String>),
    Date(NaiveDate),
}

/// Output of the resolution loop, keyed by environment key.
///
/// Optional fields that were absent have no entry.
#[derive(Debug, Default)]
pub struct ResolvedFields {
    values: HashMap<&'static str, Value>,
}

impl ResolvedFields {
    /// Run every row of `table` against `env`
    pub fn resolve(table: &[FieldSpec], env: &RawEnvironment) -> Result<Self, ConfigError> {
        let mut values = HashMap::with_capacity(table.len());
        for spec in table {
            if let Some(value) = resolve_field(spec, env)? {
                values.insert(spec.key, value);
            }
        }
        Ok(Self { values })
    }

    pub fn text(&mut self, key: &'static str) -> Option<String> {
        match self.values.remove(key) {
            Some(Value::Text(s)) => Some(s),
            _ => None,
        }
    }

    pub fn flag(&self, key: &'static str) -> bool {
        matches!(self.values.get(key), Some(Value::Flag(true)))
    }

    pub fn count(&self, key: &'static str) -> usize {
        match self.values.get(key) {
            Some(Value::Count(n)) => *n,
            _ => 0,
        }
    }

    pub fn ratio(&self, key: &'static str) -> f64 {
        match self.values.get(key) {
            Some(Value::Ratio(r)) => *r,
            _ => 0.0,
        }
    }

    pub fn money(&self, key: &'static str) -> Decimal {
        match self.values.get(key) {
            Some(Value::Money(d)) => *d,
            _ => Decimal::ZERO,
        }
    }

    pub fn list(&mut self, key: &'static str) -> Vec<String> {
        match self.values.remove(key) {
            Some(Value::List(items)) => items,
            _ => Vec::new(),
        }
    }

    pub fn date(&self, key: &'static str) -> Option<NaiveDate> {
        match self.values.get(key) {
            Some(Value::Date(d)) => Some(*d),
            _ => None,
        }
    }
}

fn resolve_field(spec: &FieldSpec, env: &RawEnvironment) -> Result<Option<Value>, ConfigError> {
    let raw = match (env.get(spec.key), spec.requirement) {
        // Required and optional values follow truthiness: empty means unset
        (Some(v), R::Required { .. } | R::Optional) if v.is_empty() => None,
        (Some(v), _) => Some(v),
        (None, R::Default(default)) => Some(default),
        (None, _) => None,
    };

    let Some(raw) = raw else {
        return match spec.requirement {
            R::Required { remediation } => Err(ConfigError::MissingRequiredValue {
                key: spec.key,
                remediation,
            }),
            _ => Ok(None),
        };
    };

    let value = coerce(spec, raw)?;
    apply_check(spec, raw, &value)?;
    Ok(Some(value))
}

fn coerce(spec: &FieldSpec, raw: &str) -> Result<Value, ConfigError> {
    let malformed = |expected: &'static str| ConfigError::MalformedValue {
        key: spec.key,
        value: raw.to_string(),
        expected,
    };

    let value = match spec.kind {
        K::Text => Value::Text(raw.to_string()),
        K::Flag => Value::Flag(raw.to_lowercase() == "true"),
        K::Count => Value::Count(
            raw.trim()
                .parse::<usize>()
                .map_err(|_| malformed("integer"))?,
        ),
        K::Ratio => {
            let v = raw.trim().parse::<f64>().map_err(|_| malformed("number"))?;
            if !v.is_finite() {
                return Err(malformed("number"));
            }
            Value::Ratio(v)
        }
        K::Money => Value::Money(
            Decimal::from_str(raw.trim())
                .or_else(|_| Decimal::from_scientific(raw.trim()))
                .map_err(|_| malformed("amount"))?,
        ),
        K::List => Value::List(split_list(raw)),
        K::Date => Value::Date(
            NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
                .map_err(|_| malformed("date (YYYY-MM-DD)"))?,
        ),
    };
    Ok(value)
}

fn apply_check(spec: &FieldSpec, raw: &str, value: &Value) -> Result<(), ConfigError> {
    let out_of_range = |constraint: &'static str| ConfigError::OutOfRange {
        key: spec.key,
        value: raw.to_string(),
        constraint,
    };

    match (spec.check, value) {
        (C::None, _) => Ok(()),
        (C::OneOf(allowed), Value::Text(s)) => {
            if allowed.contains(&s.as_str()) {
                Ok(())
            } else {
                Err(ConfigError::InvalidEnumValue {
                    key: spec.key,
                    value: s.clone(),
                    allowed: describe_allowed(allowed),
                })
            }
        }
        (C::Positive, Value::Count(n)) if *n == 0 => Err(out_of_range("greater than 0")),
        (C::Positive, Value::Ratio(r)) if *r <= 0.0 => Err(out_of_range("greater than 0")),
        (C::Positive, Value::Money(d)) if *d <= Decimal::ZERO => {
            Err(out_of_range("greater than 0"))
        }
        (C::UnitInterval, Value::Ratio(r)) if !(*r > 0.0 && *r <= 1.0) => {
            Err(out_of_range("in the range (0, 1]"))
        }
        (C::NonEmpty, Value::Text(s)) if s.trim().is_empty() => Err(out_of_range("non-empty")),
        _ => Ok(()),
    }
}

/// Split a comma separated list. Blank entries are dropped, so an empty
/// string yields an empty list.
pub fn split_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// Render `["a", "b", "c"]` as `'a', 'b', or 'c'`
pub(crate) fn describe_allowed(allowed: &[&str]) -> String {
    let quoted: Vec<String> = allowed.iter().map(|a| format!("'{}'", a)).collect();
    match quoted.as_slice() {
        [] => String::new(),
        [one] => one.clone(),
        [init @ .., last] => format!("{}, or {}", init.join(", "), last),
    }
}
