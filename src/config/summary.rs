//! Operator-facing configuration summary.

use super::ResolvedConfig;
use rust_decimal::Decimal;

const RULE_WIDTH: usize = 60;

pub(crate) fn rule() -> String {
    "=".repeat(RULE_WIDTH)
}

/// Render the key settings. Credentials are never included.
pub(crate) fn describe(config: &ResolvedConfig) -> String {
    let rule = rule();
    let notifications = if config.notifications().has_channel() {
        "Enabled"
    } else {
        "Disabled"
    };

    let lines = [
        rule.clone(),
        "Trading Bot Configuration".to_string(),
        rule.clone(),
        format!("Mode: {}", config.mode()),
        format!("Alpaca Paper Trading: {}", config.broker().paper_mode),
        format!("Initial Cash: {}", format_usd(config.risk().initial_cash)),
        format!("Risk Per Trade: {}", format_percent(config.risk().risk_per_trade)),
        format!("Max Positions: {}", config.risk().max_positions),
        format!("Strategy: {}", config.strategy().name),
        format!("Symbols: {}", config.strategy().symbols_display()),
        format!("Timeframe: {}", config.strategy().timeframe),
        format!("Notifications: {}", notifications),
        rule,
    ];

    let mut out = lines.join("\n");
    out.push('\n');
    out
}

/// `$100,000.00`
pub fn format_usd(amount: Decimal) -> String {
    let rounded = amount.round_dp(2);
    let sign = if rounded.is_sign_negative() { "-" } else { "" };
    let text = format!("{:.2}", rounded.abs());
    let (whole, frac) = text.split_once('.').unwrap_or((text.as_str(), "00"));

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, ch) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    format!("{}${}.{}", sign, grouped, frac)
}

/// `0.02` -> `2.0%`
pub fn format_percent(ratio: f64) -> String {
    format!("{:.1}%", ratio * 100.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_format_usd() {
        assert_eq!(format_usd(dec!(100000)), "$100,000.00");
        assert_eq!(format_usd(dec!(1234567.891)), "$1,234,567.89");
        assert_eq!(format_usd(dec!(999.5)), "$999.50");
        assert_eq!(format_usd(dec!(0.1)), "$0.10");
    }

    #[test]
    fn test_format_percent() {
        assert_eq!(format_percent(0.02), "2.0%");
        assert_eq!(format_percent(0.125), "12.5%");
        assert_eq!(format_percent(1.0), "100.0%");
    }

    #[test]
    fn test_rule_width() {
        assert_eq!(rule().len(), 60);
    }
}
