//! Risk management parameters.

use rust_decimal::Decimal;

/// Position sizing and exit parameters
///
/// # Invariants
///
/// - `initial_cash` > 0
/// - `risk_per_trade` and `stop_loss_pct` in (0, 1]
/// - `max_positions` > 0
/// - `take_profit_pct` > 0
#[derive(Debug, Clone, PartialEq)]
pub struct RiskConfig {
    /// Starting account value in USD
    pub initial_cash: Decimal,

    /// Fraction of equity risked per trade (e.g., 0.02 = 2%)
    pub risk_per_trade: f64,

    pub max_positions: usize,

    /// Stop distance as a fraction of entry price
    pub stop_loss_pct: f64,

    /// Profit target as a fraction of entry price
    pub take_profit_pct: f64,
}

impl RiskConfig {
    /// Largest dollar amount a single trade may lose at the initial cash level
    pub fn max_risk_per_trade_usd(&self) -> Decimal {
        Decimal::try_from(self.risk_per_trade)
            .map(|r| (self.initial_cash * r).round_dp(2))
            .unwrap_or(Decimal::ZERO)
    }

    /// Reward to risk ratio implied by the stop and target
    pub fn reward_risk_ratio(&self) -> f64 {
        self.take_profit_pct / self.stop_loss_pct
    }
}
