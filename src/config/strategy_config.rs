//! Strategy selection.

/// Which strategy runs, on what, and at which bar size
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StrategyConfig {
    pub name: String,
    /// Traded symbols in the order they were configured
    pub symbols: Vec<String>,
    pub timeframe: String,
}

impl StrategyConfig {
    pub fn has_symbols(&self) -> bool {
        !self.symbols.is_empty()
    }

    /// `SPY, QQQ, IWM`, or `(none)` for an empty list
    pub fn symbols_display(&self) -> String {
        if self.symbols.is_empty() {
            "(none)".to_string()
        } else {
            self.symbols.join(", ")
        }
    }
}
