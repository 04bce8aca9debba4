use super::error::ConfigError;
use chrono::NaiveDate;

/// Historical range used by backtests
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BacktestWindow {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

impl BacktestWindow {
    pub fn new(start_date: NaiveDate, end_date: NaiveDate) -> Result<Self, ConfigError> {
        if start_date > end_date {
            return Err(ConfigError::InvalidBacktestWindow {
                start: start_date.to_string(),
                end: end_date.to_string(),
            });
        }
        Ok(Self {
            start_date,
            end_date,
        })
    }

    /// Calendar days covered, both ends included
    pub fn days(&self) -> i64 {
        (self.end_date - self.start_date).num_days() + 1
    }

    /// ISO formatted start date, e.g. `2020-01-01`
    pub fn start_iso(&self) -> String {
        self.start_date.format("%Y-%m-%d").to_string()
    }

    pub fn end_iso(&self) -> String {
        self.end_date.format("%Y-%m-%d").to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn test_window_days() {
        let window = BacktestWindow::new(date("2024-01-01"), date("2024-01-31")).unwrap();
        assert_eq!(window.days(), 31);
        assert_eq!(window.start_iso(), "2024-01-01");
    }

    #[test]
    fn test_single_day_window() {
        let window = BacktestWindow::new(date("2024-03-15"), date("2024-03-15")).unwrap();
        assert_eq!(window.days(), 1);
    }

    #[test]
    fn test_inverted_window_rejected() {
        let err = BacktestWindow::new(date("2024-12-31"), date("2020-01-01")).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidBacktestWindow { .. }));
    }
}
