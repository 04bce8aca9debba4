//! Notification channels and market data sources.

/// Where trade alerts are sent
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct NotificationConfig {
    pub slack_webhook: Option<String>,
    pub email_enabled: bool,
    pub email_to: Option<String>,
}

impl NotificationConfig {
    /// At least one channel is configured
    pub fn has_channel(&self) -> bool {
        self.slack_webhook.is_some() || self.email_enabled
    }
}

/// Market data providers
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataSourceConfig {
    pub polygon_api_key: Option<String>,
    pub use_yahoo: bool,
}

impl DataSourceConfig {
    pub fn has_polygon(&self) -> bool {
        self.polygon_api_key.is_some()
    }
}
