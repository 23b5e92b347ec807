/// Configuration for the history system.
use calc_pad_config::AppConfig;

/// Default number of decimal places for printed values.
const DEFAULT_PRECISION: usize = 2;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryConfig {
    /// Decimal places for operands and results.
    pub precision: usize,
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            precision: DEFAULT_PRECISION,
        }
    }
}

impl From<&AppConfig> for HistoryConfig {
    fn from(app: &AppConfig) -> Self {
        Self {
            precision: app.precision,
        }
    }
}
