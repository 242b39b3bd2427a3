// Configuration sections for the terminal
// Every section falls back to defaults field by field

use serde::{Deserialize, Serialize};

use crate::history::HistoryFilter;
use crate::orderbook::DEFAULT_MAX_LEVELS;

/// Main global configuration structure
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GlobalConfig {
    pub system: SystemConfig,
    pub logging: LoggingConfig,
    pub order_book: OrderBookSettings,
    pub trade_history: TradeHistorySettings,
}

/// System configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SystemConfig {
    pub name: String,
    pub version: String,
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub file: String,
}

/// Order book panel configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OrderBookSettings {
    pub max_levels: usize,
    pub price_precision: u32,
    pub amount_precision: u32,
    pub total_precision: u32,
}

/// Trade history panel configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TradeHistorySettings {
    pub default_filter: HistoryFilter,
    pub date_format: String,
    pub price_precision: u32,
    pub total_precision: u32,
}

impl Default for SystemConfig {
    fn default() -> Self {
        Self {
            name: "Money Matcher".to_string(),
            version: crate::VERSION.to_string(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            file: "money_matcher.log".to_string(),
        }
    }
}

impl Default for OrderBookSettings {
    fn default() -> Self {
        Self {
            max_levels: DEFAULT_MAX_LEVELS,
            price_precision: 2,
            amount_precision: 4,
            total_precision: 2,
        }
    }
}

impl Default for TradeHistorySettings {
    fn default() -> Self {
        Self {
            default_filter: HistoryFilter::All,
            date_format: "%b %d, %Y %-I:%M %p".to_string(),
            price_precision: 2,
            total_precision: 2,
        }
    }
}

impl LoggingConfig {
    pub fn level_filter(&self) -> Option<log::LevelFilter> {
        self.level.parse().ok()
    }
}
