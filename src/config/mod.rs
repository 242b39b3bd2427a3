// Configuration module for the terminal's view-model settings
// Loaded from a TOML file, validated, with fallback to defaults

use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

pub mod system_config;

pub use system_config::*;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parsing error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("TOML serialization error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    #[error("Configuration file not found: {0}")]
    FileNotFound(String),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Configuration manager
pub struct ConfigManager {
    config_path: PathBuf,
    global_config: GlobalConfig,
    loaded: bool,
}

impl ConfigManager {
    /// Create new configuration manager with default path
    pub fn new() -> Self {
        Self::with_path("config.toml")
    }

    /// Create configuration manager with custom path
    pub fn with_path<P: AsRef<Path>>(path: P) -> Self {
        Self {
            config_path: path.as_ref().to_path_buf(),
            global_config: GlobalConfig::default(),
            loaded: false,
        }
    }

    /// Load and validate the configuration file
    pub fn load(&mut self) -> Result<(), ConfigError> {
        let config = self.load_global_config()?;
        validate(&config)?;

        log::info!("Loaded configuration from {}", self.config_path.display());
        self.global_config = config;
        self.loaded = true;
        Ok(())
    }

    /// Load with fallback to defaults if the file is missing or invalid
    pub fn load_or_default(&mut self) -> &Self {
        if let Err(e) = self.load() {
            log::warn!("Failed to load config, using defaults: {}", e);
            self.global_config = GlobalConfig::default();
            self.loaded = true;
        }
        self
    }

    /// Get global configuration
    pub fn global(&self) -> &GlobalConfig {
        &self.global_config
    }

    /// Get mutable global configuration
    pub fn global_mut(&mut self) -> &mut GlobalConfig {
        &mut self.global_config
    }

    pub fn path(&self) -> &Path {
        &self.config_path
    }

    /// Save current configuration
    pub fn save(&self) -> Result<(), ConfigError> {
        validate(&self.global_config)?;
        let toml_str = toml::to_string_pretty(&self.global_config)?;

        // Create directory if it doesn't exist
        if let Some(parent) = self.config_path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        fs::write(&self.config_path, toml_str)?;
        Ok(())
    }

    /// Check if configuration is loaded
    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    /// Reload configuration from disk
    pub fn reload(&mut self) -> Result<(), ConfigError> {
        self.loaded = false;
        self.load()
    }

    fn load_global_config(&self) -> Result<GlobalConfig, ConfigError> {
        let content = fs::read_to_string(&self.config_path)
            .map_err(|_| ConfigError::FileNotFound(self.config_path.display().to_string()))?;
        toml::from_str(&content).map_err(ConfigError::from)
    }
}

impl Default for ConfigManager {
    fn default() -> Self {
        Self::new()
    }
}

/// Validate value ranges that serde cannot express
pub fn validate(config: &GlobalConfig) -> Result<(), ConfigError> {
    if config.order_book.max_levels == 0 {
        return Err(ConfigError::Invalid(
            "order_book.max_levels must be at least 1".to_string(),
        ));
    }

    if config.logging.level_filter().is_none() {
        return Err(ConfigError::Invalid(format!(
            "Unknown log level '{}'",
            config.logging.level
        )));
    }

    if config.trade_history.date_format.trim().is_empty() {
        return Err(ConfigError::Invalid(
            "trade_history.date_format must not be empty".to_string(),
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::history::HistoryFilter;

    #[test]
    fn test_partial_file_uses_defaults() {
        let config: GlobalConfig = toml::from_str(
            r#"
            [order_book]
            max_levels = 10

            [trade_history]
            default_filter = "open_orders"
            "#,
        )
        .unwrap();

        assert_eq!(config.order_book.max_levels, 10);
        assert_eq!(config.order_book.price_precision, 2);
        assert_eq!(config.trade_history.default_filter, HistoryFilter::OpenOrders);
        assert_eq!(config.logging, LoggingConfig::default());
    }

    #[test]
    fn test_unknown_filter_rejected_by_parser() {
        let result: Result<GlobalConfig, _> = toml::from_str(
            r#"
            [trade_history]
            default_filter = "everything"
            "#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_validation() {
        let mut config = GlobalConfig::default();
        assert!(validate(&config).is_ok());

        config.order_book.max_levels = 0;
        assert!(matches!(validate(&config), Err(ConfigError::Invalid(_))));

        config.order_book.max_levels = 7;
        config.logging.level = "loud".to_string();
        assert!(matches!(validate(&config), Err(ConfigError::Invalid(_))));
    }
}
