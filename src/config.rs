//! Configuration file support for txdash.
//!
//! Configuration is loaded from `~/.config/txdash/config.toml` with the following precedence:
//! 1. CLI arguments (highest priority)
//! 2. Environment variables
//! 3. Configuration file
//! 4. Default values (lowest priority)
//!
//! # Example Configuration
//!
//! ```toml
//! # ~/.config/txdash/config.toml
//! page_size = 10
//! seed = 42
//! employee_count = 6
//! transaction_count = 120
//! ```

use std::path::PathBuf;

use serde::Deserialize;

/// Default number of transactions per page
pub const DEFAULT_PAGE_SIZE: usize = 5;

/// Main configuration structure.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    /// Transactions per page served by the local feed
    pub page_size: Option<usize>,

    /// Seed for the deterministic demo feed
    pub seed: Option<u64>,

    /// Number of employees in the demo roster
    pub employee_count: Option<usize>,

    /// Total number of transactions in the demo feed
    pub transaction_count: Option<usize>,
}

impl Config {
    /// Load configuration from the default config file path.
    ///
    /// Returns default configuration if file doesn't exist or can't be parsed.
    pub fn load() -> Self {
        let config_path = Self::config_path();

        if !config_path.exists() {
            return Self::default();
        }

        match std::fs::read_to_string(&config_path) {
            Ok(contents) => match toml::from_str(&contents) {
                Ok(config) => config,
                Err(e) => {
                    eprintln!("Warning: Failed to parse config file: {}", e);
                    Self::default()
                }
            },
            Err(e) => {
                eprintln!("Warning: Failed to read config file: {}", e);
                Self::default()
            }
        }
    }

    /// Get the default configuration file path.
    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("txdash")
            .join("config.toml")
    }

    /// Merge with CLI overrides.
    ///
    /// CLI arguments take precedence over config file values.
    pub fn with_overrides(mut self, page_size: Option<usize>, seed: Option<u64>) -> Self {
        if page_size.is_some() {
            self.page_size = page_size;
        }
        if seed.is_some() {
            self.seed = seed;
        }
        self
    }

    /// Get the page size, falling back to environment variable or default.
    pub fn page_size(&self) -> usize {
        self.page_size
            .or_else(|| {
                std::env::var("TXDASH_PAGE_SIZE")
                    .ok()
                    .and_then(|v| v.parse().ok())
            })
            .unwrap_or(DEFAULT_PAGE_SIZE)
    }

    /// Get the demo feed seed.
    pub fn seed(&self) -> u64 {
        self.seed.unwrap_or(1)
    }

    /// Get the number of employees in the demo roster.
    pub fn employee_count(&self) -> usize {
        self.employee_count.unwrap_or(6)
    }

    /// Get the total number of transactions in the demo feed.
    pub fn transaction_count(&self) -> usize {
        self.transaction_count.unwrap_or(60)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert!(config.page_size.is_none());
        assert!(config.seed.is_none());
        assert_eq!(config.employee_count(), 6);
    }

    #[test]
    fn test_parse_config() {
        let toml = r#"
            page_size = 10
            seed = 42
            transaction_count = 120
        "#;

        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.page_size, Some(10));
        assert_eq!(config.seed, Some(42));
        assert_eq!(config.transaction_count(), 120);
    }

    #[test]
    fn test_overrides_take_precedence() {
        let config = Config {
            page_size: Some(10),
            ..Default::default()
        };
        let merged = config.with_overrides(Some(3), None);
        assert_eq!(merged.page_size(), 3);
        assert_eq!(merged.seed(), 1);
    }
}
