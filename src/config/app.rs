//! Main application configuration
//!
//! This module defines the primary configuration structures for the team
//! balancer, including environment variable and TOML file loading and validation.

use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::path::{Path, PathBuf};

use crate::config::{BalanceConfig, RatingConfig};
use crate::types::BalanceMode;

/// Main application configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub service: ServiceSettings,
    pub data: DataSettings,
    pub rating: RatingConfig,
    pub balance: BalanceConfig,
}

/// Service-level settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceSettings {
    /// Name used in log output
    pub name: String,
    /// Log level (trace, debug, info, warn, error)
    pub log_level: String,
}

/// Locations of the match log and roster directory
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DataSettings {
    pub matches_path: PathBuf,
    pub roster_path: PathBuf,
}

impl Default for ServiceSettings {
    fn default() -> Self {
        Self {
            name: "team-balancer".to_string(),
            log_level: "info".to_string(),
        }
    }
}

impl Default for DataSettings {
    fn default() -> Self {
        Self {
            matches_path: PathBuf::from("data/matches.json"),
            roster_path: PathBuf::from("data/players.json"),
        }
    }
}

impl AppConfig {
    /// Load configuration from environment variables with fallback to defaults
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();
        config.apply_env()?;
        validate_config(&config)?;
        Ok(config)
    }

    /// Load configuration from a TOML file; environment variables still win
    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let mut config: AppConfig = toml::from_str(&contents)
            .with_context(|| format!("Invalid config file {}", path.display()))?;

        config.apply_env()?;
        validate_config(&config)?;
        Ok(config)
    }

    fn apply_env(&mut self) -> Result<()> {
        // Service settings
        if let Ok(name) = env::var("SERVICE_NAME") {
            self.service.name = name;
        }
        if let Ok(log_level) = env::var("LOG_LEVEL") {
            self.service.log_level = log_level;
        }

        // Data sources
        if let Ok(path) = env::var("MATCHES_PATH") {
            self.data.matches_path = PathBuf::from(path);
        }
        if let Ok(path) = env::var("ROSTER_PATH") {
            self.data.roster_path = PathBuf::from(path);
        }

        // Rating settings
        if let Ok(rating) = env::var("INITIAL_RATING") {
            self.rating.initial_rating = rating
                .parse()
                .map_err(|_| anyhow!("Invalid INITIAL_RATING value: {}", rating))?;
        }
        if let Ok(uncertainty) = env::var("INITIAL_UNCERTAINTY") {
            self.rating.initial_uncertainty = uncertainty
                .parse()
                .map_err(|_| anyhow!("Invalid INITIAL_UNCERTAINTY value: {}", uncertainty))?;
        }
        if let Ok(beta) = env::var("RATING_BETA") {
            self.rating.beta = beta
                .parse()
                .map_err(|_| anyhow!("Invalid RATING_BETA value: {}", beta))?;
        }

        // Balance settings
        if let Ok(budget) = env::var("ENUMERATION_BUDGET") {
            self.balance.enumeration_budget = budget
                .parse()
                .map_err(|_| anyhow!("Invalid ENUMERATION_BUDGET value: {}", budget))?;
        }
        if let Ok(powerplay) = env::var("POWERPLAY") {
            let powerplay: bool = powerplay
                .parse()
                .map_err(|_| anyhow!("Invalid POWERPLAY value: {}", powerplay))?;
            self.balance.default_mode = if powerplay {
                BalanceMode::PlayAll
            } else {
                BalanceMode::Rotation
            };
        }

        Ok(())
    }
}

/// Validate configuration values
pub fn validate_config(config: &AppConfig) -> Result<()> {
    // Validate log level
    match config.service.log_level.to_lowercase().as_str() {
        "trace" | "debug" | "info" | "warn" | "error" => {}
        _ => return Err(anyhow!("Invalid log level: {}", config.service.log_level)),
    }

    if config.data.matches_path.as_os_str().is_empty() {
        return Err(anyhow!("Matches path cannot be empty"));
    }
    if config.data.roster_path.as_os_str().is_empty() {
        return Err(anyhow!("Roster path cannot be empty"));
    }

    config.rating.validate()?;
    config.balance.validate()?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = AppConfig::default();
        assert!(validate_config(&config).is_ok());
        assert_eq!(config.balance.enumeration_budget, 3000);
        assert_eq!(config.data.matches_path, PathBuf::from("data/matches.json"));
    }

    #[test]
    fn test_invalid_log_level() {
        let mut config = AppConfig::default();
        config.service.log_level = "loud".to_string();
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_zero_budget_rejected() {
        let mut config = AppConfig::default();
        config.balance.enumeration_budget = 0;
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_partial_toml() {
        let config: AppConfig = toml::from_str(
            r#"
            [balance]
            enumeration_budget = 5000
            default_mode = "play_all"

            [rating]
            initial_rating = 1000.0
            "#,
        )
        .unwrap();

        assert_eq!(config.balance.enumeration_budget, 5000);
        assert_eq!(config.balance.default_mode, BalanceMode::PlayAll);
        assert_eq!(config.rating.initial_rating, 1000.0);
        assert_eq!(config.rating.initial_uncertainty, 400.0);
        assert_eq!(config.service.log_level, "info");
        assert!(validate_config(&config).is_ok());
    }
}
