//! Main application configuration
//!
//! This module defines the top-level configuration for elo-lab, including
//! environment variable and TOML file loading and validation.

use crate::config::{ExperimentConfig, RatingConfig};
use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::path::Path;

/// Main application configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub service: ServiceSettings,
    pub rating: RatingConfig,
    pub experiment: ExperimentConfig,
}

/// Process-level settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceSettings {
    /// Name used in log output
    pub name: String,
    /// Log level (trace, debug, info, warn, error)
    pub log_level: String,
}

impl Default for ServiceSettings {
    fn default() -> Self {
        Self {
            name: "elo-lab".to_string(),
            log_level: "info".to_string(),
        }
    }
}

fn parse_var<T: std::str::FromStr>(key: &str, value: &str) -> Result<T> {
    value
        .trim()
        .parse()
        .map_err(|_| anyhow!("Invalid {} value: {}", key, value))
}

impl AppConfig {
    /// Load configuration from environment variables with fallback to defaults
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();
        config.apply_env(|key| env::var(key).ok())?;
        validate_config(&config)?;
        Ok(config)
    }

    /// Load configuration from a TOML file, then apply environment overrides
    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let mut config = Self::from_toml_str(&contents)
            .with_context(|| format!("Failed to parse config file {}", path.display()))?;
        config.apply_env(|key| env::var(key).ok())?;
        validate_config(&config)?;
        Ok(config)
    }

    /// Parse TOML text; missing sections and fields take their defaults
    pub fn from_toml_str(contents: &str) -> Result<Self> {
        let config: Self = toml::from_str(contents)?;
        Ok(config)
    }

    /// Override fields from variables found by `lookup`
    pub fn apply_env<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        // Service settings
        if let Some(name) = lookup("SERVICE_NAME") {
            self.service.name = name;
        }
        if let Some(log_level) = lookup("LOG_LEVEL") {
            self.service.log_level = log_level;
        }

        // Rating settings
        if let Some(k) = lookup("ELO_K_FACTOR") {
            self.rating.k_factor = parse_var("ELO_K_FACTOR", &k)?;
        }
        if let Some(rating) = lookup("ELO_DEFAULT_RATING") {
            self.rating.default_rating = parse_var("ELO_DEFAULT_RATING", &rating)?;
        }

        // Experiment settings
        if let Some(games) = lookup("ELO_GAMES") {
            self.experiment.n_games = parse_var("ELO_GAMES", &games)?;
        }
        if let Some(credit) = lookup("ELO_CREDIT_WINNER_ONLY") {
            self.experiment.credit_winner_only = parse_var("ELO_CREDIT_WINNER_ONLY", &credit)?;
        }
        if let Some(seed) = lookup("ELO_SEED") {
            self.experiment.seed = Some(parse_var("ELO_SEED", &seed)?);
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

    // Validate rating settings
    if !config.rating.k_factor.is_finite() || config.rating.k_factor <= 0.0 {
        return Err(anyhow!(
            "K factor must be positive, got {}",
            config.rating.k_factor
        ));
    }
    if config.rating.default_rating <= 0 {
        return Err(anyhow!(
            "Default rating must be positive, got {}",
            config.rating.default_rating
        ));
    }

    Ok(())
}
