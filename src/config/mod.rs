//! Configuration management for elo-lab
//!
//! This module handles configuration loading from environment variables and
//! TOML files, validation, and default values for rating experiments.

pub mod app;
pub mod experiment;
pub mod rating;

// Re-export commonly used types
pub use app::{validate_config, AppConfig, ServiceSettings};
pub use experiment::ExperimentConfig;
pub use rating::RatingConfig;
