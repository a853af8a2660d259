//! Rating experiments over repeated randomized games
//!
//! This module provides the scenarios that describe a table, the history
//! sink that collects rating snapshots, the runner that plays the rounds and
//! the summary report of a finished run.

pub mod history;
pub mod report;
pub mod runner;
pub mod scenario;

// Re-export commonly used types
pub use history::{HistorySink, RatingHistory, RatingSnapshot};
pub use report::{ExperimentReport, PlayerSummary};
pub use runner::{ExperimentOutcome, ExperimentRunner};
pub use scenario::{load_scenarios, parse_scenarios, presets, select, ScenarioOption};
