//! Experiment run configuration

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExperimentConfig {
    /// Simulated rounds per run
    pub n_games: usize,
    /// Score with winner-only credit instead of graded credit
    pub credit_winner_only: bool,
    /// Seed for reproducible runs; fresh entropy when absent
    pub seed: Option<u64>,
}

impl Default for ExperimentConfig {
    fn default() -> Self {
        Self {
            n_games: 1000,
            credit_winner_only: false,
            seed: None,
        }
    }
}
