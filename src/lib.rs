//! Elo Lab - Multi-player Elo ratings under randomized placements
//!
//! This crate rates 2- and 4-player games (individual or fixed-team play) by
//! treating every finish order as a set of pairwise Elo comparisons, and runs
//! repeated randomized games to watch ratings evolve.

pub mod config;
pub mod error;
pub mod experiment;
pub mod game;
pub mod outcome;
pub mod rating;
pub mod types;

// Re-export commonly used types and traits
pub use error::{EloError, Result};
pub use types::*;

// Re-export key components
pub use experiment::{ExperimentOutcome, ExperimentRunner, ScenarioOption};
pub use game::{Game, GameSettings};
pub use outcome::{RandomSource, RngSource};
pub use rating::{RatingEngine, ScoringMode};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
