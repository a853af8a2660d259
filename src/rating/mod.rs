//! Elo rating math, pairwise scoring policies and the round engine
//!
//! This module provides the two-player Elo formulas, the rules that turn a
//! multi-player finish order into head-to-head scores, and the engine that
//! combines them into new ratings for a whole table.

pub mod engine;
pub mod math;
pub mod scoring;

// Re-export commonly used types
pub use engine::{validate_placing, PairwiseSums, RatingEngine};
pub use math::{expectation, new_rating};
pub use scoring::{opponent_of, pairwise_actual_score, teammate_of, ScoringMode, TEAM_TABLE_SIZE};
