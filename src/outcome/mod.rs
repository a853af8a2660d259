//! Outcome model: who finishes where in a simulated round
//!
//! This module provides the injected randomness used by simulations and the
//! weighted draw that turns declared win ratios into a full finish order.

pub mod placing;
pub mod random;

// Re-export commonly used types
pub use placing::{draw_placing, draw_winner, forced_team_placing, ZERO_RATIO_EPSILON};
pub use random::{pick_index, shuffle, RandomSource, RngSource, ScriptedSource};
