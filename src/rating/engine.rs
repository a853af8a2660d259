//! Multi-player Elo update
//!
//! Each player is rated against every counted opponent at the table using the
//! same finish order and the ratings as they stood before the round. New
//! ratings are returned as a batch so callers can commit them together.

use crate::error::{EloError, Result};
use crate::rating::math::{expectation, new_rating};
use crate::rating::scoring::{pairwise_actual_score, teammate_of, ScoringMode};
use crate::types::{place_of, Player, PlayerNumber, Rating};
use tracing::trace;

/// Summed pairwise comparisons for one player in one round
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PairwiseSums {
    pub expected: f64,
    pub actual: f64,
    pub opponents: usize,
}

/// Elo engine with a fixed sensitivity constant
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RatingEngine {
    k_factor: f64,
}

impl Default for RatingEngine {
    fn default() -> Self {
        Self {
            k_factor: Self::DEFAULT_K_FACTOR,
        }
    }
}

impl RatingEngine {
    pub const DEFAULT_K_FACTOR: f64 = 30.0;

    /// Create an engine, rejecting a non-positive or non-finite K
    pub fn new(k_factor: f64) -> Result<Self> {
        if !k_factor.is_finite() || k_factor <= 0.0 {
            return Err(
                EloError::configuration(format!("K factor must be positive, got {}", k_factor))
                    .into(),
            );
        }
        Ok(Self { k_factor })
    }

    pub fn k_factor(&self) -> f64 {
        self.k_factor
    }

    /// Expected and actual score sums of `player` against the counted
    /// opponents in `players`, given the round's `placing`
    pub fn pairwise_sums(
        &self,
        player: &Player,
        players: &[Player],
        placing: &[PlayerNumber],
        mode: ScoringMode,
    ) -> Result<PairwiseSums> {
        let my_number = player.player_number;
        let my_place = place_of(placing, my_number).ok_or_else(|| {
            EloError::invalid_placing(format!("player {} has no place", my_number))
        })?;
        let teammate = match mode {
            ScoringMode::Team => Some(teammate_of(my_number)?),
            _ => None,
        };

        let mut sums = PairwiseSums::default();
        for other in players {
            let their_number = other.player_number;
            if their_number == my_number || Some(their_number) == teammate {
                continue;
            }
            let their_place = place_of(placing, their_number).ok_or_else(|| {
                EloError::invalid_placing(format!("player {} has no place", their_number))
            })?;

            sums.expected += expectation(player.elo_rating, other.elo_rating);
            sums.actual += pairwise_actual_score(my_place, their_place, mode);
            sums.opponents += 1;
        }
        Ok(sums)
    }

    /// New rating for `player` after a round finishing in `placing`
    pub fn update_rating(
        &self,
        player: &Player,
        players: &[Player],
        placing: &[PlayerNumber],
        mode: ScoringMode,
    ) -> Result<Rating> {
        let sums = self.pairwise_sums(player, players, placing, mode)?;
        let rating = new_rating(player.elo_rating, sums.actual, sums.expected, self.k_factor);
        trace!(
            player = player.player_number,
            expected = sums.expected,
            actual = sums.actual,
            old = player.elo_rating,
            new = rating,
            "rated player"
        );
        Ok(rating)
    }

    /// New ratings for every player, indexed by player number. Nothing is
    /// written back; all ratings read are the pre-round ones.
    pub fn rate_round(
        &self,
        players: &[Player],
        placing: &[PlayerNumber],
        mode: ScoringMode,
    ) -> Result<Vec<Rating>> {
        validate_placing(players, placing)?;

        let mut new_ratings = vec![0; players.len()];
        for player in players {
            new_ratings[player.player_number] =
                self.update_rating(player, players, placing, mode)?;
        }
        Ok(new_ratings)
    }
}

/// Check that `placing` ranks every seat of `players` exactly once and that
/// player numbers match list positions
pub fn validate_placing(players: &[Player], placing: &[PlayerNumber]) -> Result<()> {
    if placing.len() != players.len() {
        return Err(EloError::invalid_placing(format!(
            "expected {} places, got {}",
            players.len(),
            placing.len()
        ))
        .into());
    }

    for (seat, player) in players.iter().enumerate() {
        if player.player_number != seat {
            return Err(EloError::invalid_placing(format!(
                "player at seat {} carries number {}",
                seat, player.player_number
            ))
            .into());
        }
    }

    let mut seen = vec![false; players.len()];
    for &number in placing {
        match seen.get_mut(number) {
            Some(slot) if !*slot => *slot = true,
            Some(_) => {
                return Err(EloError::invalid_placing(format!(
                    "player {} placed twice",
                    number
                ))
                .into())
            }
            None => {
                return Err(EloError::invalid_placing(format!(
                    "player {} is not at the table",
                    number
                ))
                .into())
            }
        }
    }
    Ok(())
}
