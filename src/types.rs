//! Common types used throughout the rating engine

use serde::{Deserialize, Serialize};

/// Integer Elo rating
pub type Rating = i32;

/// Dense 0-based seat index of a player within one game
pub type PlayerNumber = usize;

/// Starting rating when a scenario does not provide one
pub const DEFAULT_RATING: Rating = 1500;

/// Width of the per-player tally vectors, and the largest supported table
pub const MAX_PLAYERS: usize = 4;

/// Finish order of one round: `placing[0]` is the player number in 1st place,
/// `placing[1]` the one in 2nd place, and so on.
pub type Placing = Vec<PlayerNumber>;

/// Position of `player_number` within `placing`, i.e. 0 for 1st place
pub fn place_of(placing: &[PlayerNumber], player_number: PlayerNumber) -> Option<usize> {
    placing.iter().position(|&p| p == player_number)
}

/// How often a player finished at each rank
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlacementTally {
    pub counts: [u64; MAX_PLAYERS],
}

impl PlacementTally {
    /// Count one more finish at `rank` (0 = first)
    pub fn record(&mut self, rank: usize) {
        if let Some(count) = self.counts.get_mut(rank) {
            *count += 1;
        }
    }

    pub fn total(&self) -> u64 {
        self.counts.iter().sum()
    }

    pub fn reset(&mut self) {
        self.counts = [0; MAX_PLAYERS];
    }
}

/// A participant in a game
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    /// Seat index, always equal to the player's position in the game's list
    pub player_number: PlayerNumber,
    /// Declared probability of winning a round, in [0, 1]
    pub win_ratio: f64,
    pub elo_rating: Rating,
    /// Display label, not used in rating math
    pub name: String,
    /// Finishes by actual outcome
    pub times_placed: PlacementTally,
    /// Finishes by position in the rating order after each round
    pub times_by_rating: PlacementTally,
}

impl Player {
    pub fn new(player_number: PlayerNumber, win_ratio: f64, elo_rating: Rating) -> Self {
        Self {
            player_number,
            win_ratio,
            elo_rating,
            name: format!("Player {}", player_number),
            times_placed: PlacementTally::default(),
            times_by_rating: PlacementTally::default(),
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }
}

impl std::fmt::Display for Player {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "#{} {} (win ratio {:.3}, elo {})",
            self.player_number, self.name, self.win_ratio, self.elo_rating
        )
    }
}
