//! Pairwise score attribution and fixed-team seating
//!
//! A multi-player finish order is rated as a set of head-to-head results.
//! This module decides what each head-to-head result is worth and, for team
//! play, which seats are partners and which are opponents.

use crate::error::{EloError, Result};
use crate::types::PlayerNumber;
use serde::{Deserialize, Serialize};

/// Number of seats at a team table: teams are {0, 2} vs {1, 3}
pub const TEAM_TABLE_SIZE: usize = 4;

const TEAMMATE: [PlayerNumber; TEAM_TABLE_SIZE] = [2, 3, 0, 1];
const OPPONENT: [PlayerNumber; TEAM_TABLE_SIZE] = [1, 2, 1, 2];

/// How a pair of finishing positions is turned into an actual score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ScoringMode {
    /// Only first place beats anyone; everybody else ties among themselves
    WinnerOnly,
    /// Finishing ahead of a player counts as a win against them
    Graded,
    /// The team holding the top two places beats both opponents
    Team,
}

impl ScoringMode {
    /// Team play always uses the team rule, regardless of `credit_winner_only`
    pub fn for_game(team: bool, credit_winner_only: bool) -> Self {
        match (team, credit_winner_only) {
            (true, _) => ScoringMode::Team,
            (false, true) => ScoringMode::WinnerOnly,
            (false, false) => ScoringMode::Graded,
        }
    }
}

impl std::fmt::Display for ScoringMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ScoringMode::WinnerOnly => write!(f, "WinnerOnly"),
            ScoringMode::Graded => write!(f, "Graded"),
            ScoringMode::Team => write!(f, "Team"),
        }
    }
}

/// Score (1, 0.5 or 0) earned by the player at `my_place` against the player
/// at `their_place`. Places are 0-based: 0 is first.
pub fn pairwise_actual_score(my_place: usize, their_place: usize, mode: ScoringMode) -> f64 {
    match mode {
        ScoringMode::WinnerOnly => {
            if my_place == 0 {
                1.0
            } else if their_place > 0 {
                // Neither of us won: tied for last
                0.5
            } else {
                0.0
            }
        }
        ScoringMode::Graded => {
            if my_place < their_place {
                1.0
            } else if my_place == their_place {
                0.5
            } else {
                0.0
            }
        }
        // Only opponents are ever compared, so the other team finished
        // either both ahead of us or both behind us.
        ScoringMode::Team => {
            if my_place <= 1 {
                1.0
            } else {
                0.0
            }
        }
    }
}

fn check_team_seat(player_number: PlayerNumber) -> Result<()> {
    if player_number >= TEAM_TABLE_SIZE {
        return Err(EloError::configuration(format!(
            "Player out of bounds {}",
            player_number
        ))
        .into());
    }
    Ok(())
}

/// Partner seat of `player_number` at a 4-seat team table, e.g. 0 for 2
pub fn teammate_of(player_number: PlayerNumber) -> Result<PlayerNumber> {
    check_team_seat(player_number)?;
    Ok(TEAMMATE[player_number])
}

/// Directly opposing seat of `player_number`: 0 -> 1, 1 -> 2, 2 -> 1, 3 -> 2
pub fn opponent_of(player_number: PlayerNumber) -> Result<PlayerNumber> {
    check_team_seat(player_number)?;
    Ok(OPPONENT[player_number])
}
