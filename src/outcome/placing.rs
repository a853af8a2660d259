//! Randomized finish orders from declared win ratios
//!
//! A placing is drawn one place at a time: the winner of each place is picked
//! among the players still unplaced, weighted by their win ratios
//! renormalized over that remaining group.

use crate::error::{EloError, Result};
use crate::outcome::random::{pick_index, RandomSource};
use crate::rating::scoring::{opponent_of, teammate_of, TEAM_TABLE_SIZE};
use crate::types::{Placing, Player};
use tracing::trace;

/// Win ratios below this are treated as "never wins" by the team override
pub const ZERO_RATIO_EPSILON: f64 = 1e-6;

/// Pick an index into `win_ratios` with probability proportional to its ratio.
///
/// Exactly one draw is taken for the weighted walk. If the walk selects
/// nobody (all ratios zero, or rounding drift) a second draw picks a
/// uniformly random index instead.
pub fn draw_winner<R: RandomSource + ?Sized>(win_ratios: &[f64], rng: &mut R) -> usize {
    let r = rng.next_unit();
    let total: f64 = win_ratios.iter().sum();
    let scale = if total == 1.0 || total <= 0.0 {
        1.0
    } else {
        total
    };

    let mut running = 0.0;
    for (index, ratio) in win_ratios.iter().enumerate() {
        running += ratio / scale;
        if r < running {
            return index;
        }
    }

    let index = pick_index(rng, win_ratios.len());
    trace!(r, total, index, "weighted draw fell through, picked uniformly");
    index
}

/// The fixed finish order forced on a 4-seat team table when exactly one
/// player cannot win: that player's opponent and partner take 1st and 2nd,
/// the hopeless player and their teammate take 3rd and 4th.
pub fn forced_team_placing(players: &[Player]) -> Result<Option<Placing>> {
    let mut hopeless = players
        .iter()
        .filter(|player| player.win_ratio < ZERO_RATIO_EPSILON);
    let (Some(loser), None) = (hopeless.next(), hopeless.next()) else {
        return Ok(None);
    };

    let loser = loser.player_number;
    let winner = opponent_of(loser)?;
    Ok(Some(vec![
        winner,
        teammate_of(winner)?,
        loser,
        teammate_of(loser)?,
    ]))
}

/// Draw a full finish order for `players`.
///
/// With `team` set the table must have exactly four seats, and the forced
/// team placing takes precedence over the weighted draw.
pub fn draw_placing<R: RandomSource + ?Sized>(
    players: &[Player],
    team: bool,
    rng: &mut R,
) -> Result<Placing> {
    if team {
        if players.len() != TEAM_TABLE_SIZE {
            return Err(EloError::configuration(format!(
                "team play needs exactly {} players, found {}",
                TEAM_TABLE_SIZE,
                players.len()
            ))
            .into());
        }
        if let Some(placing) = forced_team_placing(players)? {
            return Ok(placing);
        }
    }

    let mut remaining: Vec<&Player> = players.iter().collect();
    let mut placing = Vec::with_capacity(players.len());
    while !remaining.is_empty() {
        let ratios: Vec<f64> = remaining.iter().map(|player| player.win_ratio).collect();
        let winner = draw_winner(&ratios, rng);
        placing.push(remaining.remove(winner).player_number);
    }
    Ok(placing)
}
