//! Test fixtures and helper implementations for integration testing

#![allow(dead_code)]

use elo_lab::experiment::HistorySink;
use elo_lab::{Game, GameSettings, Player, Rating};
use std::path::PathBuf;

/// History sink that keeps the raw rows it receives
#[derive(Debug, Default)]
pub struct RecordingSink {
    rows: Vec<(String, usize, Rating)>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn rows(&self) -> &[(String, usize, Rating)] {
        &self.rows
    }

    /// Ratings recorded for `name`, in order
    pub fn ratings_of(&self, name: &str) -> Vec<Rating> {
        self.rows
            .iter()
            .filter(|(row_name, _, _)| row_name == name)
            .map(|&(_, _, rating)| rating)
            .collect()
    }

    /// Highest sequence number seen
    pub fn last_sequence(&self) -> Option<usize> {
        self.rows.iter().map(|&(_, sequence, _)| sequence).max()
    }
}

impl HistorySink for RecordingSink {
    fn record(&mut self, name: &str, sequence: usize, rating: Rating) {
        self.rows.push((name.to_string(), sequence, rating));
    }
}

/// Settings for individual play
pub fn individual(credit_winner_only: bool) -> GameSettings {
    GameSettings {
        credit_winner_only,
        team: false,
        shuffle_players: false,
    }
}

/// Settings for fixed-team play
pub fn team() -> GameSettings {
    GameSettings {
        credit_winner_only: false,
        team: true,
        shuffle_players: false,
    }
}

/// Game with one player per `(win_ratio, rating)` pair, seated in order
pub fn create_game(settings: GameSettings, seats: &[(f64, Rating)]) -> Game {
    let mut game = Game::new(settings);
    for (seat, &(win_ratio, rating)) in seats.iter().enumerate() {
        game.add_player(Player::new(seat, win_ratio, rating))
            .expect("fixture seats must be valid");
    }
    game
}

/// Current rating of every seat
pub fn ratings(game: &Game) -> Vec<Rating> {
    game.players().iter().map(|p| p.elo_rating).collect()
}

/// Unique path under the system temp directory
pub fn temp_path(file_name: &str) -> PathBuf {
    std::env::temp_dir().join(format!("elo-lab-{}-{}", std::process::id(), file_name))
}
