//! A table of players and the rules they are rated under
//!
//! `Game` owns the seat list, checks the declared win ratios as players are
//! added, and drives one round at a time: draw a placing, rate everybody
//! against the pre-round ratings, then commit all new ratings at once.

use crate::error::{EloError, Result};
use crate::outcome::{draw_placing, shuffle, RandomSource};
use crate::rating::{validate_placing, RatingEngine, ScoringMode, TEAM_TABLE_SIZE};
use crate::types::{Placing, Player, PlayerNumber, Rating, MAX_PLAYERS};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Slack allowed when checking that win ratios sum to at most 1, so that
/// e.g. three ratios of 1/3 are accepted
pub const RATIO_SUM_TOLERANCE: f64 = 1e-9;

/// Rules a game is played and rated under
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameSettings {
    /// Only the winner beats anyone; the rest tie among themselves
    pub credit_winner_only: bool,
    /// Fixed teams {0, 2} vs {1, 3}
    pub team: bool,
    /// Reseat players randomly between rounds of an experiment
    pub shuffle_players: bool,
}

impl GameSettings {
    pub fn scoring_mode(&self) -> ScoringMode {
        ScoringMode::for_game(self.team, self.credit_winner_only)
    }
}

/// Result of one committed round
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoundResult {
    pub placing: Placing,
    /// Committed ratings, indexed by player number at the time of the round
    pub new_ratings: Vec<Rating>,
}

/// One table of players
#[derive(Debug, Clone)]
pub struct Game {
    settings: GameSettings,
    engine: RatingEngine,
    players: Vec<Player>,
    total_ratio: f64,
}

impl Game {
    pub fn new(settings: GameSettings) -> Self {
        Self::with_engine(settings, RatingEngine::default())
    }

    pub fn with_engine(settings: GameSettings, engine: RatingEngine) -> Self {
        Self {
            settings,
            engine,
            players: Vec::new(),
            total_ratio: 0.0,
        }
    }

    pub fn settings(&self) -> GameSettings {
        self.settings
    }

    pub fn engine(&self) -> &RatingEngine {
        &self.engine
    }

    pub fn players(&self) -> &[Player] {
        &self.players
    }

    pub fn player(&self, player_number: PlayerNumber) -> Option<&Player> {
        self.players.get(player_number)
    }

    /// Sum of the win ratios of every seated player
    pub fn total_ratio(&self) -> f64 {
        self.total_ratio
    }

    /// Seat `player` at the next free position. Its player number is set to
    /// that position. Fails without seating anyone if the table is full, the
    /// player's own win ratio is outside [0, 1], or the win ratios would sum
    /// to more than 1.
    pub fn add_player(&mut self, mut player: Player) -> Result<()> {
        if self.players.len() >= MAX_PLAYERS {
            return Err(EloError::configuration(format!(
                "a game holds at most {} players",
                MAX_PLAYERS
            ))
            .into());
        }
        if !(0.0..=1.0).contains(&player.win_ratio) {
            return Err(EloError::configuration(format!(
                "win ratio of {} must be within [0, 1], got {}",
                player.name, player.win_ratio
            ))
            .into());
        }

        let total = self.total_ratio + player.win_ratio;
        if total > 1.0 + RATIO_SUM_TOLERANCE {
            return Err(EloError::configuration(format!(
                "Total of all win ratios > 1 ({:.6}) after adding {}",
                total, player.name
            ))
            .into());
        }

        player.player_number = self.players.len();
        self.total_ratio = total;
        self.players.push(player);
        Ok(())
    }

    /// Check that the table can be played under its settings
    pub fn validate(&self) -> Result<()> {
        if self.settings.team && self.players.len() != TEAM_TABLE_SIZE {
            return Err(EloError::configuration(format!(
                "team play needs exactly {} players, found {}",
                TEAM_TABLE_SIZE,
                self.players.len()
            ))
            .into());
        }
        Ok(())
    }

    /// Draw this round's finish order
    pub fn placing<R: RandomSource + ?Sized>(&self, rng: &mut R) -> Result<Placing> {
        self.validate()?;
        draw_placing(&self.players, self.settings.team, rng)
    }

    /// New rating of one player for `placing`, computed from current ratings
    pub fn update_rating(
        &self,
        player_number: PlayerNumber,
        placing: &[PlayerNumber],
    ) -> Result<Rating> {
        let player = self.player(player_number).ok_or_else(|| {
            EloError::invalid_placing(format!("player {} is not at the table", player_number))
        })?;
        self.engine
            .update_rating(player, &self.players, placing, self.settings.scoring_mode())
    }

    /// New ratings of all players for `placing`, indexed by player number.
    /// Nothing is committed.
    pub fn rate_round(&self, placing: &[PlayerNumber]) -> Result<Vec<Rating>> {
        self.validate()?;
        self.engine
            .rate_round(&self.players, placing, self.settings.scoring_mode())
    }

    /// Replace every player's rating at once
    pub fn commit_ratings(&mut self, new_ratings: &[Rating]) -> Result<()> {
        if new_ratings.len() != self.players.len() {
            return Err(EloError::invalid_placing(format!(
                "expected {} ratings, got {}",
                self.players.len(),
                new_ratings.len()
            ))
            .into());
        }
        for player in &mut self.players {
            player.elo_rating = new_ratings[player.player_number];
        }
        Ok(())
    }

    /// Count this round's finishing positions, and each player's position in
    /// the current rating order (highest first, ties keep seat order)
    pub fn record_tallies(&mut self, placing: &[PlayerNumber]) -> Result<()> {
        validate_placing(&self.players, placing)?;
        for (place, &number) in placing.iter().enumerate() {
            self.players[number].times_placed.record(place);
        }

        let mut by_rating: Vec<PlayerNumber> = (0..self.players.len()).collect();
        by_rating.sort_by(|&a, &b| {
            self.players[b]
                .elo_rating
                .cmp(&self.players[a].elo_rating)
        });
        for (rank, number) in by_rating.into_iter().enumerate() {
            self.players[number].times_by_rating.record(rank);
        }
        Ok(())
    }

    pub fn reset_tallies(&mut self) {
        for player in &mut self.players {
            player.times_placed.reset();
            player.times_by_rating.reset();
        }
    }

    /// Draw, rate, commit and tally one round
    pub fn play_round<R: RandomSource + ?Sized>(&mut self, rng: &mut R) -> Result<RoundResult> {
        let placing = self.placing(rng)?;
        let new_ratings = self.rate_round(&placing)?;
        self.commit_ratings(&new_ratings)?;
        self.record_tallies(&placing)?;
        debug!(?placing, ?new_ratings, "round committed");
        Ok(RoundResult {
            placing,
            new_ratings,
        })
    }

    /// Randomly reseat everybody and renumber players to their new seats
    pub fn shuffle_seats<R: RandomSource + ?Sized>(&mut self, rng: &mut R) {
        shuffle(rng, &mut self.players);
        for (seat, player) in self.players.iter_mut().enumerate() {
            player.player_number = seat;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::is_configuration_error;
    use crate::outcome::ScriptedSource;

    fn four_player_game(
        settings: GameSettings,
        win_ratios: [f64; 4],
        ratings: [Rating; 4],
    ) -> Game {
        let mut game = Game::new(settings);
        for (i, (&ratio, &rating)) in win_ratios.iter().zip(&ratings).enumerate() {
            game.add_player(Player::new(i, ratio, rating)).unwrap();
        }
        game
    }

    #[test]
    fn test_add_player_tracks_total_ratio() {
        let mut game = Game::new(GameSettings::default());
        game.add_player(Player::new(0, 0.4, 1500)).unwrap();
        game.add_player(Player::new(1, 0.35, 1500)).unwrap();
        assert!((game.total_ratio() - 0.75).abs() < 1e-12);
        assert_eq!(game.players().len(), 2);
    }

    #[test]
    fn test_add_player_rejects_ratio_sum_above_one() {
        let mut game = Game::new(GameSettings::default());
        game.add_player(Player::new(0, 0.6, 1500)).unwrap();
        let err = game.add_player(Player::new(1, 0.6, 1500)).unwrap_err();
        assert!(is_configuration_error(&err));
        // Nothing was seated by the failed call
        assert_eq!(game.players().len(), 1);
        assert!((game.total_ratio() - 0.6).abs() < 1e-12);
    }

    #[test]
    fn test_add_player_rejects_ratio_outside_unit_range() {
        let mut game = Game::new(GameSettings::default());
        assert!(game.add_player(Player::new(0, -0.1, 1500)).is_err());
        assert!(game.add_player(Player::new(0, f64::NAN, 1500)).is_err());
        assert!(game.add_player(Player::new(0, 1.5, 1500)).is_err());
        assert!(game.players().is_empty());
    }

    #[test]
    fn test_negative_ratio_rejected_even_when_sum_stays_valid() {
        let mut game = Game::new(GameSettings::default());
        game.add_player(Player::new(0, 0.6, 1500)).unwrap();

        let err = game.add_player(Player::new(1, -0.1, 1500)).unwrap_err();
        assert!(is_configuration_error(&err));
        assert_eq!(game.players().len(), 1);
        assert!((game.total_ratio() - 0.6).abs() < 1e-12);
    }

    #[test]
    fn test_thirds_are_accepted() {
        let game = four_player_game(
            GameSettings::default(),
            [0.0, 1.0 / 3.0, 1.0 / 3.0, 1.0 / 3.0],
            [1500; 4],
        );
        assert_eq!(game.players().len(), 4);
    }

    #[test]
    fn test_fifth_player_rejected() {
        let mut game = four_player_game(GameSettings::default(), [0.25; 4], [1500; 4]);
        let err = game.add_player(Player::new(4, 0.0, 1500)).unwrap_err();
        assert!(is_configuration_error(&err));
    }

    #[test]
    fn test_player_numbers_follow_seats() {
        let mut game = Game::new(GameSettings::default());
        game.add_player(Player::new(7, 0.5, 1500)).unwrap();
        game.add_player(Player::new(7, 0.5, 1500)).unwrap();
        assert_eq!(game.players()[0].player_number, 0);
        assert_eq!(game.players()[1].player_number, 1);
    }

    #[test]
    fn test_team_game_needs_four_players() {
        let mut game = Game::new(GameSettings {
            team: true,
            ..GameSettings::default()
        });
        game.add_player(Player::new(0, 0.5, 1500)).unwrap();
        game.add_player(Player::new(1, 0.5, 1500)).unwrap();

        let mut rng = ScriptedSource::new(vec![0.3]);
        assert!(is_configuration_error(&game.placing(&mut rng).unwrap_err()));
        assert!(is_configuration_error(&game.rate_round(&[0, 1]).unwrap_err()));
    }

    #[test]
    fn test_play_round_commits_all_ratings_together() {
        let settings = GameSettings {
            credit_winner_only: true,
            ..GameSettings::default()
        };
        let mut game = four_player_game(settings, [1.0, 0.0, 0.0, 0.0], [1500; 4]);
        let mut rng = ScriptedSource::new(vec![0.5]);

        let round = game.play_round(&mut rng).unwrap();
        assert_eq!(round.placing[0], 0);
        assert_eq!(round.new_ratings, vec![1545, 1485, 1485, 1485]);

        let ratings: Vec<Rating> = game.players().iter().map(|p| p.elo_rating).collect();
        assert_eq!(ratings, vec![1545, 1485, 1485, 1485]);

        assert_eq!(game.players()[0].times_placed.counts, [1, 0, 0, 0]);
        assert_eq!(game.players()[0].times_by_rating.counts, [1, 0, 0, 0]);
        // Tied losers keep seat order in the rating tally
        assert_eq!(game.players()[1].times_by_rating.counts, [0, 1, 0, 0]);
        assert_eq!(game.players()[3].times_by_rating.counts, [0, 0, 0, 1]);
    }

    #[test]
    fn test_update_rating_single_player() {
        let settings = GameSettings {
            credit_winner_only: true,
            ..GameSettings::default()
        };
        let game = four_player_game(
            settings,
            [0.0, 1.0, 0.0, 0.0],
            [1634, 1459, 1280, 1524],
        );
        assert_eq!(game.update_rating(1, &[1, 0, 2, 3]).unwrap(), 1507);
        assert_eq!(game.update_rating(2, &[1, 3, 0, 2]).unwrap(), 1293);
        assert!(game.update_rating(9, &[1, 0, 2, 3]).is_err());
    }

    #[test]
    fn test_commit_ratings_length_mismatch() {
        let mut game = four_player_game(GameSettings::default(), [0.25; 4], [1500; 4]);
        assert!(game.commit_ratings(&[1500, 1500]).is_err());
        assert!(game.players().iter().all(|p| p.elo_rating == 1500));
    }

    #[test]
    fn test_shuffle_renumbers_players() {
        let mut game =
            four_player_game(GameSettings::default(), [0.1, 0.2, 0.3, 0.4], [1500; 4]);
        let mut rng = ScriptedSource::new(vec![0.0]);
        game.shuffle_seats(&mut rng);

        let ratios: Vec<f64> = game.players().iter().map(|p| p.win_ratio).collect();
        assert_eq!(ratios, vec![0.2, 0.3, 0.4, 0.1]);
        for (seat, player) in game.players().iter().enumerate() {
            assert_eq!(player.player_number, seat);
        }
    }

    #[test]
    fn test_reset_tallies() {
        let mut game = four_player_game(GameSettings::default(), [0.25; 4], [1500; 4]);
        game.record_tallies(&[3, 2, 1, 0]).unwrap();
        assert_eq!(game.players()[3].times_placed.counts, [1, 0, 0, 0]);

        game.reset_tallies();
        assert!(game.players().iter().all(|p| p.times_placed.total() == 0));
        assert!(game.players().iter().all(|p| p.times_by_rating.total() == 0));
    }
}
