//! Repeated randomized games over one table
//!
//! Each round draws a placing, rates every player against the pre-round
//! ratings, commits the batch, updates the tallies, snapshots every rating
//! and, for shuffled scenarios, reseats the table for the next round.

use crate::config::{AppConfig, ExperimentConfig, RatingConfig};
use crate::error::Result;
use crate::experiment::history::{HistorySink, RatingHistory};
use crate::experiment::scenario::ScenarioOption;
use crate::game::Game;
use crate::outcome::{RandomSource, ZERO_RATIO_EPSILON};
use crate::types::Player;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

/// Rating history and final table of a finished run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExperimentOutcome {
    pub history: RatingHistory,
    /// Players in their final seating, with tallies
    pub players: Vec<Player>,
}

/// Runs experiments with a fixed round count and rating setup
#[derive(Debug, Clone, Default)]
pub struct ExperimentRunner {
    experiment: ExperimentConfig,
    rating: RatingConfig,
}

impl ExperimentRunner {
    pub fn new(experiment: ExperimentConfig, rating: RatingConfig) -> Self {
        Self { experiment, rating }
    }

    pub fn from_config(config: &AppConfig) -> Self {
        Self::new(config.experiment.clone(), config.rating.clone())
    }

    pub fn n_games(&self) -> usize {
        self.experiment.n_games
    }

    /// Seat the scenario's players at a fresh table
    pub fn build_game(&self, option: &ScenarioOption, credit_winner_only: bool) -> Result<Game> {
        option.validate()?;
        let engine = self.rating.engine()?;
        let mut game = Game::with_engine(option.settings(credit_winner_only), engine);

        let seats = option.names.iter().zip(&option.win_ratios).enumerate();
        for (index, (name, &win_ratio)) in seats {
            let rating = option.initial_rating(index, self.rating.default_rating);
            game.add_player(Player::new(index, win_ratio, rating).with_name(name.clone()))?;
        }
        game.validate()?;

        if option.team {
            let hopeless = option
                .win_ratios
                .iter()
                .filter(|&&ratio| ratio < ZERO_RATIO_EPSILON)
                .count();
            if hopeless > 1 {
                warn!(
                    hopeless,
                    "several players can never win; team placings will be drawn by weight"
                );
            }
        }
        Ok(game)
    }

    /// Run the configured number of rounds, collecting history in memory
    pub fn run<R: RandomSource + ?Sized>(
        &self,
        option: &ScenarioOption,
        credit_winner_only: bool,
        rng: &mut R,
    ) -> Result<ExperimentOutcome> {
        let mut history = RatingHistory::new();
        let players = self.run_with_sink(option, credit_winner_only, rng, &mut history)?;
        Ok(ExperimentOutcome { history, players })
    }

    /// Run the configured number of rounds, sending every snapshot to `sink`.
    /// Returns the final table.
    pub fn run_with_sink<R, S>(
        &self,
        option: &ScenarioOption,
        credit_winner_only: bool,
        rng: &mut R,
        sink: &mut S,
    ) -> Result<Vec<Player>>
    where
        R: RandomSource + ?Sized,
        S: HistorySink + ?Sized,
    {
        let mut game = self.build_game(option, credit_winner_only)?;
        game.reset_tallies();
        let settings = game.settings();

        info!(
            players = game.players().len(),
            games = self.experiment.n_games,
            scoring = %settings.scoring_mode(),
            shuffle = settings.shuffle_players,
            "starting experiment"
        );

        record_snapshot(&game, 0, sink);
        for round in 0..self.experiment.n_games {
            let result = game.play_round(rng)?;
            debug!(round, placing = ?result.placing, "round played");
            record_snapshot(&game, round + 1, sink);

            if settings.shuffle_players {
                game.shuffle_seats(rng);
            }
        }

        let finals: Vec<String> = game
            .players()
            .iter()
            .map(|player| format!("{}={}", player.name, player.elo_rating))
            .collect();
        info!(ratings = %finals.join(" "), "experiment finished");

        Ok(game.players().to_vec())
    }
}

fn record_snapshot<S: HistorySink + ?Sized>(game: &Game, sequence: usize, sink: &mut S) {
    for player in game.players() {
        sink.record(&player.name, sequence, player.elo_rating);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::outcome::{RngSource, ScriptedSource};

    fn runner(n_games: usize) -> ExperimentRunner {
        ExperimentRunner::new(
            ExperimentConfig {
                n_games,
                ..ExperimentConfig::default()
            },
            RatingConfig::default(),
        )
    }

    #[test]
    fn test_zero_games_keeps_initial_ratings() {
        let option = ScenarioOption::new(&["A", "B", "C", "D"], &[0.1, 0.2, 0.3, 0.4])
            .with_initial_ratings(&[1600, 1400, 1450, 1500]);
        let mut rng = ScriptedSource::new(vec![0.5]);

        let outcome = runner(0).run(&option, false, &mut rng).unwrap();

        assert_eq!(outcome.history.len(), 4);
        assert!(outcome.history.rows().iter().all(|row| row.sequence == 0));
        let ratings: Vec<_> = outcome.players.iter().map(|p| p.elo_rating).collect();
        assert_eq!(ratings, vec![1600, 1400, 1450, 1500]);
        assert_eq!(rng.consumed(), 0);
    }

    #[test]
    fn test_history_grows_one_row_per_player_per_round() {
        let option = ScenarioOption::new(&["A", "B"], &[0.5, 0.5]);
        let mut rng = RngSource::seeded(1);

        let outcome = runner(10).run(&option, false, &mut rng).unwrap();

        assert_eq!(outcome.history.len(), 2 * 11);
        for player in &outcome.players {
            assert_eq!(player.times_placed.total(), 10);
            assert_eq!(player.times_by_rating.total(), 10);
        }
    }

    #[test]
    fn test_certain_winner_keeps_climbing() {
        let option = ScenarioOption::new(&["A", "B"], &[1.0, 0.0]);
        let mut rng = RngSource::seeded(5);

        let outcome = runner(20).run(&option, true, &mut rng).unwrap();

        let a: Vec<_> = outcome.history.for_player("A").map(|row| row.rating).collect();
        assert_eq!(a.len(), 21);
        assert!(a.windows(2).all(|pair| pair[1] > pair[0]));
        assert_eq!(outcome.players[0].times_placed.counts, [20, 0, 0, 0]);
    }

    #[test]
    fn test_invalid_scenario_fails_before_any_round() {
        let option = ScenarioOption::new(&["A", "B", "C"], &[0.5, 0.5, 0.2]);
        let mut rng = ScriptedSource::new(vec![0.5]);
        let mut history = RatingHistory::new();

        let err = runner(5)
            .run_with_sink(&option, false, &mut rng, &mut history)
            .unwrap_err();

        assert!(crate::error::is_configuration_error(&err));
        assert!(history.is_empty());
    }

    #[test]
    fn test_duplicate_names_fail_before_any_round() {
        let option = ScenarioOption::new(&["A", "A"], &[1.0, 0.0]);
        let mut rng = ScriptedSource::new(vec![0.5]);
        let mut history = RatingHistory::new();

        let err = runner(5)
            .run_with_sink(&option, false, &mut rng, &mut history)
            .unwrap_err();

        assert!(crate::error::is_configuration_error(&err));
        assert!(history.is_empty());
        assert_eq!(rng.consumed(), 0);
    }

    #[test]
    fn test_team_scenario_requires_four_players() {
        let option = ScenarioOption::new(&["A", "B"], &[0.5, 0.5]).as_team();
        let mut rng = ScriptedSource::new(vec![0.5]);
        assert!(runner(1).run(&option, false, &mut rng).is_err());
    }
}
