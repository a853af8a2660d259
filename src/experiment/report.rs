//! End-of-run summary of an experiment

use crate::experiment::runner::ExperimentOutcome;
use crate::experiment::scenario::ScenarioOption;
use crate::rating::ScoringMode;
use crate::types::{Rating, MAX_PLAYERS};
use serde::{Deserialize, Serialize};
use std::fmt::Write as _;

/// How one player fared over a run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerSummary {
    pub name: String,
    pub win_ratio: f64,
    pub initial_rating: Rating,
    pub final_rating: Rating,
    pub min_rating: Rating,
    pub max_rating: Rating,
    pub times_placed: [u64; MAX_PLAYERS],
    pub times_by_rating: [u64; MAX_PLAYERS],
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExperimentReport {
    pub games: usize,
    pub scoring: ScoringMode,
    pub team: bool,
    pub shuffle_players: bool,
    /// One entry per player, in the scenario's seat order
    pub players: Vec<PlayerSummary>,
}

impl ExperimentReport {
    pub fn new(
        option: &ScenarioOption,
        credit_winner_only: bool,
        games: usize,
        outcome: &ExperimentOutcome,
    ) -> Self {
        let settings = option.settings(credit_winner_only);
        let players = option
            .names
            .iter()
            .filter_map(|name| {
                let player = outcome.players.iter().find(|p| &p.name == name)?;
                let initial_rating = outcome
                    .history
                    .for_player(name)
                    .next()
                    .map(|row| row.rating)
                    .unwrap_or(player.elo_rating);
                let (min_rating, max_rating) = outcome
                    .history
                    .rating_range(name)
                    .unwrap_or((player.elo_rating, player.elo_rating));

                Some(PlayerSummary {
                    name: name.clone(),
                    win_ratio: player.win_ratio,
                    initial_rating,
                    final_rating: player.elo_rating,
                    min_rating,
                    max_rating,
                    times_placed: player.times_placed.counts,
                    times_by_rating: player.times_by_rating.counts,
                })
            })
            .collect();

        Self {
            games,
            scoring: settings.scoring_mode(),
            team: settings.team,
            shuffle_players: settings.shuffle_players,
            players,
        }
    }

    /// Plain-text table for terminal output
    pub fn render_table(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(
            out,
            "{} games, scoring {}{}{}",
            self.games,
            self.scoring,
            if self.team { ", team" } else { "" },
            if self.shuffle_players { ", shuffled" } else { "" }
        );
        let _ = writeln!(
            out,
            "{:<12} {:>6} {:>7} {:>7} {:>7} {:>7}  {:<24} {:<24}",
            "Player", "Ratio", "Start", "Final", "Min", "Max", "Placed 1st..4th", "Elo rank 1st..4th"
        );
        let _ = writeln!(out, "{}", "-".repeat(102));
        for player in &self.players {
            let _ = writeln!(
                out,
                "{:<12} {:>6.3} {:>7} {:>7} {:>7} {:>7}  {:<24} {:<24}",
                player.name,
                player.win_ratio,
                player.initial_rating,
                player.final_rating,
                player.min_rating,
                player.max_rating,
                format_tally(&player.times_placed),
                format_tally(&player.times_by_rating),
            );
        }
        out
    }
}

fn format_tally(counts: &[u64]) -> String {
    counts
        .iter()
        .map(|count| count.to_string())
        .collect::<Vec<_>>()
        .join("/")
}
