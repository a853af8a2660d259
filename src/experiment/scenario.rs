//! Experiment scenarios: who sits at the table and how likely they are to win

use crate::error::{EloError, Result};
use crate::game::GameSettings;
use crate::types::{Rating, MAX_PLAYERS};
use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// One table setup to simulate
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioOption {
    pub names: Vec<String>,
    pub win_ratios: Vec<f64>,
    /// Starting ratings; the configured default rating when absent
    #[serde(default)]
    pub initial_ratings: Option<Vec<Rating>>,
    /// Fixed teams {0, 2} vs {1, 3}
    #[serde(default)]
    pub team: bool,
    /// Reseat players randomly after every round
    #[serde(default)]
    pub shuffle_players: bool,
}

impl ScenarioOption {
    pub fn new(names: &[&str], win_ratios: &[f64]) -> Self {
        Self {
            names: names.iter().map(|name| name.to_string()).collect(),
            win_ratios: win_ratios.to_vec(),
            initial_ratings: None,
            team: false,
            shuffle_players: false,
        }
    }

    pub fn with_initial_ratings(mut self, ratings: &[Rating]) -> Self {
        self.initial_ratings = Some(ratings.to_vec());
        self
    }

    pub fn as_team(mut self) -> Self {
        self.team = true;
        self
    }

    pub fn with_shuffle(mut self) -> Self {
        self.shuffle_players = true;
        self
    }

    pub fn player_count(&self) -> usize {
        self.win_ratios.len()
    }

    /// Game rules for this scenario under the given scoring policy
    pub fn settings(&self, credit_winner_only: bool) -> GameSettings {
        GameSettings {
            credit_winner_only,
            team: self.team,
            shuffle_players: self.shuffle_players,
        }
    }

    /// Starting rating of seat `index`
    pub fn initial_rating(&self, index: usize, default_rating: Rating) -> Rating {
        self.initial_ratings
            .as_ref()
            .and_then(|ratings| ratings.get(index).copied())
            .unwrap_or(default_rating)
    }

    /// Check that names, ratios and ratings line up for a 2 to 4 player table.
    /// Names must be unique; history and reports are keyed by them.
    pub fn validate(&self) -> Result<()> {
        let count = self.player_count();
        if !(2..=MAX_PLAYERS).contains(&count) {
            return Err(EloError::configuration(format!(
                "scenarios need 2 to {} players, found {}",
                MAX_PLAYERS, count
            ))
            .into());
        }
        if self.names.len() != count {
            return Err(EloError::configuration(format!(
                "{} names for {} players",
                self.names.len(),
                count
            ))
            .into());
        }
        for (index, name) in self.names.iter().enumerate() {
            if self.names[..index].contains(name) {
                return Err(EloError::configuration(format!(
                    "player name {} is used more than once",
                    name
                ))
                .into());
            }
        }
        if let Some(ratings) = &self.initial_ratings {
            if ratings.len() != count {
                return Err(EloError::configuration(format!(
                    "{} initial ratings for {} players",
                    ratings.len(),
                    count
                ))
                .into());
            }
        }
        Ok(())
    }

    /// One-line summary for listings
    pub fn describe(&self) -> String {
        let seats: Vec<String> = self
            .names
            .iter()
            .zip(&self.win_ratios)
            .enumerate()
            .map(|(i, (name, ratio))| {
                match self.initial_ratings.as_ref().and_then(|r| r.get(i)) {
                    Some(rating) => format!("{} {:.3} @{}", name, ratio, rating),
                    None => format!("{} {:.3}", name, ratio),
                }
            })
            .collect();

        let mut flags = Vec::new();
        if self.team {
            flags.push("team");
        }
        if self.shuffle_players {
            flags.push("shuffled");
        }
        if flags.is_empty() {
            format!("{} players: {}", self.player_count(), seats.join(", "))
        } else {
            format!(
                "{} players ({}): {}",
                self.player_count(),
                flags.join(", "),
                seats.join(", ")
            )
        }
    }
}

const NAMES: [&str; 4] = ["Frank", "Mary", "Jim", "Susan"];

/// Built-in demonstration scenarios
pub fn presets() -> Vec<ScenarioOption> {
    let third = 1.0 / 3.0;
    let pair = &NAMES[..2];
    vec![
        // Frank starts highest but never wins; only Susan does
        ScenarioOption::new(&NAMES, &[0.0, 0.0, 0.0, 1.0])
            .with_initial_ratings(&[1600, 1400, 1400, 1400]),
        ScenarioOption::new(&NAMES, &[0.0, 0.333, 0.333, 0.334]),
        // Frank's team can never win
        ScenarioOption::new(&NAMES, &[0.0, third, third, third])
            .with_initial_ratings(&[1200, 1600, 1600, 1600])
            .as_team(),
        // Same, with teams reassigned between games
        ScenarioOption::new(&NAMES, &[0.0, third, third, third])
            .with_initial_ratings(&[1200, 1600, 1600, 1600])
            .as_team()
            .with_shuffle(),
        ScenarioOption::new(&NAMES, &[0.05, 0.70, 0.15, 0.1]),
        ScenarioOption::new(&NAMES, &[0.25, 0.25, 0.25, 0.25]),
        ScenarioOption::new(&NAMES, &[0.2, 0.3, 0.4, 0.1]),
        ScenarioOption::new(&NAMES, &[0.23, 0.24, 0.26, 0.27]),
        ScenarioOption::new(&NAMES, &[0.0, 0.1, 0.2, 0.7]),
        ScenarioOption::new(&NAMES, &[0.05, 0.15, 0.7, 0.1]),
        ScenarioOption::new(&NAMES, &[1.0, 0.0, 0.0, 0.0]),
        ScenarioOption::new(pair, &[0.01, 0.99]),
        ScenarioOption::new(pair, &[0.5, 0.5]),
        ScenarioOption::new(pair, &[0.45, 0.55]),
    ]
}

/// Scenario at `index` among `scenarios`
pub fn select(scenarios: &[ScenarioOption], index: usize) -> Result<&ScenarioOption> {
    scenarios
        .get(index)
        .ok_or_else(|| EloError::ScenarioNotFound { index }.into())
}

#[derive(Debug, Deserialize)]
struct ScenarioFile {
    scenarios: Vec<ScenarioOption>,
}

/// Parse `[[scenarios]]` tables from TOML text
pub fn parse_scenarios(contents: &str) -> Result<Vec<ScenarioOption>> {
    let file: ScenarioFile = toml::from_str(contents)?;
    for (index, scenario) in file.scenarios.iter().enumerate() {
        scenario
            .validate()
            .with_context(|| format!("scenario {} is invalid", index))?;
    }
    Ok(file.scenarios)
}

/// Load scenarios from a TOML file
pub fn load_scenarios(path: &Path) -> Result<Vec<ScenarioOption>> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read scenario file {}", path.display()))?;
    parse_scenarios(&contents)
}
