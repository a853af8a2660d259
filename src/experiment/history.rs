//! Rating history collected during an experiment
//!
//! Every snapshot is stamped with a synthetic calendar date, one day per
//! sequence step, so the rows can be fed straight into time-series charts.

use crate::types::Rating;
use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};

/// Receiver of `(name, sequence, rating)` rows
pub trait HistorySink {
    fn record(&mut self, name: &str, sequence: usize, rating: Rating);
}

/// One player's rating at one point of the run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RatingSnapshot {
    pub name: String,
    pub sequence: usize,
    pub date: NaiveDate,
    pub rating: Rating,
}

/// Append-only list of rating snapshots
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RatingHistory {
    start: NaiveDate,
    rows: Vec<RatingSnapshot>,
}

impl Default for RatingHistory {
    fn default() -> Self {
        Self::starting_at(NaiveDate::from_ymd_opt(1900, 1, 1).unwrap_or(NaiveDate::MIN))
    }
}

impl RatingHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// History whose sequence 0 is stamped with `start`
    pub fn starting_at(start: NaiveDate) -> Self {
        Self {
            start,
            rows: Vec::new(),
        }
    }

    pub fn start(&self) -> NaiveDate {
        self.start
    }

    /// Date stamped on rows of the given sequence step
    pub fn date_for(&self, sequence: usize) -> NaiveDate {
        self.start
            .checked_add_days(Days::new(sequence as u64))
            .unwrap_or(NaiveDate::MAX)
    }

    pub fn rows(&self) -> &[RatingSnapshot] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn clear(&mut self) {
        self.rows.clear();
    }

    /// Snapshots of one player, in recording order
    pub fn for_player<'a>(
        &'a self,
        name: &'a str,
    ) -> impl Iterator<Item = &'a RatingSnapshot> + 'a {
        self.rows.iter().filter(move |row| row.name == name)
    }

    /// Most recent rating recorded for `name`
    pub fn latest_rating(&self, name: &str) -> Option<Rating> {
        self.for_player(name).last().map(|row| row.rating)
    }

    /// Lowest and highest rating recorded for `name`
    pub fn rating_range(&self, name: &str) -> Option<(Rating, Rating)> {
        self.for_player(name).fold(None, |range, row| match range {
            None => Some((row.rating, row.rating)),
            Some((low, high)) => Some((low.min(row.rating), high.max(row.rating))),
        })
    }
}

impl HistorySink for RatingHistory {
    fn record(&mut self, name: &str, sequence: usize, rating: Rating) {
        let date = self.date_for(sequence);
        self.rows.push(RatingSnapshot {
            name: name.to_string(),
            sequence,
            date,
            rating,
        });
    }
}
