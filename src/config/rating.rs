//! Rating system configuration

use crate::rating::RatingEngine;
use crate::types::{Rating, DEFAULT_RATING};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RatingConfig {
    /// Elo K: how far one round can move a rating
    pub k_factor: f64,
    /// Starting rating for players without an explicit one
    pub default_rating: Rating,
}

impl Default for RatingConfig {
    fn default() -> Self {
        Self {
            k_factor: RatingEngine::DEFAULT_K_FACTOR,
            default_rating: DEFAULT_RATING,
        }
    }
}

impl RatingConfig {
    /// Engine configured with this K
    pub fn engine(&self) -> crate::error::Result<RatingEngine> {
        RatingEngine::new(self.k_factor)
    }
}
