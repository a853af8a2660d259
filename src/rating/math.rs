//! Elo expectation and rating-delta formulas
//!
//! See <https://en.wikipedia.org/wiki/Elo_rating_system#Mathematical_details>.
//! The expectation is taken from the skillratings Elo implementation; the
//! update is applied here because this engine sums several pairwise
//! comparisons before moving a rating once.

use crate::types::Rating;
use skillratings::elo::{expected_score, EloRating};

/// Expected score of `rating_self` against `rating_opp`, in (0, 1):
/// `1 / (1 + 10^((rating_opp - rating_self) / 400))`
pub fn expectation(rating_self: Rating, rating_opp: Rating) -> f64 {
    let (expected_self, _expected_opp) = expected_score(
        &EloRating {
            rating: f64::from(rating_self),
        },
        &EloRating {
            rating: f64::from(rating_opp),
        },
    );
    expected_self
}

/// `round(old_rating + k * (actual - expected))`, rounding half away from zero
pub fn new_rating(old_rating: Rating, actual: f64, expected: f64, k: f64) -> Rating {
    let updated = f64::from(old_rating) + k * (actual - expected);
    updated.round() as Rating
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_equal_ratings_expect_half() {
        assert_eq!(expectation(1500, 1500), 0.5);
        assert_eq!(expectation(1200, 1200), 0.5);
    }

    #[test]
    fn test_expectation_favours_higher_rating() {
        assert!(expectation(1700, 1300) > 0.9);
        assert!(expectation(1300, 1700) < 0.1);
        assert!((expectation(1634, 1459) + expectation(1459, 1634) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_two_player_reference_vectors() {
        let expected = expectation(1500, 1500);

        assert_eq!(new_rating(1500, 1.0, expected, 30.0), 1515);
        assert_eq!(new_rating(1500, 0.0, expected, 30.0), 1485);

        // Loser with the larger K drops further
        assert_eq!(new_rating(1500, 0.0, expected, 50.0), 1475);
        assert_eq!(new_rating(1500, 1.0, expected, 50.0), 1525);
    }

    #[test]
    fn test_new_rating_rounds_half_up_for_positive_ratings() {
        // 1500 + 30 * (1.0 - 0.85) = 1504.5
        assert_eq!(new_rating(1500, 1.0, 0.85, 30.0), 1505);
        // 1500 + 30 * (0.0 - 0.15) = 1495.5
        assert_eq!(new_rating(1500, 0.0, 0.15, 30.0), 1496);
    }
}
