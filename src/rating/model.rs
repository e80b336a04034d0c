//! Rating model trait and a fallback implementation
//!
//! A rating model compares two teams and returns updated ratings for every
//! participant. Conforming models move the winners' means up and the losers'
//! means down, scale each player's movement by their weight (weight 0 means
//! no change) and never grow a player's uncertainty.

use crate::error::{BalancerError, Result};
use crate::types::{MatchOutcome, PlayerRating};

/// Trait for two-team rating updates
pub trait RatingModel: Send + Sync {
    /// Rate a finished match
    ///
    /// # Arguments
    /// * `teams` - Current ratings of team A and team B
    /// * `outcome` - Result from team A's point of view
    /// * `weights` - Per-player participation weights, same shape as `teams`
    ///
    /// # Returns
    /// Updated ratings with the same shape and order as `teams`
    fn rate(
        &self,
        teams: [&[PlayerRating]; 2],
        outcome: MatchOutcome,
        weights: [&[f64]; 2],
    ) -> Result<[Vec<PlayerRating>; 2]>;

    /// Rating given to players seen for the first time
    fn initial_rating(&self) -> PlayerRating;
}

/// Check that teams and weights line up and weights lie in [0, 1]
pub fn check_rate_inputs(teams: [&[PlayerRating]; 2], weights: [&[f64]; 2]) -> Result<()> {
    for (team, team_weights) in teams.iter().zip(weights.iter()) {
        if team.is_empty() {
            return Err(BalancerError::RatingCalculationFailed {
                reason: "Cannot rate a match with an empty team".to_string(),
            }
            .into());
        }

        if team.len() != team_weights.len() {
            return Err(BalancerError::RatingCalculationFailed {
                reason: format!(
                    "Expected {} weights, got {}",
                    team.len(),
                    team_weights.len()
                ),
            }
            .into());
        }

        if let Some(weight) = team_weights
            .iter()
            .find(|w| !w.is_finite() || **w < 0.0 || **w > 1.0)
        {
            return Err(BalancerError::RatingCalculationFailed {
                reason: format!("Weight {} is outside [0, 1]", weight),
            }
            .into());
        }
    }

    Ok(())
}

/// Rating model that leaves every rating unchanged
#[derive(Debug, Clone)]
pub struct NoOpRatingModel {
    initial_rating: PlayerRating,
}

impl NoOpRatingModel {
    pub fn new(initial_rating: PlayerRating) -> Self {
        Self { initial_rating }
    }
}

impl Default for NoOpRatingModel {
    fn default() -> Self {
        Self::new(PlayerRating::new(1200.0, 400.0))
    }
}

impl RatingModel for NoOpRatingModel {
    fn rate(
        &self,
        teams: [&[PlayerRating]; 2],
        _outcome: MatchOutcome,
        weights: [&[f64]; 2],
    ) -> Result<[Vec<PlayerRating>; 2]> {
        check_rate_inputs(teams, weights)?;
        Ok([teams[0].to_vec(), teams[1].to_vec()])
    }

    fn initial_rating(&self) -> PlayerRating {
        self.initial_rating
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rating(mean: f64) -> PlayerRating {
        PlayerRating::new(mean, 400.0)
    }

    #[test]
    fn test_noop_model_keeps_ratings() {
        let model = NoOpRatingModel::default();
        let team_a = [rating(1300.0), rating(1100.0)];
        let team_b = [rating(1200.0)];

        let [new_a, new_b] = model
            .rate(
                [&team_a, &team_b],
                MatchOutcome::TeamAWins,
                [&[1.0, 1.0], &[1.0]],
            )
            .unwrap();

        assert_eq!(new_a, team_a.to_vec());
        assert_eq!(new_b, team_b.to_vec());
        assert_eq!(model.initial_rating().mean, 1200.0);
    }

    #[test]
    fn test_weight_shape_mismatch() {
        let team = [rating(1200.0), rating(1200.0)];
        let result = check_rate_inputs([&team, &team], [&[1.0], &[1.0, 1.0]]);
        assert!(result.is_err());
    }

    #[test]
    fn test_weight_out_of_range() {
        let team = [rating(1200.0)];
        assert!(check_rate_inputs([&team, &team], [&[1.5], &[1.0]]).is_err());
        assert!(check_rate_inputs([&team, &team], [&[-0.1], &[1.0]]).is_err());
        assert!(check_rate_inputs([&team, &team], [&[f64::NAN], &[1.0]]).is_err());
        assert!(check_rate_inputs([&team, &team], [&[0.0], &[1.0]]).is_ok());
    }

    #[test]
    fn test_empty_team_rejected() {
        let team = [rating(1200.0)];
        assert!(check_rate_inputs([&[], &team], [&[], &[1.0]]).is_err());
    }
}
