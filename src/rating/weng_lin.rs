//! Weng-Lin (OpenSkill) rating model
//!
//! This module provides the concrete rating model used for replay, built on
//! the two-team Weng-Lin update from the skillratings crate. The crate has no
//! notion of partial participation, so weights are applied on top of its
//! full update: a player with weight `w` keeps `w` of the mean shift and `w`
//! of the variance reduction.

use skillratings::weng_lin::{expected_score_two_teams, weng_lin_two_teams, WengLinRating};
use skillratings::Outcomes;

use crate::config::RatingConfig;
use crate::error::Result;
use crate::rating::model::{check_rate_inputs, RatingModel};
use crate::types::{MatchOutcome, PlayerRating};

/// Weng-Lin rating model
#[derive(Debug, Clone)]
pub struct WengLinModel {
    config: RatingConfig,
}

impl WengLinModel {
    /// Create a new Weng-Lin rating model
    pub fn new(config: RatingConfig) -> Result<Self> {
        config.validate()?;

        Ok(Self { config })
    }

    pub fn config(&self) -> &RatingConfig {
        &self.config
    }

    /// Win probabilities of team A and team B
    pub fn expected_score(&self, team_a: &[PlayerRating], team_b: &[PlayerRating]) -> (f64, f64) {
        if team_a.is_empty() || team_b.is_empty() {
            return (0.5, 0.5);
        }

        let team_a: Vec<WengLinRating> = team_a.iter().map(|r| (*r).into()).collect();
        let team_b: Vec<WengLinRating> = team_b.iter().map(|r| (*r).into()).collect();

        expected_score_two_teams(&team_a, &team_b, &self.config.weng_lin_config())
    }
}

impl Default for WengLinModel {
    fn default() -> Self {
        Self {
            config: RatingConfig::default(),
        }
    }
}

impl RatingModel for WengLinModel {
    fn rate(
        &self,
        teams: [&[PlayerRating]; 2],
        outcome: MatchOutcome,
        weights: [&[f64]; 2],
    ) -> Result<[Vec<PlayerRating>; 2]> {
        check_rate_inputs(teams, weights)?;

        let team_a: Vec<WengLinRating> = teams[0].iter().map(|r| (*r).into()).collect();
        let team_b: Vec<WengLinRating> = teams[1].iter().map(|r| (*r).into()).collect();

        let outcome = match outcome {
            MatchOutcome::TeamAWins => Outcomes::WIN,
            MatchOutcome::TeamBWins => Outcomes::LOSS,
            MatchOutcome::Draw => Outcomes::DRAW,
        };

        let (full_a, full_b) =
            weng_lin_two_teams(&team_a, &team_b, &outcome, &self.config.weng_lin_config());

        let weighted = |old: &[PlayerRating], full: Vec<WengLinRating>, weights: &[f64]| {
            old.iter()
                .zip(full)
                .zip(weights)
                .map(|((old, full), weight)| apply_weight(*old, full.into(), *weight))
                .collect::<Vec<_>>()
        };

        Ok([
            weighted(teams[0], full_a, weights[0]),
            weighted(teams[1], full_b, weights[1]),
        ])
    }

    fn initial_rating(&self) -> PlayerRating {
        self.config.default_rating()
    }
}

/// Scale a full update down to `weight` of its effect
fn apply_weight(old: PlayerRating, full: PlayerRating, weight: f64) -> PlayerRating {
    let mean = old.mean + weight * (full.mean - old.mean);

    let old_variance = old.uncertainty.powi(2);
    let full_variance = full.uncertainty.powi(2).min(old_variance);
    let variance = old_variance - weight * (old_variance - full_variance);

    PlayerRating::new(mean, variance.sqrt())
}
