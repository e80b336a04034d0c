//! Rating system configuration

use serde::{Deserialize, Serialize};
use skillratings::weng_lin::WengLinConfig;

use crate::error::{BalancerError, Result};
use crate::types::PlayerRating;

/// Parameters of the Weng-Lin rating model and of newly seeded players
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RatingConfig {
    /// Mean for players without a declared initial rating
    pub initial_rating: f64,
    /// Uncertainty every player starts with
    pub initial_uncertainty: f64,
    /// Skill difference giving roughly a 76% win chance
    pub beta: f64,
    /// Lower bound on the variance shrink factor (kappa)
    pub uncertainty_tolerance: f64,
}

impl Default for RatingConfig {
    fn default() -> Self {
        Self {
            initial_rating: 1200.0,
            initial_uncertainty: 400.0,
            beta: 200.0,
            uncertainty_tolerance: 0.0001,
        }
    }
}

impl RatingConfig {
    /// Rating used for anyone not seeded from the roster
    pub fn default_rating(&self) -> PlayerRating {
        PlayerRating::new(self.initial_rating, self.initial_uncertainty)
    }

    pub fn weng_lin_config(&self) -> WengLinConfig {
        WengLinConfig {
            beta: self.beta,
            uncertainty_tolerance: self.uncertainty_tolerance,
        }
    }

    /// Validate configuration parameters
    pub fn validate(&self) -> Result<()> {
        if !self.initial_rating.is_finite() {
            return Err(BalancerError::ConfigurationError {
                message: "Initial rating must be a finite number".to_string(),
            }
            .into());
        }

        if !self.beta.is_finite() || self.beta <= 0.0 {
            return Err(BalancerError::ConfigurationError {
                message: "Beta must be a positive finite number".to_string(),
            }
            .into());
        }

        if !self.uncertainty_tolerance.is_finite() || self.uncertainty_tolerance < 0.0 {
            return Err(BalancerError::ConfigurationError {
                message: "Uncertainty tolerance must be a non-negative finite number".to_string(),
            }
            .into());
        }

        if !self.initial_uncertainty.is_finite() || self.initial_uncertainty <= 0.0 {
            return Err(BalancerError::ConfigurationError {
                message: "Initial uncertainty must be a positive finite number".to_string(),
            }
            .into());
        }

        Ok(())
    }
}
