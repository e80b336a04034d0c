//! Participation weights for rotation matches
//!
//! In a rotation match the bigger side had substitutes coming on and off, so
//! only `field_size` of its players were on the pitch at any moment. Every
//! member of that side gets `field_size / team_size` of the usual credit.

use serde::{Deserialize, Serialize};

use crate::error::{BalancerError, Result};

/// Per-player weights for both sides of a match
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeamWeights {
    pub team_a: Vec<f64>,
    pub team_b: Vec<f64>,
}

/// Derive participation weights from the team sizes and the rotation flag
pub fn derive_weights(team_a_size: usize, team_b_size: usize, rotation: bool) -> Result<TeamWeights> {
    if team_a_size == 0 || team_b_size == 0 {
        return Err(BalancerError::RatingCalculationFailed {
            reason: format!(
                "Cannot weight a {}v{} match, both teams need players",
                team_a_size, team_b_size
            ),
        }
        .into());
    }

    if !rotation {
        return Ok(TeamWeights {
            team_a: vec![1.0; team_a_size],
            team_b: vec![1.0; team_b_size],
        });
    }

    let field_size = team_a_size.min(team_b_size);
    Ok(TeamWeights {
        team_a: vec![field_share(field_size, team_a_size); team_a_size],
        team_b: vec![field_share(field_size, team_b_size); team_b_size],
    })
}

fn field_share(field_size: usize, team_size: usize) -> f64 {
    if team_size > field_size {
        field_size as f64 / team_size as f64
    } else {
        1.0
    }
}
