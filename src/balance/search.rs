//! Brute-force search for the split with the smallest rating-sum gap
//!
//! Candidate team A line-ups are enumerated in lexicographic index order over
//! the rating-sorted pool, and the first candidate reaching the smallest gap
//! wins. The enumeration stops after `enumeration_budget` candidates; when that
//! happens the result is flagged as possibly suboptimal.

use itertools::Itertools;
use std::collections::HashSet;
use tracing::{debug, info, warn};

use crate::balance::odd_player::OddPlayerResolver;
use crate::config::BalanceConfig;
use crate::error::{BalancerError, Result};
use crate::types::{BalanceMode, BalancePlayer, BalanceResult, DeferredAssignment};
use crate::utils::{rating_difference, team_rating_sum};

/// Best candidate found by the enumeration
#[derive(Debug, Clone)]
struct Candidate {
    team_a: Vec<usize>,
    diff: f64,
}

#[derive(Debug, Clone)]
pub struct PartitionSearch {
    config: BalanceConfig,
    resolver: OddPlayerResolver,
}

impl Default for PartitionSearch {
    fn default() -> Self {
        Self {
            config: BalanceConfig::default(),
            resolver: OddPlayerResolver::new(),
        }
    }
}

impl PartitionSearch {
    pub fn new(config: BalanceConfig) -> Result<Self> {
        config.validate()?;

        Ok(Self {
            config,
            resolver: OddPlayerResolver::new(),
        })
    }

    pub fn config(&self) -> &BalanceConfig {
        &self.config
    }

    /// Split the selected players into two teams with the closest rating sums
    pub fn balance(&self, players: &[BalancePlayer], mode: BalanceMode) -> Result<BalanceResult> {
        validate_selection(players)?;

        let mut pool = players.to_vec();
        pool.sort_by(|a, b| b.rating.total_cmp(&a.rating));

        let deferred = if pool.len() % 2 == 1 && mode == BalanceMode::Rotation {
            pool.pop()
        } else {
            None
        };

        let (best, evaluated, possibly_suboptimal) = self.search(&pool);

        let mut in_team_a = vec![false; pool.len()];
        for &index in &best.team_a {
            in_team_a[index] = true;
        }
        let (team_a, team_b): (Vec<_>, Vec<_>) = pool
            .into_iter()
            .zip(in_team_a)
            .partition(|(_, in_a)| *in_a);
        let team_a: Vec<BalancePlayer> = team_a.into_iter().map(|(p, _)| p).collect();
        let team_b: Vec<BalancePlayer> = team_b.into_iter().map(|(p, _)| p).collect();

        let (team_a, team_b, deferred) = match deferred {
            Some(player) => {
                let (team_a, team_b, side) = self.resolver.assign(player.clone(), team_a, team_b);
                let assignment = DeferredAssignment {
                    player,
                    assigned_to: side,
                };
                (team_a, team_b, Some(assignment))
            }
            None => (team_a, team_b, None),
        };

        let result = BalanceResult {
            sum_a: team_rating_sum(&team_a),
            sum_b: team_rating_sum(&team_b),
            team_a,
            team_b,
            diff: best.diff,
            deferred,
            mode,
            combinations_evaluated: evaluated,
            possibly_suboptimal,
        };

        info!(
            "Balanced {} players ({}): {}v{}, diff {:.1}",
            players.len(),
            mode,
            result.team_a.len(),
            result.team_b.len(),
            result.diff
        );

        Ok(result)
    }

    /// Enumerate team A candidates of size `pool.len() / 2` within the budget
    fn search(&self, pool: &[BalancePlayer]) -> (Candidate, usize, bool) {
        let team_size = pool.len() / 2;
        let budget = self.config.enumeration_budget;

        let mut best: Option<Candidate> = None;
        let mut evaluated = 0;
        let mut combinations = (0..pool.len()).combinations(team_size);

        for team_a in combinations.by_ref().take(budget) {
            evaluated += 1;

            let mut in_team_a = vec![false; pool.len()];
            for &index in &team_a {
                in_team_a[index] = true;
            }
            let (sum_a, sum_b) = pool.iter().zip(&in_team_a).fold(
                (0.0, 0.0),
                |(sum_a, sum_b), (player, &in_a)| {
                    if in_a {
                        (sum_a + player.rating, sum_b)
                    } else {
                        (sum_a, sum_b + player.rating)
                    }
                },
            );
            let diff = rating_difference(sum_a, sum_b);

            if best.as_ref().map_or(true, |b| diff < b.diff) {
                debug!("Candidate #{} improves the gap to {:.1}", evaluated, diff);
                best = Some(Candidate { team_a, diff });
            }
        }

        let truncated = combinations.next().is_some();
        if truncated {
            warn!(
                "Enumeration budget of {} reached for {} players, result may not be optimal",
                budget,
                pool.len()
            );
        }

        // `combinations` always yields at least one candidate and the budget is positive
        let best = best.unwrap_or(Candidate {
            team_a: Vec::new(),
            diff: 0.0,
        });

        (best, evaluated, truncated)
    }
}

fn validate_selection(players: &[BalancePlayer]) -> Result<()> {
    if players.len() < 2 {
        return Err(BalancerError::NotEnoughPlayers {
            selected: players.len(),
        }
        .into());
    }

    let mut seen = HashSet::new();
    for player in players {
        if !seen.insert(player.id.as_str()) {
            return Err(BalancerError::InvalidBalanceRequest {
                reason: format!("player '{}' is selected more than once", player.id),
            }
            .into());
        }
        if !player.rating.is_finite() {
            return Err(BalancerError::InvalidBalanceRequest {
                reason: format!("player '{}' has no usable rating", player.id),
            }
            .into());
        }
    }

    Ok(())
}
