//! Placement of the deferred player in odd rotation games
//!
//! The deferred player joins the side with the older average age, which is
//! expected to lean on a rotating substitute the most. Equal ages go to team B.

use tracing::debug;

use crate::types::{BalancePlayer, TeamSide};
use crate::utils::mean_age;

#[derive(Debug, Clone, Copy, Default)]
pub struct OddPlayerResolver;

impl OddPlayerResolver {
    pub fn new() -> Self {
        Self
    }

    /// Side the deferred player should join, judged on the teams before they join
    pub fn choose_side(&self, team_a: &[BalancePlayer], team_b: &[BalancePlayer]) -> TeamSide {
        if mean_age(team_a) > mean_age(team_b) {
            TeamSide::A
        } else {
            TeamSide::B
        }
    }

    /// Append the deferred player to the chosen side
    pub fn assign(
        &self,
        deferred: BalancePlayer,
        mut team_a: Vec<BalancePlayer>,
        mut team_b: Vec<BalancePlayer>,
    ) -> (Vec<BalancePlayer>, Vec<BalancePlayer>, TeamSide) {
        let side = self.choose_side(&team_a, &team_b);
        debug!(
            "Deferred player '{}' joins {} (mean ages {:.1} / {:.1})",
            deferred.id,
            side,
            mean_age(&team_a),
            mean_age(&team_b)
        );

        match side {
            TeamSide::A => team_a.push(deferred),
            TeamSide::B => team_b.push(deferred),
        }

        (team_a, team_b, side)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn player(id: &str, age: Option<f64>) -> BalancePlayer {
        BalancePlayer::new(id, 1200.0, age)
    }

    #[test]
    fn test_older_team_a_gets_deferred() {
        let resolver = OddPlayerResolver::new();
        let (team_a, team_b, side) = resolver.assign(
            player("sub", Some(25.0)),
            vec![player("a1", Some(40.0)), player("a2", Some(36.0))],
            vec![player("b1", Some(22.0)), player("b2", Some(30.0))],
        );

        assert_eq!(side, TeamSide::A);
        assert_eq!(team_a.len(), 3);
        assert_eq!(team_b.len(), 2);
        assert_eq!(team_a[2].id, "sub");
    }

    #[test]
    fn test_older_team_b_gets_deferred() {
        let resolver = OddPlayerResolver::new();
        let (_, team_b, side) = resolver.assign(
            player("sub", None),
            vec![player("a1", Some(20.0))],
            vec![player("b1", Some(45.0))],
        );

        assert_eq!(side, TeamSide::B);
        assert_eq!(team_b.last().unwrap().id, "sub");
    }

    #[test]
    fn test_equal_ages_favor_team_b() {
        let resolver = OddPlayerResolver::new();
        let (team_a, team_b, side) = resolver.assign(
            player("sub", Some(60.0)),
            vec![player("a1", Some(30.0)), player("a2", Some(34.0))],
            vec![player("b1", Some(32.0)), player("b2", Some(32.0))],
        );

        assert_eq!(side, TeamSide::B);
        assert_eq!(team_a.len(), 2);
        assert_eq!(team_b.len(), 3);
    }

    #[test]
    fn test_missing_ages_count_as_zero() {
        let resolver = OddPlayerResolver::new();

        let side = resolver.choose_side(&[player("a1", None)], &[player("b1", None)]);
        assert_eq!(side, TeamSide::B);

        let side = resolver.choose_side(&[player("a1", Some(18.0))], &[player("b1", None)]);
        assert_eq!(side, TeamSide::A);
    }
}
