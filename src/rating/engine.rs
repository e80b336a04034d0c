//! Full replay of the match log
//!
//! Ratings are never stored between queries. Every call to
//! [`RatingEngine::recompute`] seeds the roster, replays the whole log in
//! order and hands back a fresh [`RatingSnapshot`], so identical inputs always
//! give identical snapshots.

use anyhow::Context;
use tracing::{debug, info};

use crate::config::RatingConfig;
use crate::error::{BalancerError, Result};
use crate::rating::model::RatingModel;
use crate::rating::snapshot::RatingSnapshot;
use crate::rating::weights::derive_weights;
use crate::rating::weng_lin::WengLinModel;
use crate::types::{MatchRecord, PlayerId, PlayerRating, Roster};

/// Replays match history through a rating model
#[derive(Debug, Clone)]
pub struct RatingEngine<M: RatingModel = WengLinModel> {
    model: M,
}

impl RatingEngine<WengLinModel> {
    /// Engine backed by the Weng-Lin model
    pub fn from_config(config: RatingConfig) -> Result<Self> {
        Ok(Self::new(WengLinModel::new(config)?))
    }
}

impl<M: RatingModel> RatingEngine<M> {
    pub fn new(model: M) -> Self {
        Self { model }
    }

    pub fn model(&self) -> &M {
        &self.model
    }

    /// Derive every player's rating from the roster and the ordered match log
    pub fn recompute(&self, matches: &[MatchRecord], roster: &Roster) -> Result<RatingSnapshot> {
        // A bad record aborts before any rating is touched
        for (index, record) in matches.iter().enumerate() {
            record.validate(index)?;
        }

        let default_rating = self.model.initial_rating();
        let mut snapshot = RatingSnapshot::default();

        for (player_id, entry) in roster {
            snapshot.seed(
                player_id.clone(),
                PlayerRating::new(
                    entry.initial_elo.unwrap_or(default_rating.mean),
                    default_rating.uncertainty,
                ),
            );
        }

        for (index, record) in matches.iter().enumerate() {
            self.replay_match(&mut snapshot, index, record, default_rating)?;
        }

        snapshot.set_matches_replayed(matches.len());

        info!(
            "Replayed {} matches into ratings for {} players",
            matches.len(),
            snapshot.len()
        );

        Ok(snapshot)
    }

    fn replay_match(
        &self,
        snapshot: &mut RatingSnapshot,
        index: usize,
        record: &MatchRecord,
        default_rating: PlayerRating,
    ) -> Result<()> {
        for player_id in record.participants() {
            if !snapshot.contains(player_id) {
                debug!("Seeding latecomer '{}' at match #{}", player_id, index);
                snapshot.seed(player_id.clone(), default_rating);
            }
        }

        let team_a = current_ratings(snapshot, &record.team_a)?;
        let team_b = current_ratings(snapshot, &record.team_b)?;
        let weights = derive_weights(team_a.len(), team_b.len(), record.rotation)?;

        let [new_a, new_b] = self
            .model
            .rate(
                [&team_a, &team_b],
                record.outcome(),
                [&weights.team_a, &weights.team_b],
            )
            .with_context(|| format!("Failed to rate match #{} ({})", index, record.date))?;

        if new_a.len() != team_a.len() || new_b.len() != team_b.len() {
            return Err(BalancerError::RatingCalculationFailed {
                reason: format!(
                    "Model returned {}v{} ratings for a {}v{} match #{}",
                    new_a.len(),
                    new_b.len(),
                    team_a.len(),
                    team_b.len(),
                    index
                ),
            }
            .into());
        }

        let played_on = record.played_on();
        for (player_id, rating) in record.team_a.iter().zip(new_a) {
            snapshot.record_result(player_id, rating, played_on);
        }
        for (player_id, rating) in record.team_b.iter().zip(new_b) {
            snapshot.record_result(player_id, rating, played_on);
        }

        debug!(
            "Match #{} ({}) {}-{} replayed, rotation: {}",
            index, record.date, record.score_a, record.score_b, record.rotation
        );

        Ok(())
    }
}

fn current_ratings(snapshot: &RatingSnapshot, team: &[PlayerId]) -> Result<Vec<PlayerRating>> {
    team.iter()
        .map(|player_id| {
            snapshot.get(player_id).ok_or_else(|| {
                anyhow::Error::from(BalancerError::RatingCalculationFailed {
                    reason: format!("Player '{}' has no rating", player_id),
                })
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rating::model::NoOpRatingModel;
    use crate::types::{MatchOutcome, RosterEntry};
    use std::sync::Mutex;

    /// Records what the engine hands to the model
    #[derive(Debug, Default)]
    struct RecordingModel {
        calls: Mutex<Vec<(Vec<f64>, Vec<f64>, MatchOutcome)>>,
    }

    impl RatingModel for RecordingModel {
        fn rate(
            &self,
            teams: [&[PlayerRating]; 2],
            outcome: MatchOutcome,
            weights: [&[f64]; 2],
        ) -> Result<[Vec<PlayerRating>; 2]> {
            if let Ok(mut calls) = self.calls.lock() {
                calls.push((weights[0].to_vec(), weights[1].to_vec(), outcome));
            }
            Ok([teams[0].to_vec(), teams[1].to_vec()])
        }

        fn initial_rating(&self) -> PlayerRating {
            PlayerRating::new(1200.0, 400.0)
        }
    }

    fn record(team_a: &[&str], team_b: &[&str], score_a: u32, score_b: u32) -> MatchRecord {
        MatchRecord {
            date: "2025-04-12".to_string(),
            team_a: team_a.iter().map(|p| p.to_string()).collect(),
            team_b: team_b.iter().map(|p| p.to_string()).collect(),
            score_a,
            score_b,
            rotation: false,
        }
    }

    fn roster() -> Roster {
        let mut roster = Roster::new();
        roster.insert(
            "ana".to_string(),
            RosterEntry {
                initial_elo: Some(1350.0),
                ..RosterEntry::default()
            },
        );
        roster.insert("ben".to_string(), RosterEntry::default());
        roster
    }

    #[test]
    fn test_empty_history_uses_roster_seeds() {
        let engine = RatingEngine::from_config(RatingConfig::default()).unwrap();
        let snapshot = engine.recompute(&[], &roster()).unwrap();

        assert_eq!(snapshot.len(), 2);
        assert_eq!(snapshot.get("ana").unwrap().mean, 1350.0);
        assert_eq!(snapshot.get("ben").unwrap().mean, 1200.0);
        assert_eq!(snapshot.get("ben").unwrap().uncertainty, 400.0);
        assert_eq!(snapshot.matches_replayed(), 0);
    }

    #[test]
    fn test_latecomers_seeded_on_first_appearance() {
        let engine = RatingEngine::new(NoOpRatingModel::default());
        let matches = vec![record(&["ana", "cai"], &["ben", "dia"], 2, 1)];

        let snapshot = engine.recompute(&matches, &roster()).unwrap();

        assert_eq!(snapshot.len(), 4);
        assert_eq!(snapshot.get("cai").unwrap().mean, 1200.0);
        assert_eq!(snapshot.games_played("cai"), 1);
        assert_eq!(snapshot.games_played("ana"), 1);
    }

    #[test]
    fn test_replay_moves_ratings() {
        let engine = RatingEngine::from_config(RatingConfig::default()).unwrap();
        let matches = vec![
            record(&["ana", "cai"], &["ben", "dia"], 5, 3),
            record(&["ana", "ben"], &["cai", "dia"], 2, 2),
        ];

        let snapshot = engine.recompute(&matches, &roster()).unwrap();
        assert!(snapshot.get("cai").unwrap().mean > 1200.0);
        assert!(snapshot.get("dia").unwrap().mean < 1200.0);
        assert!(snapshot.get("dia").unwrap().uncertainty < 400.0);
        assert_eq!(snapshot.games_played("dia"), 2);
        assert_eq!(snapshot.matches_replayed(), 2);
    }

    #[test]
    fn test_recompute_is_deterministic() {
        let engine = RatingEngine::from_config(RatingConfig::default()).unwrap();
        let mut rotation = record(&["ana", "cai", "eve"], &["ben", "dia"], 1, 4);
        rotation.rotation = true;
        let matches = vec![
            record(&["ana", "cai"], &["ben", "dia"], 5, 3),
            rotation,
            record(&["ana", "dia"], &["ben", "cai"], 0, 0),
        ];

        let first = engine.recompute(&matches, &roster()).unwrap();
        let second = engine.recompute(&matches, &roster()).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_engine_passes_rotation_weights_and_outcome() {
        let engine = RatingEngine::new(RecordingModel::default());
        let mut rotation = record(
            &["p1", "p2", "p3", "p4", "p5", "p6"],
            &["q1", "q2", "q3", "q4", "q5"],
            3,
            4,
        );
        rotation.rotation = true;

        engine.recompute(&[rotation], &Roster::new()).unwrap();

        let calls = engine.model().calls.lock().unwrap();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].0, vec![5.0 / 6.0; 6]);
        assert_eq!(calls[0].1, vec![1.0; 5]);
        assert_eq!(calls[0].2, MatchOutcome::TeamBWins);
    }

    #[test]
    fn test_malformed_record_aborts_replay() {
        let engine = RatingEngine::from_config(RatingConfig::default()).unwrap();
        let matches = vec![
            record(&["ana"], &["ben"], 1, 0),
            record(&["ana"], &["ana"], 1, 0),
        ];

        let err = engine.recompute(&matches, &roster()).unwrap_err();
        match err.downcast_ref::<BalancerError>() {
            Some(BalancerError::InvalidMatchRecord { index, .. }) => assert_eq!(*index, 1),
            other => panic!("unexpected error: {:?}", other),
        }
    }
}
