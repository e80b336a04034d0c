//! Immutable result of a rating replay

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::types::{PlayerId, PlayerRating};

/// Every known player's rating after replaying the match log
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RatingSnapshot {
    ratings: BTreeMap<PlayerId, PlayerRating>,
    games_played: BTreeMap<PlayerId, u32>,
    last_played: BTreeMap<PlayerId, NaiveDate>,
    matches_replayed: usize,
}

impl RatingSnapshot {
    pub fn get(&self, player_id: &str) -> Option<PlayerRating> {
        self.ratings.get(player_id).copied()
    }

    /// Rating mean, or `fallback` for players the snapshot has never seen
    pub fn mean_or(&self, player_id: &str, fallback: f64) -> f64 {
        self.get(player_id).map(|r| r.mean).unwrap_or(fallback)
    }

    pub fn contains(&self, player_id: &str) -> bool {
        self.ratings.contains_key(player_id)
    }

    pub fn games_played(&self, player_id: &str) -> u32 {
        self.games_played.get(player_id).copied().unwrap_or(0)
    }

    pub fn last_played(&self, player_id: &str) -> Option<NaiveDate> {
        self.last_played.get(player_id).copied()
    }

    pub fn matches_replayed(&self) -> usize {
        self.matches_replayed
    }

    pub fn len(&self) -> usize {
        self.ratings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ratings.is_empty()
    }

    /// Players and ratings in player-id order
    pub fn iter(&self) -> impl Iterator<Item = (&PlayerId, &PlayerRating)> {
        self.ratings.iter()
    }

    pub(crate) fn seed(&mut self, player_id: PlayerId, rating: PlayerRating) {
        self.ratings.insert(player_id, rating);
    }

    pub(crate) fn record_result(
        &mut self,
        player_id: &PlayerId,
        rating: PlayerRating,
        played_on: Option<NaiveDate>,
    ) {
        self.ratings.insert(player_id.clone(), rating);
        *self.games_played.entry(player_id.clone()).or_insert(0) += 1;
        if let Some(date) = played_on {
            let last = self.last_played.entry(player_id.clone()).or_insert(date);
            if date > *last {
                *last = date;
            }
        }
    }

    pub(crate) fn set_matches_replayed(&mut self, matches_replayed: usize) {
        self.matches_replayed = matches_replayed;
    }
}
