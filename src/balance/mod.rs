//! Balanced two-team splits for a selected group of players
//!
//! This module handles the brute-force partition search, the placement of
//! the deferred player in odd rotation games, and building the selection
//! from a rating snapshot.

pub mod odd_player;
pub mod search;

// Re-export commonly used types
pub use odd_player::OddPlayerResolver;
pub use search::PartitionSearch;

use crate::rating::RatingSnapshot;
use crate::types::{BalancePlayer, PlayerRating, Roster};

impl BalancePlayer {
    /// Build a selected player from the snapshot, falling back to
    /// `fallback_rating` for ids neither the roster nor the log know
    pub fn from_snapshot(
        player_id: &str,
        snapshot: &RatingSnapshot,
        roster: &Roster,
        fallback_rating: f64,
    ) -> Self {
        Self {
            id: player_id.to_string(),
            rating: snapshot.mean_or(player_id, fallback_rating),
            age: roster.get(player_id).and_then(|entry| entry.age),
        }
    }
}

/// Build the balance input for a list of player ids, keeping their order
pub fn select_players<S: AsRef<str>>(
    player_ids: &[S],
    snapshot: &RatingSnapshot,
    roster: &Roster,
    fallback_rating: f64,
) -> Vec<BalancePlayer> {
    player_ids
        .iter()
        .map(|id| BalancePlayer::from_snapshot(id.as_ref(), snapshot, roster, fallback_rating))
        .collect()
}

/// Full ratings of a team, with `fallback` for players the snapshot has never seen
pub fn team_ratings(
    team: &[BalancePlayer],
    snapshot: &RatingSnapshot,
    fallback: PlayerRating,
) -> Vec<PlayerRating> {
    team.iter()
        .map(|player| snapshot.get(&player.id).unwrap_or(fallback))
        .collect()
}
