//! Standings table built from a rating snapshot

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::rating::RatingSnapshot;
use crate::types::{PlayerId, Roster};

/// One row of the standings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Standing {
    pub rank: usize,
    pub player_id: PlayerId,
    pub full_name: Option<String>,
    pub rating: i64,
    pub uncertainty: f64,
    pub games_played: u32,
    pub last_played: Option<NaiveDate>,
}

/// Rank every rated player by mean, highest first, ties by player id
pub fn standings(snapshot: &RatingSnapshot, roster: &Roster) -> Vec<Standing> {
    let mut rows: Vec<_> = snapshot.iter().collect();
    // `iter` is in id order, so a stable sort keeps ties alphabetical
    rows.sort_by(|(_, a), (_, b)| b.mean.total_cmp(&a.mean));

    rows.into_iter()
        .enumerate()
        .map(|(position, (player_id, rating))| Standing {
            rank: position + 1,
            player_id: player_id.clone(),
            full_name: roster.get(player_id).and_then(|entry| entry.full_name.clone()),
            rating: rating.mean.round() as i64,
            uncertainty: rating.uncertainty,
            games_played: snapshot.games_played(player_id),
            last_played: snapshot.last_played(player_id),
        })
        .collect()
}
