//! Test fixtures and mock implementations for integration testing

use std::sync::Mutex;
use team_balancer::error::Result;
use team_balancer::types::{MatchOutcome, MatchRecord, PlayerRating, Roster, RosterEntry};
use team_balancer::RatingModel;

/// Build a match record from player names and scores
pub fn match_record(
    date: &str,
    team_a: &[&str],
    team_b: &[&str],
    score_a: u32,
    score_b: u32,
) -> MatchRecord {
    MatchRecord {
        date: date.to_string(),
        team_a: team_a.iter().map(|p| p.to_string()).collect(),
        team_b: team_b.iter().map(|p| p.to_string()).collect(),
        score_a,
        score_b,
        rotation: false,
    }
}

/// Same as [`match_record`] with the rotation flag set
pub fn rotation_record(
    date: &str,
    team_a: &[&str],
    team_b: &[&str],
    score_a: u32,
    score_b: u32,
) -> MatchRecord {
    MatchRecord {
        rotation: true,
        ..match_record(date, team_a, team_b, score_a, score_b)
    }
}

/// Roster entry with the given metadata
pub fn roster_entry(full_name: Option<&str>, age: Option<f64>, initial_elo: Option<f64>) -> RosterEntry {
    RosterEntry {
        full_name: full_name.map(str::to_string),
        age,
        initial_elo,
    }
}

/// Roster JSON the way it sits in `data/players.json`
pub const ROSTER_JSON: &str = r#"{
    "alex":  {"full_name": "Alex Moreau",  "age": 29},
    "bruno": {"full_name": "Bruno Silva",  "age": "41"},
    "chen":  {"full_name": "Chen Wei",     "age": 33, "initial_elo": 1300},
    "dana":  {"full_name": "Dana Kowalski","age": "?"},
    "emil":  {"age": 24},
    "femi":  {"full_name": "Femi Adeyemi", "age": 37, "initial_elo": 1150}
}"#;

/// Match log JSON the way it sits in `data/matches.json`
pub const MATCHES_JSON: &str = r#"[
    {"date": "2025-01-11", "team_a": ["alex", "bruno", "chen"], "team_b": ["dana", "emil", "femi"],
     "score_a": 7, "score_b": 4},
    {"date": "2025-01-18", "team_a": ["alex", "dana", "emil"], "team_b": ["bruno", "chen", "femi"],
     "score_a": 3, "score_b": 3},
    {"date": "2025-01-25", "team_a": ["alex", "chen", "emil", "gus"], "team_b": ["bruno", "dana", "femi"],
     "score_a": 5, "score_b": 6, "rotation": true},
    {"date": "2025-02-01", "team_a": ["alex", "femi", "gus"], "team_b": ["bruno", "chen", "dana"],
     "score_a": 9, "score_b": 2}
]"#;

/// Rating model that records every call and leaves ratings unchanged
#[derive(Debug, Default)]
pub struct RecordingRatingModel {
    calls: Mutex<Vec<RecordedCall>>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RecordedCall {
    pub team_sizes: (usize, usize),
    pub outcome: MatchOutcome,
    pub weights: (Vec<f64>, Vec<f64>),
}

impl RecordingRatingModel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get all calls made (for testing)
    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls
            .lock()
            .map(|calls| calls.clone())
            .unwrap_or_default()
    }
}

impl RatingModel for RecordingRatingModel {
    fn rate(
        &self,
        teams: [&[PlayerRating]; 2],
        outcome: MatchOutcome,
        weights: [&[f64]; 2],
    ) -> Result<[Vec<PlayerRating>; 2]> {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(RecordedCall {
                team_sizes: (teams[0].len(), teams[1].len()),
                outcome,
                weights: (weights[0].to_vec(), weights[1].to_vec()),
            });
        }
        Ok([teams[0].to_vec(), teams[1].to_vec()])
    }

    fn initial_rating(&self) -> PlayerRating {
        PlayerRating::new(1200.0, 400.0)
    }
}

/// Roster holding only declared initial ratings
pub fn rated_roster(entries: &[(&str, f64)]) -> Roster {
    entries
        .iter()
        .map(|(id, elo)| (id.to_string(), roster_entry(None, None, Some(*elo))))
        .collect()
}
