//! Common types used throughout the rating and balancing pipeline

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};
use skillratings::weng_lin::WengLinRating;
use std::collections::{BTreeMap, HashSet};

use crate::error::{BalancerError, Result};

/// Unique identifier for players
pub type PlayerId = String;

/// Roster metadata keyed by player id
pub type Roster = BTreeMap<PlayerId, RosterEntry>;

/// Date format used by the match log
pub const MATCH_DATE_FORMAT: &str = "%Y-%m-%d";

/// Rating information for a player
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlayerRating {
    /// Point skill estimate
    pub mean: f64,
    /// Confidence width, higher means less certain
    pub uncertainty: f64,
}

impl PlayerRating {
    pub fn new(mean: f64, uncertainty: f64) -> Self {
        Self { mean, uncertainty }
    }
}

impl From<WengLinRating> for PlayerRating {
    fn from(rating: WengLinRating) -> Self {
        Self {
            mean: rating.rating,
            uncertainty: rating.uncertainty,
        }
    }
}

impl From<PlayerRating> for WengLinRating {
    fn from(rating: PlayerRating) -> Self {
        Self {
            rating: rating.mean,
            uncertainty: rating.uncertainty,
        }
    }
}

/// One side of a two-team match or split
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TeamSide {
    A,
    B,
}

impl std::fmt::Display for TeamSide {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TeamSide::A => write!(f, "Team A"),
            TeamSide::B => write!(f, "Team B"),
        }
    }
}

/// Result of a match from team A's point of view
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MatchOutcome {
    TeamAWins,
    TeamBWins,
    Draw,
}

impl MatchOutcome {
    /// Higher score ranks first, equal scores are a tie
    pub fn from_scores(score_a: u32, score_b: u32) -> Self {
        match score_a.cmp(&score_b) {
            std::cmp::Ordering::Greater => MatchOutcome::TeamAWins,
            std::cmp::Ordering::Less => MatchOutcome::TeamBWins,
            std::cmp::Ordering::Equal => MatchOutcome::Draw,
        }
    }
}

/// A recorded match from the match log
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchRecord {
    #[serde(default)]
    pub date: String,
    pub team_a: Vec<PlayerId>,
    pub team_b: Vec<PlayerId>,
    pub score_a: u32,
    pub score_b: u32,
    /// Substitutes rotated in and out during the match
    #[serde(default)]
    pub rotation: bool,
}

impl MatchRecord {
    pub fn outcome(&self) -> MatchOutcome {
        MatchOutcome::from_scores(self.score_a, self.score_b)
    }

    /// Parsed match date, if the log carries a well-formed one
    pub fn played_on(&self) -> Option<NaiveDate> {
        NaiveDate::parse_from_str(self.date.trim(), MATCH_DATE_FORMAT).ok()
    }

    pub fn participants(&self) -> impl Iterator<Item = &PlayerId> {
        self.team_a.iter().chain(self.team_b.iter())
    }

    /// Check that the record can be replayed: both sides non-empty and disjoint
    pub fn validate(&self, index: usize) -> Result<()> {
        let invalid = |reason: String| BalancerError::InvalidMatchRecord {
            index,
            date: self.date.clone(),
            reason,
        };

        if self.team_a.is_empty() || self.team_b.is_empty() {
            return Err(invalid("both teams must have at least one player".to_string()).into());
        }

        let mut seen = HashSet::new();
        for player_id in self.participants() {
            if player_id.trim().is_empty() {
                return Err(invalid("player id cannot be empty".to_string()).into());
            }
            if !seen.insert(player_id.as_str()) {
                return Err(invalid(format!("player '{}' is listed more than once", player_id)).into());
            }
        }

        Ok(())
    }
}

/// Roster metadata for a single player
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RosterEntry {
    #[serde(default)]
    pub full_name: Option<String>,
    #[serde(default, deserialize_with = "deserialize_age")]
    pub age: Option<f64>,
    #[serde(default)]
    pub initial_elo: Option<f64>,
}

/// Ages arrive as numbers or numeric strings; anything else counts as unknown
fn deserialize_age<'de, D>(deserializer: D) -> std::result::Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawAge {
        Number(f64),
        Text(String),
    }

    let age = match Option::<RawAge>::deserialize(deserializer)? {
        Some(RawAge::Number(age)) => Some(age),
        Some(RawAge::Text(text)) => text.trim().parse::<f64>().ok(),
        None => None,
    };

    Ok(age.filter(|age| age.is_finite() && *age >= 0.0))
}

/// How an odd-sized selection is split
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BalanceMode {
    /// Defer the lowest-rated player and attach them afterwards
    #[default]
    Rotation,
    /// Powerplay: everyone plays, teams may differ in size by one
    PlayAll,
}

impl std::fmt::Display for BalanceMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BalanceMode::Rotation => write!(f, "rotation"),
            BalanceMode::PlayAll => write!(f, "play_all"),
        }
    }
}

/// A player selected for team balancing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BalancePlayer {
    pub id: PlayerId,
    pub rating: f64,
    pub age: Option<f64>,
}

impl BalancePlayer {
    pub fn new(id: impl Into<PlayerId>, rating: f64, age: Option<f64>) -> Self {
        Self {
            id: id.into(),
            rating,
            age,
        }
    }
}

/// Where the deferred player of an odd selection ended up
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeferredAssignment {
    pub player: BalancePlayer,
    pub assigned_to: TeamSide,
}

/// Outcome of a balance query
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BalanceResult {
    pub team_a: Vec<BalancePlayer>,
    pub team_b: Vec<BalancePlayer>,
    /// Final rating sums, deferred player included
    pub sum_a: f64,
    pub sum_b: f64,
    /// Rating-sum gap of the split chosen by the search
    pub diff: f64,
    pub deferred: Option<DeferredAssignment>,
    pub mode: BalanceMode,
    pub combinations_evaluated: usize,
    /// Set when the enumeration budget cut the search short
    pub possibly_suboptimal: bool,
}

impl BalanceResult {
    pub fn team(&self, side: TeamSide) -> &[BalancePlayer] {
        match side {
            TeamSide::A => &self.team_a,
            TeamSide::B => &self.team_b,
        }
    }
}
