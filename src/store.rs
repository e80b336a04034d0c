//! Loading of the match log and roster directory
//!
//! Both sources are plain JSON files. A missing or unreadable file is a cold
//! start and yields an empty log or roster. A file that reads but does not
//! parse is an error, since skipping it would silently change every rating.

use std::path::Path;
use tracing::{info, warn};

use crate::error::{BalancerError, Result};
use crate::types::{MatchRecord, Roster};

/// Parse a match log from JSON text
pub fn parse_matches(contents: &str) -> Result<Vec<MatchRecord>> {
    if contents.trim().is_empty() {
        return Ok(Vec::new());
    }

    serde_json::from_str(contents).map_err(|e| {
        BalancerError::DataSourceError {
            source_name: "match log".to_string(),
            message: e.to_string(),
        }
        .into()
    })
}

/// Parse a roster directory from JSON text
pub fn parse_roster(contents: &str) -> Result<Roster> {
    if contents.trim().is_empty() {
        return Ok(Roster::new());
    }

    serde_json::from_str(contents).map_err(|e| {
        BalancerError::DataSourceError {
            source_name: "roster".to_string(),
            message: e.to_string(),
        }
        .into()
    })
}

/// Load the match log, treating a missing or unreadable file as an empty history
pub fn load_matches(path: &Path) -> Result<Vec<MatchRecord>> {
    let Some(contents) = read_optional(path, "Match log") else {
        return Ok(Vec::new());
    };

    let matches = parse_matches(&contents).map_err(|e| with_path(e, path))?;
    info!("Loaded {} matches from {}", matches.len(), path.display());
    Ok(matches)
}

/// Load the roster, treating a missing or unreadable file as an empty roster
pub fn load_roster(path: &Path) -> Result<Roster> {
    let Some(contents) = read_optional(path, "Roster") else {
        return Ok(Roster::new());
    };

    let roster = parse_roster(&contents).map_err(|e| with_path(e, path))?;
    info!("Loaded {} roster entries from {}", roster.len(), path.display());
    Ok(roster)
}

fn read_optional(path: &Path, label: &str) -> Option<String> {
    match std::fs::read_to_string(path) {
        Ok(contents) => Some(contents),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            warn!("{} {} not found, starting empty", label, path.display());
            None
        }
        Err(e) => {
            warn!(
                "{} {} could not be read ({}), starting empty",
                label,
                path.display(),
                e
            );
            None
        }
    }
}

fn with_path(error: anyhow::Error, path: &Path) -> anyhow::Error {
    match error.downcast::<BalancerError>() {
        Ok(BalancerError::DataSourceError { message, .. }) => BalancerError::DataSourceError {
            source_name: path.display().to_string(),
            message,
        }
        .into(),
        Ok(other) => other.into(),
        Err(error) => error,
    }
}
