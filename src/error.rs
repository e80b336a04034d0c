//! Error types for the rating and balancing pipeline
//!
//! This module defines all error types using anyhow for consistent error handling
//! throughout the application. Callers that need to tell failures apart can
//! `downcast_ref::<BalancerError>()` on the returned error.

/// Result type alias for convenience
pub type Result<T> = anyhow::Result<T>;

/// Custom error types for specific rating and balancing scenarios
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum BalancerError {
    #[error("Invalid match record #{index} ({date}): {reason}")]
    InvalidMatchRecord {
        index: usize,
        date: String,
        reason: String,
    },

    #[error("At least 2 players are required to balance teams, got {selected}")]
    NotEnoughPlayers { selected: usize },

    #[error("Invalid balance request: {reason}")]
    InvalidBalanceRequest { reason: String },

    #[error("Rating calculation failed: {reason}")]
    RatingCalculationFailed { reason: String },

    #[error("Data source error ({source_name}): {message}")]
    DataSourceError {
        source_name: String,
        message: String,
    },

    #[error("Configuration error: {message}")]
    ConfigurationError { message: String },
}
