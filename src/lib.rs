//! Team Balancer - skill ratings and fair teams for pickup matches
//!
//! This crate replays the full match history through a Weng-Lin (OpenSkill)
//! rating model, with partial credit for rotation matches, and searches for
//! the two-team split of a selected group with the closest rating sums.

pub mod balance;
pub mod config;
pub mod error;
pub mod leaderboard;
pub mod rating;
pub mod store;
pub mod types;
pub mod utils;

// Re-export commonly used types and traits
pub use error::{BalancerError, Result};
pub use types::*;

// Re-export key components
pub use balance::{OddPlayerResolver, PartitionSearch};
pub use rating::{RatingEngine, RatingModel, RatingSnapshot, WengLinModel};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
