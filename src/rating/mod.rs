//! Rating replay using the Weng-Lin (OpenSkill) algorithm
//!
//! This module provides the rating model interface, its skillratings-backed
//! implementation, rotation weighting, and the engine that replays the match
//! log into a rating snapshot.

pub mod engine;
pub mod model;
pub mod snapshot;
pub mod weights;
pub mod weng_lin;

// Re-export commonly used types
pub use engine::RatingEngine;
pub use model::{NoOpRatingModel, RatingModel};
pub use snapshot::RatingSnapshot;
pub use weights::{derive_weights, TeamWeights};
pub use weng_lin::WengLinModel;
