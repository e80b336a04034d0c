//! Configuration management for the team balancer
//!
//! This module handles configuration loading from environment variables and
//! TOML files, validation, and default values for rating replay and balancing.

pub mod app;
pub mod balance;
pub mod rating;

// Re-export commonly used types
pub use app::{validate_config, AppConfig, DataSettings, ServiceSettings};
pub use balance::BalanceConfig;
pub use rating::RatingConfig;
