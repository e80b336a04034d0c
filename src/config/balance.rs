//! Team balancing configuration

use serde::{Deserialize, Serialize};

use crate::error::{BalancerError, Result};
use crate::types::BalanceMode;

/// Default cap on candidate splits evaluated per balance query
pub const DEFAULT_ENUMERATION_BUDGET: usize = 3000;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BalanceConfig {
    /// Maximum number of candidate splits evaluated before the search stops
    pub enumeration_budget: usize,
    /// Mode used when the caller does not pick one
    pub default_mode: BalanceMode,
}

impl Default for BalanceConfig {
    fn default() -> Self {
        Self {
            enumeration_budget: DEFAULT_ENUMERATION_BUDGET,
            default_mode: BalanceMode::Rotation,
        }
    }
}

impl BalanceConfig {
    pub fn with_budget(enumeration_budget: usize) -> Self {
        Self {
            enumeration_budget,
            ..Self::default()
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.enumeration_budget == 0 {
            return Err(BalancerError::ConfigurationError {
                message: "Enumeration budget must be greater than 0".to_string(),
            }
            .into());
        }
        Ok(())
    }
}
