// Copyright 2025 Cowboy AI, LLC.

//! Engine configuration
//!
//! Only presentation knobs are configurable. The calibration constants used
//! by the analyzers and the weighting engine are fixed.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::errors::{BranchingError, BranchingResult};
use crate::selector::ExperienceLevel;

/// Upper bound for both `alternatives` and `confidence_window`
pub const MAX_WINDOW: usize = 16;

/// Configuration for [`crate::engine::BranchingEngine`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct EngineConfig {
    /// Ranks after the primary that become alternative recommendations
    pub alternatives: usize,
    /// Number of top candidates contributing to overall confidence
    pub confidence_window: usize,
    /// Experience level assumed when a request has no user profile
    pub default_experience: Option<ExperienceLevel>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            alternatives: 3,
            confidence_window: 3,
            default_experience: None,
        }
    }
}

impl EngineConfig {
    /// Parse and validate a JSON document; missing fields take defaults
    pub fn from_json(json: &str) -> BranchingResult<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Check that every field is within its allowed range
    pub fn validate(&self) -> BranchingResult<()> {
        if self.alternatives > MAX_WINDOW {
            return Err(BranchingError::InvalidConfig(format!(
                "alternatives must be at most {MAX_WINDOW}, got {}",
                self.alternatives
            )));
        }
        if !(1..=MAX_WINDOW).contains(&self.confidence_window) {
            return Err(BranchingError::InvalidConfig(format!(
                "confidence_window must be in 1..={MAX_WINDOW}, got {}",
                self.confidence_window
            )));
        }
        Ok(())
    }
}
