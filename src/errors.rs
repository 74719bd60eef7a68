// Copyright 2025 Cowboy AI, LLC.

//! Error types for branching operations
//!
//! Only the fallible seams of the crate return these errors: repository
//! lookups, value-object construction and configuration parsing. The analysis
//! pipeline itself never fails; it degrades to low-confidence results and
//! reports what happened through [`crate::synthesis::Diagnostic`].

use thiserror::Error;

/// Errors that can occur while building or querying branching inputs
#[derive(Debug, Clone, PartialEq, Error)]
pub enum BranchingError {
    /// Hexagram id not known to the repository
    #[error("Hexagram not found: {id}")]
    HexagramNotFound {
        /// Id that was searched for
        id: u8,
    },

    /// A computed line pattern did not resolve to any hexagram
    #[error("No hexagram matches line pattern {pattern}")]
    NoHexagramForLines {
        /// Rendered line values
        pattern: String,
    },

    /// Hexagram id outside 1..=64
    #[error("Invalid hexagram id: {0} (expected 1..=64)")]
    InvalidHexagramId(u8),

    /// Line position outside 1..=6
    #[error("Invalid line position: {0} (expected 1..=6)")]
    InvalidLinePosition(u8),

    /// Configuration rejected during validation
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    SerializationError(String),
}

/// Result type for branching operations
pub type BranchingResult<T> = Result<T, BranchingError>;

impl From<serde_json::Error> for BranchingError {
    fn from(err: serde_json::Error) -> Self {
        BranchingError::SerializationError(err.to_string())
    }
}

impl BranchingError {
    /// Check if this is a repository miss
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            BranchingError::HexagramNotFound { .. } | BranchingError::NoHexagramForLines { .. }
        )
    }

    /// Check if this is a validation error
    pub fn is_validation_error(&self) -> bool {
        matches!(
            self,
            BranchingError::InvalidHexagramId(_)
                | BranchingError::InvalidLinePosition(_)
                | BranchingError::InvalidConfig(_)
        )
    }
}
