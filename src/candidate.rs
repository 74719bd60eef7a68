// Copyright 2025 Cowboy AI, LLC.

//! Branch candidates produced by the analyzers and refined by weighting

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::hexagram::{ElementRelation, Line, LinePosition, Placement};
use crate::pattern::TransformationPattern;

/// Rough horizon over which a branch is expected to unfold
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum Timeframe {
    /// Days
    Immediate,
    /// Weeks
    ShortTerm,
    /// Months
    MediumTerm,
    /// A year or more
    LongTerm,
}

/// Movement of focus from one line to another within a hexagram
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct LineTransition {
    /// Line where the situation currently sits
    pub from: LinePosition,
    /// Line it advances to
    pub to: LinePosition,
}

/// One possible future branch derived by a single pattern
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct BranchCandidate {
    /// Pattern that produced this branch
    pub pattern: TransformationPattern,
    /// Base hexagram
    pub source_hexagram_id: u8,
    /// Hexagram reached, if the branch leads to one
    pub target_hexagram_id: Option<u8>,
    /// Display label of the target hexagram
    pub target_label: Option<String>,
    /// Unweighted probability (0..1)
    pub raw_probability: f64,
    /// Classical orthodoxy score (0..1)
    pub orthodoxy_score: f64,
    /// Human-readable guidance
    pub guidance: String,
    /// Lines marked as changing, bottom to top
    pub changing_lines: Vec<LinePosition>,
    /// Line focus movement for intra-hexagram progression
    pub line_transition: Option<LineTransition>,
    /// Expected horizon
    pub timeframe: Timeframe,
    /// Placement of the target's lines (advisory)
    pub placement: Option<Placement>,
    /// Five-phase relation from source to target
    pub element_relation: Option<ElementRelation>,
    /// Base lines with the changing ones flagged, for changing-line patterns
    pub marked_lines: Option<[Line; 6]>,
}

/// A candidate after weighting and renormalization
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct WeightedCandidate {
    /// The underlying branch
    #[serde(flatten)]
    pub candidate: BranchCandidate,
    /// Tiered weight from the orthodoxy score
    pub orthodoxy_weight: f64,
    /// Fit between pattern urgency and situation urgency
    pub contextual_multiplier: f64,
    /// Additive boost from nature alignment
    pub alignment_boost: f64,
    /// Weighted probability before renormalization
    pub adjusted_probability: f64,
    /// Share of the whole batch; the batch sums to 1.0
    pub final_probability: f64,
}

impl WeightedCandidate {
    /// Pattern of the underlying branch
    pub fn pattern(&self) -> TransformationPattern {
        self.candidate.pattern
    }

    /// Orthodoxy score of the underlying branch
    pub fn orthodoxy_score(&self) -> f64 {
        self.candidate.orthodoxy_score
    }
}
