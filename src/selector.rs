// Copyright 2025 Cowboy AI, LLC.

//! Pattern selection
//!
//! Chooses which transformation patterns to evaluate for a situation:
//!
//! 1. A base pair from the urgency × importance quadrant table
//! 2. Extra patterns triggered by the situation's natures
//! 3. Deduplication in first-seen order
//! 4. Trimming by the user's experience level
//!
//! The returned order is the priority order used for later tie-breaking.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::pattern::{Complexity, TransformationPattern};
use crate::situation::{Importance, SituationNature, SituationProfile, Urgency};

/// Upper bound on the number of selected patterns
pub const MAX_SELECTED: usize = 5;

/// How familiar the user is with the classical material
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum ExperienceLevel {
    /// Wants simple answers
    Beginner,
    /// Default
    #[default]
    Intermediate,
    /// Wants every applicable view
    Advanced,
}

/// Optional information about the person asking
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct UserProfile {
    /// Experience with the classical material
    pub experience_level: ExperienceLevel,
}

impl UserProfile {
    /// Profile with the given experience level
    pub fn new(experience_level: ExperienceLevel) -> Self {
        Self { experience_level }
    }
}

/// Selects and orders transformation patterns
#[derive(Debug, Default, Clone)]
pub struct PatternSelector;

impl PatternSelector {
    /// Create a selector
    pub fn new() -> Self {
        Self
    }

    /// Select 1..=5 distinct patterns in priority order
    pub fn select(
        &self,
        profile: &SituationProfile,
        user: Option<&UserProfile>,
    ) -> Vec<TransformationPattern> {
        let mut patterns: Vec<TransformationPattern> =
            quadrant_pair(profile.urgency, profile.importance).to_vec();
        for nature in profile.natures() {
            patterns.extend_from_slice(nature_triggers(nature));
        }

        let mut selected = dedup_in_order(patterns);
        match user.map(|u| u.experience_level) {
            Some(ExperienceLevel::Beginner) => {
                selected.retain(|p| p.complexity() != Complexity::VeryHigh);
                selected.truncate(2);
            }
            Some(ExperienceLevel::Advanced) => {}
            Some(ExperienceLevel::Intermediate) | None => {
                // stable: equal complexity keeps first-seen order
                selected.sort_by_key(|p| p.complexity().score());
                selected.truncate(3);
            }
        }
        selected.truncate(MAX_SELECTED);

        if selected.is_empty() {
            selected.push(TransformationPattern::Progression);
        }
        debug!(?selected, "selected transformation patterns");
        selected
    }
}

/// Fixed base pair for each urgency × importance quadrant
fn quadrant_pair(urgency: Urgency, importance: Importance) -> [TransformationPattern; 2] {
    use TransformationPattern::*;
    match (urgency, importance) {
        (Urgency::High, Importance::High) => [HexagramChange, LineChange],
        (Urgency::Low, Importance::High) => [SequenceLogic, Progression],
        (Urgency::High, Importance::Low) => [LineChange, OppositeHexagram],
        _ => [MutualHexagram, Progression],
    }
}

/// Patterns added by a situation nature
fn nature_triggers(nature: SituationNature) -> &'static [TransformationPattern] {
    use TransformationPattern::*;
    match nature {
        SituationNature::Relationship => &[ReversedHexagram],
        SituationNature::Anxiety | SituationNature::Confusion => &[MutualHexagram],
        SituationNature::Decision => &[HexagramChange, OppositeHexagram],
        _ => &[],
    }
}

fn dedup_in_order(patterns: Vec<TransformationPattern>) -> Vec<TransformationPattern> {
    let mut out: Vec<TransformationPattern> = Vec::with_capacity(patterns.len());
    for pattern in patterns {
        if !out.contains(&pattern) {
            out.push(pattern);
        }
    }
    out
}
