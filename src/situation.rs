// Copyright 2025 Cowboy AI, LLC.

//! Situation profile value objects
//!
//! A [`SituationProfile`] is created once per request by the classifier and
//! never mutated afterwards.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::pattern::Applicability;

/// How soon the situation demands action
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum Urgency {
    /// Can wait
    Low,
    /// Ordinary
    #[default]
    Medium,
    /// Needs action now
    High,
}

impl Urgency {
    /// Ordinal tier (Low 0, Medium 1, High 2)
    pub fn tier(self) -> u8 {
        match self {
            Urgency::Low => 0,
            Urgency::Medium => 1,
            Urgency::High => 2,
        }
    }
}

/// How much is at stake
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum Importance {
    /// Minor
    Low,
    /// Ordinary
    #[default]
    Medium,
    /// Life-shaping
    High,
}

/// What kind of concern this is
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    JsonSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum SituationNature {
    /// A choice has to be made
    Decision,
    /// Dealing with other people
    Relationship,
    /// Worry or fear
    Anxiety,
    /// Unclear where things stand
    Confusion,
    /// Personal development
    Growth,
    /// Work and career
    Work,
    /// Romance
    Love,
    /// Body and wellbeing
    Health,
    /// Nothing more specific
    #[default]
    General,
}

impl SituationNature {
    /// Classification priority: earlier natures win when several match
    pub const PRIORITY: [SituationNature; 8] = [
        SituationNature::Decision,
        SituationNature::Relationship,
        SituationNature::Anxiety,
        SituationNature::Confusion,
        SituationNature::Growth,
        SituationNature::Work,
        SituationNature::Love,
        SituationNature::Health,
    ];

    /// Pattern applicability tags this nature has affinity with
    pub fn affinity(self) -> &'static [Applicability] {
        use Applicability::*;
        match self {
            SituationNature::Decision => &[Decision, TurningPoint, MajorChange],
            SituationNature::Relationship => &[Relationship, Conflict, PerspectiveShift],
            SituationNature::Anxiety => &[HiddenFactors, Unconscious],
            SituationNature::Confusion => &[HiddenFactors, DeepAnalysis, PerspectiveShift],
            SituationNature::Growth => &[Growth, Process, GradualChange, SpiritualGrowth],
            SituationNature::Work => &[GoalAchievement, LongTermProcess],
            SituationNature::Love => &[Relationship, PerspectiveShift],
            SituationNature::Health => &[GradualChange, HiddenFactors],
            SituationNature::General => &[],
        }
    }

    /// Base hexagram suggested when the caller has none
    pub fn suggested_base_hexagram(self) -> u8 {
        match self {
            SituationNature::Work => 1,
            SituationNature::Love => 31,
            SituationNature::Health => 27,
            SituationNature::Relationship => 13,
            SituationNature::Growth => 46,
            SituationNature::Decision => 47,
            SituationNature::Anxiety => 29,
            SituationNature::Confusion | SituationNature::General => 1,
        }
    }
}

/// Who is affected
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum Scope {
    /// Only the user
    #[default]
    Personal,
    /// The user and specific others
    Interpersonal,
    /// An organization or wider system
    Systemic,
}

/// Classified situation driving pattern selection and weighting
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct SituationProfile {
    /// How soon action is needed
    pub urgency: Urgency,
    /// How much is at stake
    pub importance: Importance,
    /// Primary nature
    pub nature: SituationNature,
    /// Second-highest-priority nature that also matched, if any
    #[serde(default)]
    pub secondary_nature: Option<SituationNature>,
    /// Who is affected
    pub scope: Scope,
}

impl SituationProfile {
    /// Profile with the four core axes and no secondary nature
    pub fn new(
        urgency: Urgency,
        importance: Importance,
        nature: SituationNature,
        scope: Scope,
    ) -> Self {
        Self {
            urgency,
            importance,
            nature,
            secondary_nature: None,
            scope,
        }
    }

    /// Copy with a secondary nature
    pub fn with_secondary(self, nature: SituationNature) -> Self {
        Self {
            secondary_nature: Some(nature),
            ..self
        }
    }

    /// Primary nature followed by the secondary nature, if any
    pub fn natures(&self) -> impl Iterator<Item = SituationNature> {
        std::iter::once(self.nature).chain(self.secondary_nature)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_profile_is_medium_general_personal() {
        let p = SituationProfile::default();
        assert_eq!(p.urgency, Urgency::Medium);
        assert_eq!(p.importance, Importance::Medium);
        assert_eq!(p.nature, SituationNature::General);
        assert_eq!(p.scope, Scope::Personal);
        assert_eq!(p.secondary_nature, None);
    }

    #[test]
    fn natures_lists_primary_then_secondary() {
        let p = SituationProfile::default().with_secondary(SituationNature::Growth);
        let natures: Vec<_> = p.natures().collect();
        assert_eq!(natures, vec![SituationNature::General, SituationNature::Growth]);
    }

    #[test]
    fn profile_serializes_snake_case() {
        let p = SituationProfile::new(
            Urgency::High,
            Importance::Low,
            SituationNature::Decision,
            Scope::Interpersonal,
        );
        let json = serde_json::to_value(p).unwrap();
        assert_eq!(json["urgency"], "high");
        assert_eq!(json["nature"], "decision");
        assert_eq!(json["scope"], "interpersonal");
    }
}
