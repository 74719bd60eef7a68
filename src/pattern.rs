// Copyright 2025 Cowboy AI, LLC.

//! The seven classical transformation patterns and their static metadata
//!
//! Each pattern carries fixed applicability tags, an urgency band, a
//! complexity class and a baseline orthodoxy score. These values are domain
//! calibration and are intentionally not configurable.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::situation::Urgency;

/// A classical way of deriving a future branch from a base hexagram
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum TransformationPattern {
    /// 進: natural advance from one line to the next
    Progression,
    /// 変: individual changing lines
    LineChange,
    /// 卦変: full base -> target hexagram transition
    HexagramChange,
    /// 互卦: nuclear hexagram, hidden structure
    MutualHexagram,
    /// 綜卦: lines read top to bottom, the other side's view
    ReversedHexagram,
    /// 錯卦: every line inverted, the contrarian extreme
    OppositeHexagram,
    /// 序卦伝: successor in the classical sequence
    SequenceLogic,
}

/// Complexity class used to bound what is shown to less experienced users
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum Complexity {
    /// Score 1
    Simple,
    /// Score 2
    Medium,
    /// Score 3
    High,
    /// Score 4
    VeryHigh,
}

impl Complexity {
    /// Numeric score used for ordering
    pub fn score(self) -> u8 {
        match self {
            Complexity::Simple => 1,
            Complexity::Medium => 2,
            Complexity::High => 3,
            Complexity::VeryHigh => 4,
        }
    }
}

/// Situation qualities a pattern is suited to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum Applicability {
    /// Growth over time
    Growth,
    /// Ongoing process
    Process,
    /// Gradual change
    GradualChange,
    /// A choice must be made
    Decision,
    /// Turning point
    TurningPoint,
    /// Change needed now
    ImmediateChange,
    /// Wholesale transformation
    Transformation,
    /// Major change
    MajorChange,
    /// Reaching a goal
    GoalAchievement,
    /// Hidden factors at work
    HiddenFactors,
    /// Unconscious influences
    Unconscious,
    /// Deep analysis
    DeepAnalysis,
    /// Relationship with others
    Relationship,
    /// Conflict
    Conflict,
    /// Seeing from another side
    PerspectiveShift,
    /// Extreme situation
    ExtremeSituation,
    /// Radical change
    RadicalChange,
    /// Opposition
    Opposition,
    /// Life journey
    LifeJourney,
    /// Long-term process
    LongTermProcess,
    /// Spiritual growth
    SpiritualGrowth,
}

/// Inclusive urgency range a pattern is suited to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct UrgencyBand {
    /// Lowest suitable urgency
    pub low: Urgency,
    /// Highest suitable urgency
    pub high: Urgency,
}

impl UrgencyBand {
    const fn new(low: Urgency, high: Urgency) -> Self {
        Self { low, high }
    }

    const fn exactly(urgency: Urgency) -> Self {
        Self::new(urgency, urgency)
    }

    /// Tiers between `urgency` and the nearest edge of the band (0 inside)
    pub fn distance(&self, urgency: Urgency) -> u8 {
        let u = urgency.tier();
        let (lo, hi) = (self.low.tier(), self.high.tier());
        if u < lo {
            lo - u
        } else if u > hi {
            u - hi
        } else {
            0
        }
    }
}

impl TransformationPattern {
    /// All patterns in canonical order
    pub const ALL: [TransformationPattern; 7] = [
        TransformationPattern::Progression,
        TransformationPattern::LineChange,
        TransformationPattern::HexagramChange,
        TransformationPattern::MutualHexagram,
        TransformationPattern::ReversedHexagram,
        TransformationPattern::OppositeHexagram,
        TransformationPattern::SequenceLogic,
    ];

    /// English display name
    pub fn display_name(self) -> &'static str {
        match self {
            TransformationPattern::Progression => "Line Progression",
            TransformationPattern::LineChange => "Line Change",
            TransformationPattern::HexagramChange => "Hexagram Change",
            TransformationPattern::MutualHexagram => "Mutual Hexagram",
            TransformationPattern::ReversedHexagram => "Reversed Hexagram",
            TransformationPattern::OppositeHexagram => "Opposite Hexagram",
            TransformationPattern::SequenceLogic => "Sequence Logic",
        }
    }

    /// Classical name
    pub fn classical_name(self) -> &'static str {
        match self {
            TransformationPattern::Progression => "進",
            TransformationPattern::LineChange => "変",
            TransformationPattern::HexagramChange => "卦変",
            TransformationPattern::MutualHexagram => "互卦",
            TransformationPattern::ReversedHexagram => "綜卦",
            TransformationPattern::OppositeHexagram => "錯卦",
            TransformationPattern::SequenceLogic => "序卦伝",
        }
    }

    /// One-line description of what the pattern reveals
    pub fn description(self) -> &'static str {
        match self {
            TransformationPattern::Progression => "natural development as time passes",
            TransformationPattern::LineChange => "sudden change under specific conditions",
            TransformationPattern::HexagramChange => {
                "complete change from the present toward an ideal"
            }
            TransformationPattern::MutualHexagram => "latent qualities and hidden influences",
            TransformationPattern::ReversedHexagram => {
                "the situation seen from the opposite side"
            }
            TransformationPattern::OppositeHexagram => {
                "an extreme approach with everything inverted"
            }
            TransformationPattern::SequenceLogic => "the long-term flow of the classical order",
        }
    }

    /// Situation qualities this pattern suits
    pub fn applicability(self) -> &'static [Applicability] {
        use Applicability::*;
        match self {
            TransformationPattern::Progression => &[Growth, Process, GradualChange],
            TransformationPattern::LineChange => &[Decision, TurningPoint, ImmediateChange],
            TransformationPattern::HexagramChange => {
                &[Transformation, MajorChange, GoalAchievement]
            }
            TransformationPattern::MutualHexagram => &[HiddenFactors, Unconscious, DeepAnalysis],
            TransformationPattern::ReversedHexagram => {
                &[Relationship, Conflict, PerspectiveShift]
            }
            TransformationPattern::OppositeHexagram => {
                &[ExtremeSituation, RadicalChange, Opposition]
            }
            TransformationPattern::SequenceLogic => {
                &[LifeJourney, LongTermProcess, SpiritualGrowth]
            }
        }
    }

    /// Urgency band the pattern is suited to
    pub fn urgency_band(self) -> UrgencyBand {
        match self {
            TransformationPattern::Progression => UrgencyBand::new(Urgency::Low, Urgency::Medium),
            TransformationPattern::LineChange => UrgencyBand::new(Urgency::Medium, Urgency::High),
            TransformationPattern::HexagramChange => UrgencyBand::exactly(Urgency::High),
            TransformationPattern::MutualHexagram => UrgencyBand::exactly(Urgency::Low),
            TransformationPattern::ReversedHexagram => UrgencyBand::exactly(Urgency::Medium),
            TransformationPattern::OppositeHexagram => UrgencyBand::exactly(Urgency::High),
            TransformationPattern::SequenceLogic => UrgencyBand::exactly(Urgency::Low),
        }
    }

    /// Complexity class
    pub fn complexity(self) -> Complexity {
        match self {
            TransformationPattern::Progression => Complexity::Simple,
            TransformationPattern::LineChange | TransformationPattern::ReversedHexagram => {
                Complexity::Medium
            }
            TransformationPattern::HexagramChange
            | TransformationPattern::MutualHexagram
            | TransformationPattern::OppositeHexagram => Complexity::High,
            TransformationPattern::SequenceLogic => Complexity::VeryHigh,
        }
    }

    /// Baseline classical orthodoxy score
    pub fn baseline_orthodoxy(self) -> f64 {
        match self {
            TransformationPattern::Progression => 0.8,
            TransformationPattern::LineChange => 0.85,
            TransformationPattern::HexagramChange => 0.9,
            TransformationPattern::MutualHexagram => 0.7,
            TransformationPattern::ReversedHexagram => 0.8,
            TransformationPattern::OppositeHexagram => 0.75,
            TransformationPattern::SequenceLogic => 0.95,
        }
    }

    /// Whether the pattern can emit more than one branch
    pub fn is_multi_branch(self) -> bool {
        matches!(self, TransformationPattern::LineChange)
    }
}

impl fmt::Display for TransformationPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.display_name(), self.classical_name())
    }
}
