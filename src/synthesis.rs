// Copyright 2025 Cowboy AI, LLC.

//! Ranking and result assembly
//!
//! The synthesizer never fails. An empty batch produces a result with zero
//! confidence and no recommendations; presenting a fallback is left to the
//! caller (see [`RankedResult::fallback_message`]).

use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::candidate::{LineTransition, Timeframe, WeightedCandidate};
use crate::config::EngineConfig;
use crate::hexagram::{ElementRelation, LinePosition, Placement};
use crate::pattern::TransformationPattern;
use crate::situation::SituationProfile;

const FALLBACK_MESSAGE: &str =
    "Observe the present situation quietly and listen to your inner voice.";

/// Non-fatal condition encountered while producing a result
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Diagnostic {
    /// No classification rule fired; the default profile was used
    ClassificationDefault,
    /// A lookup failed; the base hexagram when `pattern` is absent,
    /// otherwise that pattern produced no candidates
    RepositoryLookupMiss {
        /// Pattern whose analyzer missed
        pattern: Option<TransformationPattern>,
        /// Error text from the repository
        detail: String,
    },
    /// Every candidate weighted to zero; probabilities are uniform
    DegenerateWeighting {
        /// Size of the batch
        candidates: usize,
    },
}

/// Provenance of a result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct AnalysisMetadata {
    /// Unique id of this analysis
    pub analysis_id: Uuid,
    /// When the result was produced
    pub generated_at: DateTime<Utc>,
    /// Base hexagram the analysis started from
    pub base_hexagram_id: u8,
    /// Classified situation
    pub profile: SituationProfile,
    /// Patterns evaluated, in priority order
    pub selected_patterns: Vec<TransformationPattern>,
    /// Non-fatal conditions
    pub diagnostics: Vec<Diagnostic>,
}

impl AnalysisMetadata {
    /// Fresh metadata with a new id and the current time
    pub fn new(
        base_hexagram_id: u8,
        profile: SituationProfile,
        selected_patterns: Vec<TransformationPattern>,
    ) -> Self {
        Self {
            analysis_id: Uuid::new_v4(),
            generated_at: Utc::now(),
            base_hexagram_id,
            profile,
            selected_patterns,
            diagnostics: Vec::new(),
        }
    }
}

/// Presentation view of one ranked candidate
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Recommendation {
    /// 1-based rank
    pub rank: usize,
    /// Pattern that produced the branch
    pub pattern: TransformationPattern,
    /// English pattern name
    pub pattern_name: String,
    /// Classical pattern name
    pub classical_name: String,
    /// Hexagram reached
    pub target_hexagram_id: Option<u8>,
    /// Display label of the hexagram reached
    pub target_label: Option<String>,
    /// Final probability
    pub probability: f64,
    /// Orthodoxy score
    pub orthodoxy_score: f64,
    /// Guidance text
    pub guidance: String,
    /// Expected horizon
    pub timeframe: Timeframe,
    /// Changing lines
    pub changing_lines: Vec<LinePosition>,
    /// Line movement for progressions
    pub line_transition: Option<LineTransition>,
    /// Placement advisory for the target
    pub placement: Option<Placement>,
    /// Five-phase relation from source to target
    pub element_relation: Option<ElementRelation>,
}

impl Recommendation {
    fn from_weighted(rank: usize, weighted: &WeightedCandidate) -> Self {
        let c = &weighted.candidate;
        Self {
            rank,
            pattern: c.pattern,
            pattern_name: c.pattern.display_name().to_string(),
            classical_name: c.pattern.classical_name().to_string(),
            target_hexagram_id: c.target_hexagram_id,
            target_label: c.target_label.clone(),
            probability: weighted.final_probability,
            orthodoxy_score: c.orthodoxy_score,
            guidance: c.guidance.clone(),
            timeframe: c.timeframe,
            changing_lines: c.changing_lines.clone(),
            line_transition: c.line_transition,
            placement: c.placement,
            element_relation: c.element_relation,
        }
    }
}

/// Final output of one analysis
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct RankedResult {
    /// All candidates, best first
    pub candidates: Vec<WeightedCandidate>,
    /// Orthodoxy-weighted probability mass of the top candidates (0..1)
    pub overall_confidence: f64,
    /// Best candidate
    pub primary_recommendation: Option<Recommendation>,
    /// Runner-up candidates
    pub alternative_recommendations: Vec<Recommendation>,
    /// Provenance and diagnostics
    pub metadata: AnalysisMetadata,
}

impl RankedResult {
    /// Result with no candidates
    pub fn empty(metadata: AnalysisMetadata) -> Self {
        Self {
            candidates: Vec::new(),
            overall_confidence: 0.0,
            primary_recommendation: None,
            alternative_recommendations: Vec::new(),
            metadata,
        }
    }

    /// Whether no candidate was produced
    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }

    /// Default guidance to show when there is no recommendation
    pub fn fallback_message(&self) -> Option<&'static str> {
        self.primary_recommendation
            .is_none()
            .then_some(FALLBACK_MESSAGE)
    }
}

/// Orders weighted candidates and builds the [`RankedResult`]
#[derive(Debug, Clone)]
pub struct ResultSynthesizer {
    alternatives: usize,
    confidence_window: usize,
}

impl Default for ResultSynthesizer {
    fn default() -> Self {
        Self::from_config(&EngineConfig::default())
    }
}

impl ResultSynthesizer {
    /// Synthesizer using the presentation settings of `config`
    pub fn from_config(config: &EngineConfig) -> Self {
        Self {
            alternatives: config.alternatives,
            confidence_window: config.confidence_window,
        }
    }

    /// Rank candidates: final probability, then orthodoxy, then the position
    /// of their pattern in `priority`
    pub fn synthesize(
        &self,
        mut weighted: Vec<WeightedCandidate>,
        priority: &[TransformationPattern],
        metadata: AnalysisMetadata,
    ) -> RankedResult {
        if weighted.is_empty() {
            return RankedResult::empty(metadata);
        }

        let rank_of = |pattern: TransformationPattern| {
            priority
                .iter()
                .position(|p| *p == pattern)
                .unwrap_or(usize::MAX)
        };
        weighted.sort_by(|a, b| {
            b.final_probability
                .total_cmp(&a.final_probability)
                .then_with(|| b.orthodoxy_score().total_cmp(&a.orthodoxy_score()))
                .then_with(|| rank_of(a.pattern()).cmp(&rank_of(b.pattern())))
        });

        let overall_confidence = weighted
            .iter()
            .take(self.confidence_window)
            .map(|w| w.final_probability * w.orthodoxy_score())
            .sum::<f64>()
            .clamp(0.0, 1.0);

        let mut recommendations = weighted
            .iter()
            .enumerate()
            .take(1 + self.alternatives)
            .map(|(i, w)| Recommendation::from_weighted(i + 1, w));
        let primary_recommendation = recommendations.next();
        let alternative_recommendations = recommendations.collect();

        RankedResult {
            candidates: weighted,
            overall_confidence,
            primary_recommendation,
            alternative_recommendations,
            metadata,
        }
    }
}
