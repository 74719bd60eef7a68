// Copyright 2025 Cowboy AI, LLC.

//! Candidate weighting
//!
//! Every candidate gets three factors and an adjusted probability:
//!
//! ```text
//! adjusted = max(0, raw × orthodoxy_weight × contextual_multiplier + alignment_boost)
//! ```
//!
//! The adjusted values are then renormalized over the whole batch so that
//! `final_probability` sums to 1.0. A batch whose adjusted values are all
//! zero falls back to a uniform distribution.

use tracing::warn;

use crate::candidate::{BranchCandidate, WeightedCandidate};
use crate::pattern::TransformationPattern;
use crate::situation::{SituationNature, SituationProfile};

/// Discrete weight tier for an orthodoxy score
pub fn orthodoxy_weight(score: f64) -> f64 {
    if score >= 0.85 {
        1.0
    } else if score >= 0.6 {
        0.7
    } else {
        0.3
    }
}

/// Fit between a pattern's urgency band and the situation's urgency
pub fn contextual_multiplier(pattern: TransformationPattern, profile: &SituationProfile) -> f64 {
    match pattern.urgency_band().distance(profile.urgency) {
        0 => 1.2,
        1 => 1.0,
        _ => 0.6,
    }
}

/// Additive boost from the overlap between the primary nature's affinity and
/// the pattern's applicability tags
pub fn alignment_boost(pattern: TransformationPattern, nature: SituationNature) -> f64 {
    let applicability = pattern.applicability();
    let matched = nature
        .affinity()
        .iter()
        .filter(|tag| applicability.contains(*tag))
        .count();
    match matched {
        0 => 0.0,
        1 => 0.08,
        _ => 0.15,
    }
}

/// True when every candidate was weighted down to zero
pub fn is_degenerate(weighted: &[WeightedCandidate]) -> bool {
    !weighted.is_empty() && weighted.iter().all(|w| w.adjusted_probability <= 0.0)
}

/// Applies the weighting factors and renormalizes a batch of candidates
#[derive(Debug, Default, Clone)]
pub struct WeightingEngine;

impl WeightingEngine {
    /// Create a weighting engine
    pub fn new() -> Self {
        Self
    }

    /// Weight and renormalize the whole batch
    pub fn weight(
        &self,
        candidates: Vec<BranchCandidate>,
        profile: &SituationProfile,
    ) -> Vec<WeightedCandidate> {
        let mut weighted: Vec<WeightedCandidate> = candidates
            .into_iter()
            .map(|candidate| {
                let orthodoxy_weight = orthodoxy_weight(candidate.orthodoxy_score);
                let contextual_multiplier = contextual_multiplier(candidate.pattern, profile);
                let alignment_boost = alignment_boost(candidate.pattern, profile.nature);
                let adjusted = candidate.raw_probability * orthodoxy_weight * contextual_multiplier
                    + alignment_boost;
                WeightedCandidate {
                    candidate,
                    orthodoxy_weight,
                    contextual_multiplier,
                    alignment_boost,
                    adjusted_probability: adjusted.max(0.0),
                    final_probability: 0.0,
                }
            })
            .collect();

        let total: f64 = weighted.iter().map(|w| w.adjusted_probability).sum();
        if total > 0.0 {
            for w in &mut weighted {
                w.final_probability = w.adjusted_probability / total;
            }
        } else if !weighted.is_empty() {
            warn!(
                candidates = weighted.len(),
                "all candidates weighted to zero, using uniform distribution"
            );
            let uniform = 1.0 / weighted.len() as f64;
            for w in &mut weighted {
                w.final_probability = uniform;
            }
        }
        weighted
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::candidate::Timeframe;
    use crate::situation::{Importance, Scope, Urgency};
    use test_case::test_case;

    fn candidate(pattern: TransformationPattern, raw: f64, orthodoxy: f64) -> BranchCandidate {
        BranchCandidate {
            pattern,
            source_hexagram_id: 1,
            target_hexagram_id: Some(2),
            target_label: None,
            raw_probability: raw,
            orthodoxy_score: orthodoxy,
            guidance: String::new(),
            changing_lines: Vec::new(),
            line_transition: None,
            timeframe: Timeframe::ShortTerm,
            placement: None,
            element_relation: None,
            marked_lines: None,
        }
    }

    fn profile(urgency: Urgency, nature: SituationNature) -> SituationProfile {
        SituationProfile::new(urgency, Importance::Medium, nature, Scope::Personal)
    }

    #[test_case(0.95 => 1.0; "sequence tier")]
    #[test_case(0.85 => 1.0; "boundary is inclusive")]
    #[test_case(0.8 => 0.7; "middle tier")]
    #[test_case(0.6 => 0.7; "lower boundary")]
    #[test_case(0.59 => 0.3; "low tier")]
    fn orthodoxy_tiers(score: f64) -> f64 {
        orthodoxy_weight(score)
    }

    #[test_case(TransformationPattern::OppositeHexagram, Urgency::High => 1.2; "inside band")]
    #[test_case(TransformationPattern::Progression, Urgency::High => 1.0; "adjacent tier")]
    #[test_case(TransformationPattern::SequenceLogic, Urgency::High => 0.6; "opposite extreme")]
    fn urgency_fit(pattern: TransformationPattern, urgency: Urgency) -> f64 {
        contextual_multiplier(pattern, &profile(urgency, SituationNature::General))
    }

    #[test]
    fn alignment_counts_shared_tags() {
        // decision affinity shares Decision and TurningPoint with LineChange
        assert_eq!(
            alignment_boost(TransformationPattern::LineChange, SituationNature::Decision),
            0.15
        );
        // and only MajorChange with HexagramChange
        assert_eq!(
            alignment_boost(TransformationPattern::HexagramChange, SituationNature::Decision),
            0.08
        );
        assert_eq!(
            alignment_boost(TransformationPattern::SequenceLogic, SituationNature::General),
            0.0
        );
    }

    #[test]
    fn adjusted_probability_formula() {
        let out = WeightingEngine::new().weight(
            vec![candidate(TransformationPattern::LineChange, 0.25, 0.85)],
            &profile(Urgency::High, SituationNature::Decision),
        );
        let w = &out[0];
        assert!((w.adjusted_probability - (0.25 * 1.0 * 1.2 + 0.15)).abs() < 1e-12);
        assert!((w.final_probability - 1.0).abs() < 1e-12);
    }

    #[test]
    fn batch_is_renormalized() {
        let out = WeightingEngine::new().weight(
            vec![
                candidate(TransformationPattern::Progression, 0.8, 0.8),
                candidate(TransformationPattern::SequenceLogic, 0.85, 0.95),
                candidate(TransformationPattern::OppositeHexagram, 0.5, 0.75),
            ],
            &profile(Urgency::Medium, SituationNature::Growth),
        );
        let total: f64 = out.iter().map(|w| w.final_probability).sum();
        assert!((total - 1.0).abs() < 1e-9);
        assert!(!is_degenerate(&out));
    }

    #[test]
    fn all_zero_batch_is_uniform() {
        let out = WeightingEngine::new().weight(
            vec![
                candidate(TransformationPattern::SequenceLogic, 0.0, 0.95),
                candidate(TransformationPattern::OppositeHexagram, 0.0, 0.75),
                candidate(TransformationPattern::Progression, 0.0, 0.8),
                candidate(TransformationPattern::MutualHexagram, 0.0, 0.7),
            ],
            &profile(Urgency::Medium, SituationNature::General),
        );
        assert!(is_degenerate(&out));
        for w in &out {
            assert_eq!(w.final_probability, 0.25);
        }
    }

    #[test]
    fn empty_batch_stays_empty() {
        let out = WeightingEngine::new().weight(Vec::new(), &SituationProfile::default());
        assert!(out.is_empty());
        assert!(!is_degenerate(&out));
    }
}
