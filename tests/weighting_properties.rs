// Copyright 2025 Cowboy AI, LLC.

use hexagram_branching::{
    BranchCandidate, ExperienceLevel, Importance, PatternSelector, Scope, SituationNature,
    SituationProfile, Timeframe, TransformationPattern, Urgency, UserProfile, WeightingEngine,
};
use proptest::prelude::*;

fn pattern() -> impl Strategy<Value = TransformationPattern> {
    prop::sample::select(TransformationPattern::ALL.to_vec())
}

fn urgency() -> impl Strategy<Value = Urgency> {
    prop::sample::select(vec![Urgency::Low, Urgency::Medium, Urgency::High])
}

fn importance() -> impl Strategy<Value = Importance> {
    prop::sample::select(vec![Importance::Low, Importance::Medium, Importance::High])
}

fn nature() -> impl Strategy<Value = SituationNature> {
    let mut all = SituationNature::PRIORITY.to_vec();
    all.push(SituationNature::General);
    prop::sample::select(all)
}

fn profile() -> impl Strategy<Value = SituationProfile> {
    (urgency(), importance(), nature(), prop::option::of(nature())).prop_map(
        |(urgency, importance, nature, secondary)| {
            let profile = SituationProfile::new(urgency, importance, nature, Scope::Personal);
            match secondary {
                Some(s) if s != nature => profile.with_secondary(s),
                _ => profile,
            }
        },
    )
}

fn candidate() -> impl Strategy<Value = BranchCandidate> {
    (pattern(), 0.0f64..=1.0, 0.0f64..=1.0).prop_map(|(pattern, raw, orthodoxy)| {
        BranchCandidate {
            pattern,
            source_hexagram_id: 1,
            target_hexagram_id: Some(1),
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
    })
}

proptest! {
    #[test]
    fn final_probabilities_form_a_distribution(
        candidates in prop::collection::vec(candidate(), 1..16),
        profile in profile(),
    ) {
        let weighted = WeightingEngine::new().weight(candidates.clone(), &profile);
        prop_assert_eq!(weighted.len(), candidates.len());
        let total: f64 = weighted.iter().map(|w| w.final_probability).sum();
        prop_assert!((total - 1.0).abs() < 1e-6, "sum was {}", total);
        for w in &weighted {
            prop_assert!(w.final_probability >= 0.0);
            prop_assert!(w.adjusted_probability >= 0.0);
        }
    }

    #[test]
    fn zero_raw_batches_still_sum_to_one(
        patterns in prop::collection::vec(pattern(), 1..8),
    ) {
        let candidates: Vec<_> = patterns
            .into_iter()
            .map(|pattern| BranchCandidate {
                pattern,
                source_hexagram_id: 1,
                target_hexagram_id: None,
                target_label: None,
                raw_probability: 0.0,
                orthodoxy_score: 0.5,
                guidance: String::new(),
                changing_lines: Vec::new(),
                line_transition: None,
                timeframe: Timeframe::Immediate,
                placement: None,
                element_relation: None,
                marked_lines: None,
            })
            .collect();
        let weighted = WeightingEngine::new().weight(candidates, &SituationProfile::default());
        let total: f64 = weighted.iter().map(|w| w.final_probability).sum();
        prop_assert!((total - 1.0).abs() < 1e-6);
    }

    #[test]
    fn selector_returns_one_to_five_distinct_patterns(
        profile in profile(),
        level in prop::option::of(prop::sample::select(vec![
            ExperienceLevel::Beginner,
            ExperienceLevel::Intermediate,
            ExperienceLevel::Advanced,
        ])),
    ) {
        let user = level.map(UserProfile::new);
        let selected = PatternSelector::new().select(&profile, user.as_ref());
        prop_assert!((1..=5).contains(&selected.len()));
        let mut distinct = selected.clone();
        distinct.sort();
        distinct.dedup();
        prop_assert_eq!(distinct.len(), selected.len());
    }
}
