// Copyright 2025 Cowboy AI, LLC.

//! Structurally derived hexagrams: mutual (nuclear), reversed and opposite

use super::{nature_hint, Branch};
use crate::candidate::{BranchCandidate, Timeframe};
use crate::errors::BranchingResult;
use crate::hexagram::{inverted, nuclear, reversed, Hexagram, LinePattern};
use crate::pattern::TransformationPattern;
use crate::repository::HexagramRepository;
use crate::situation::SituationProfile;

pub(super) fn analyze_mutual(
    base: &Hexagram,
    profile: &SituationProfile,
    repository: &dyn HexagramRepository,
) -> BranchingResult<Vec<BranchCandidate>> {
    derive(
        DerivedKind::Mutual,
        base,
        nuclear(&base.pattern()),
        profile,
        repository,
    )
}

pub(super) fn analyze_reversed(
    base: &Hexagram,
    profile: &SituationProfile,
    repository: &dyn HexagramRepository,
) -> BranchingResult<Vec<BranchCandidate>> {
    derive(
        DerivedKind::Reversed,
        base,
        reversed(&base.pattern()),
        profile,
        repository,
    )
}

pub(super) fn analyze_opposite(
    base: &Hexagram,
    profile: &SituationProfile,
    repository: &dyn HexagramRepository,
) -> BranchingResult<Vec<BranchCandidate>> {
    derive(
        DerivedKind::Opposite,
        base,
        inverted(&base.pattern()),
        profile,
        repository,
    )
}

#[derive(Clone, Copy)]
enum DerivedKind {
    Mutual,
    Reversed,
    Opposite,
}

impl DerivedKind {
    fn pattern(self) -> TransformationPattern {
        match self {
            DerivedKind::Mutual => TransformationPattern::MutualHexagram,
            DerivedKind::Reversed => TransformationPattern::ReversedHexagram,
            DerivedKind::Opposite => TransformationPattern::OppositeHexagram,
        }
    }

    fn raw_probability(self) -> f64 {
        match self {
            DerivedKind::Mutual => 0.6,
            DerivedKind::Reversed => 0.65,
            DerivedKind::Opposite => 0.5,
        }
    }

    fn timeframe(self) -> Timeframe {
        match self {
            DerivedKind::Mutual => Timeframe::MediumTerm,
            DerivedKind::Reversed => Timeframe::ShortTerm,
            DerivedKind::Opposite => Timeframe::Immediate,
        }
    }

    fn framing(self) -> &'static str {
        match self {
            DerivedKind::Mutual => "Beneath the surface",
            DerivedKind::Reversed => "Seen from the other side",
            DerivedKind::Opposite => "Taken to its opposite extreme",
        }
    }
}

fn derive(
    kind: DerivedKind,
    base: &Hexagram,
    lines: LinePattern,
    profile: &SituationProfile,
    repository: &dyn HexagramRepository,
) -> BranchingResult<Vec<BranchCandidate>> {
    let target = repository.find_by_lines(&lines)?;
    let guidance = format!(
        "{}, {} shows as {}: {}. {}",
        kind.framing(),
        base.label(),
        target.label(),
        kind.pattern().description(),
        nature_hint(profile.nature),
    );
    Ok(vec![Branch {
        pattern: kind.pattern(),
        base,
        target: &target,
        raw_probability: kind.raw_probability(),
        guidance,
        changing_lines: Vec::new(),
        timeframe: kind.timeframe(),
    }
    .into_candidate(repository)])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::ClassicalHexagramRepository;
    use pretty_assertions::assert_eq;

    fn target_of(
        analyzer: fn(
            &Hexagram,
            &SituationProfile,
            &dyn HexagramRepository,
        ) -> BranchingResult<Vec<BranchCandidate>>,
        id: u8,
    ) -> BranchCandidate {
        let repo = ClassicalHexagramRepository::new();
        let base = repo.get_hexagram(id).unwrap();
        let mut out = analyzer(&base, &SituationProfile::default(), &repo).unwrap();
        assert_eq!(out.len(), 1);
        out.remove(0)
    }

    #[test]
    fn peace_reverses_to_standstill() {
        let c = target_of(analyze_reversed, 11);
        assert_eq!(c.target_hexagram_id, Some(12));
        assert_eq!(c.raw_probability, 0.65);
        assert_eq!(c.timeframe, Timeframe::ShortTerm);
    }

    #[test]
    fn creative_opposes_receptive() {
        let c = target_of(analyze_opposite, 1);
        assert_eq!(c.target_hexagram_id, Some(2));
        assert_eq!(c.orthodoxy_score, 0.75);
        assert_eq!(c.timeframe, Timeframe::Immediate);
    }

    #[test]
    fn after_completion_nucleus_is_before_completion() {
        let c = target_of(analyze_mutual, 63);
        assert_eq!(c.target_hexagram_id, Some(64));
        assert_eq!(c.raw_probability, 0.6);
        assert_eq!(c.orthodoxy_score, 0.7);
    }

    #[test]
    fn symmetric_hexagram_reverses_to_itself() {
        // Kan reads the same from either end
        let c = target_of(analyze_reversed, 29);
        assert_eq!(c.target_hexagram_id, Some(29));
    }
}
