// Copyright 2025 Cowboy AI, LLC.

//! Pattern analyzers
//!
//! One strategy per [`TransformationPattern`], dispatched by a single match.
//! Every analyzer is a pure function of the base hexagram, the situation
//! profile and read-only repository lookups:
//!
//! | Pattern          | Branches | Raw probability          | Orthodoxy |
//! |------------------|----------|--------------------------|-----------|
//! | Progression      | 1        | 0.8                      | 0.8       |
//! | LineChange       | 1..=3    | 0.75 split across lines  | 0.85      |
//! | HexagramChange   | 1        | 1 / (1 + changing lines) | 0.9       |
//! | MutualHexagram   | 1        | 0.6                      | 0.7       |
//! | ReversedHexagram | 1        | 0.65                     | 0.8       |
//! | OppositeHexagram | 1        | 0.5                      | 0.75      |
//! | SequenceLogic    | 1        | 0.85                     | 0.95      |
//!
//! A repository miss makes the analyzer yield no candidates at all.

mod derived;
mod line_change;
mod progression;
mod sequence;

pub use line_change::changing_lines;

use crate::candidate::{BranchCandidate, Timeframe};
use crate::errors::BranchingResult;
use crate::hexagram::{ElementRelation, FiveElement, Hexagram, LinePosition};
use crate::pattern::TransformationPattern;
use crate::repository::HexagramRepository;
use crate::situation::{SituationNature, SituationProfile};

/// Run one pattern, yielding an empty list on any repository miss
pub fn analyze(
    pattern: TransformationPattern,
    base: &Hexagram,
    profile: &SituationProfile,
    repository: &dyn HexagramRepository,
) -> Vec<BranchCandidate> {
    try_analyze(pattern, base, profile, repository).unwrap_or_default()
}

/// Run one pattern, surfacing the repository miss that emptied it
pub fn try_analyze(
    pattern: TransformationPattern,
    base: &Hexagram,
    profile: &SituationProfile,
    repository: &dyn HexagramRepository,
) -> BranchingResult<Vec<BranchCandidate>> {
    match pattern {
        TransformationPattern::Progression => progression::analyze(base, profile, repository),
        TransformationPattern::LineChange => line_change::analyze_lines(base, profile, repository),
        TransformationPattern::HexagramChange => {
            line_change::analyze_hexagram(base, profile, repository)
        }
        TransformationPattern::MutualHexagram => derived::analyze_mutual(base, profile, repository),
        TransformationPattern::ReversedHexagram => {
            derived::analyze_reversed(base, profile, repository)
        }
        TransformationPattern::OppositeHexagram => {
            derived::analyze_opposite(base, profile, repository)
        }
        TransformationPattern::SequenceLogic => sequence::analyze(base, profile, repository),
    }
}

/// Candidate leading from `base` to `target`
pub(crate) struct Branch<'a> {
    pub pattern: TransformationPattern,
    pub base: &'a Hexagram,
    pub target: &'a Hexagram,
    pub raw_probability: f64,
    pub guidance: String,
    pub changing_lines: Vec<LinePosition>,
    pub timeframe: Timeframe,
}

impl Branch<'_> {
    pub(crate) fn into_candidate(self, repository: &dyn HexagramRepository) -> BranchCandidate {
        let orthodoxy = repository.orthodoxy_metadata(self.pattern).baseline_orthodoxy;
        let elements = element_pair(repository, self.base.id, self.target.id);
        let guidance = match elements {
            Some((from, to)) => format!(
                "{} {}",
                self.guidance,
                ElementRelation::between(from, to).note(from, to)
            ),
            None => self.guidance,
        };
        let marked_lines =
            (!self.changing_lines.is_empty()).then(|| self.base.marked(&self.changing_lines));
        BranchCandidate {
            pattern: self.pattern,
            source_hexagram_id: self.base.id,
            target_hexagram_id: Some(self.target.id),
            target_label: Some(self.target.label()),
            raw_probability: self.raw_probability.clamp(0.0, 1.0),
            orthodoxy_score: orthodoxy.clamp(0.0, 1.0),
            guidance,
            changing_lines: self.changing_lines,
            line_transition: None,
            timeframe: self.timeframe,
            placement: Some(self.target.placement()),
            element_relation: elements.map(|(from, to)| ElementRelation::between(from, to)),
            marked_lines,
        }
    }
}

/// Elements of source and target; a lookup miss only drops the element note
fn element_pair(
    repository: &dyn HexagramRepository,
    from: u8,
    to: u8,
) -> Option<(FiveElement, FiveElement)> {
    let from = repository.hexagram_element(from).ok()?;
    let to = repository.hexagram_element(to).ok()?;
    Some((from, to))
}

/// Closing advice tailored to the kind of concern
pub(crate) fn nature_hint(nature: SituationNature) -> &'static str {
    match nature {
        SituationNature::Decision => "Weigh this branch against your options before committing.",
        SituationNature::Relationship => {
            "Consider how the other people involved will experience it."
        }
        SituationNature::Anxiety => "Name the fear plainly; it loses force once it is seen.",
        SituationNature::Confusion => "Clarify what you actually know before acting.",
        SituationNature::Growth => "Treat each step as practice rather than a verdict.",
        SituationNature::Work => "Tie the next step to a concrete, visible result.",
        SituationNature::Love => "Let sincerity lead rather than strategy.",
        SituationNature::Health => "Favour steady habits over sudden effort.",
        SituationNature::General => "Observe quietly and act when the moment is clear.",
    }
}
