// Copyright 2025 Cowboy AI, LLC.

use super::line_change::changing_lines;
use super::{nature_hint, Branch};
use crate::candidate::{BranchCandidate, LineTransition, Timeframe};
use crate::errors::BranchingResult;
use crate::hexagram::{Hexagram, LinePosition};
use crate::pattern::TransformationPattern;
use crate::repository::HexagramRepository;
use crate::situation::SituationProfile;

const PROGRESSION_BASELINE: f64 = 0.8;

/// Focus moves from the lowest changing line to the one above it, staying
/// inside the base hexagram.
pub(super) fn analyze(
    base: &Hexagram,
    profile: &SituationProfile,
    repository: &dyn HexagramRepository,
) -> BranchingResult<Vec<BranchCandidate>> {
    let from = changing_lines(profile.urgency)
        .into_iter()
        .min()
        .unwrap_or(LinePosition::all()[0]);
    let to = from.advance();
    let guidance = format!(
        "Within {}, the situation moves from line {from} to line {to}: {}. {}",
        base.label(),
        to.life_stage().description(),
        nature_hint(profile.nature),
    );

    let mut candidate = Branch {
        pattern: TransformationPattern::Progression,
        base,
        target: base,
        raw_probability: PROGRESSION_BASELINE,
        guidance,
        changing_lines: Vec::new(),
        timeframe: Timeframe::ShortTerm,
    }
    .into_candidate(repository);
    candidate.line_transition = Some(LineTransition { from, to });
    Ok(vec![candidate])
}
