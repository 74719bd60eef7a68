// Copyright 2025 Cowboy AI, LLC.

use super::{nature_hint, Branch};
use crate::candidate::{BranchCandidate, Timeframe};
use crate::errors::BranchingResult;
use crate::hexagram::{Hexagram, SequenceStage};
use crate::pattern::TransformationPattern;
use crate::repository::HexagramRepository;
use crate::situation::SituationProfile;

const SEQUENCE_BASELINE: f64 = 0.85;

/// The successor in the classical order; 64 wraps back to 1.
pub(super) fn analyze(
    base: &Hexagram,
    profile: &SituationProfile,
    repository: &dyn HexagramRepository,
) -> BranchingResult<Vec<BranchCandidate>> {
    let next_id = repository.sequence_successor(base.id)?;
    let target = repository.get_hexagram(next_id)?;
    let previous = repository.get_hexagram(repository.sequence_predecessor(base.id)?)?;

    let (from_stage, to_stage) = (SequenceStage::of(base.id), SequenceStage::of(target.id));
    let stage_note = if from_stage == to_stage {
        format!("still within the stage of {}", to_stage.theme())
    } else {
        format!(
            "crossing from {} into {}",
            from_stage.theme(),
            to_stage.theme()
        )
    };
    let guidance = format!(
        "Having come through {}, which taught {}, {} in the classical order is followed by {}, \
         {stage_note}. {}",
        previous.label(),
        SequenceStage::of(previous.id).theme(),
        base.label(),
        target.label(),
        nature_hint(profile.nature),
    );

    Ok(vec![Branch {
        pattern: TransformationPattern::SequenceLogic,
        base,
        target: &target,
        raw_probability: SEQUENCE_BASELINE,
        guidance,
        changing_lines: Vec::new(),
        timeframe: Timeframe::LongTerm,
    }
    .into_candidate(repository)])
}
