// Copyright 2025 Cowboy AI, LLC.

//! Changing-line strategies: LineChange (per-line branches) and
//! HexagramChange (all changing lines at once)

use indexmap::map::Entry;
use indexmap::IndexMap;

use super::{nature_hint, Branch};
use crate::candidate::{BranchCandidate, Timeframe};
use crate::errors::BranchingResult;
use crate::hexagram::{with_flipped, Hexagram, LinePosition};
use crate::pattern::TransformationPattern;
use crate::repository::HexagramRepository;
use crate::situation::{SituationProfile, Urgency};

/// Probability mass shared by all LineChange branches
const LINE_CHANGE_BASELINE: f64 = 0.75;

/// Lines marked as changing for an urgency: Low [3], Medium [2, 5], High [1, 4, 6]
pub fn changing_lines(urgency: Urgency) -> Vec<LinePosition> {
    let positions = LinePosition::all();
    let picks: &[usize] = match urgency {
        Urgency::Low => &[2],
        Urgency::Medium => &[1, 4],
        Urgency::High => &[0, 3, 5],
    };
    picks.iter().map(|&i| positions[i]).collect()
}

pub(super) fn analyze_lines(
    base: &Hexagram,
    profile: &SituationProfile,
    repository: &dyn HexagramRepository,
) -> BranchingResult<Vec<BranchCandidate>> {
    let lines = changing_lines(profile.urgency);
    if lines.is_empty() {
        return Ok(Vec::new());
    }
    let share = LINE_CHANGE_BASELINE / lines.len() as f64;
    let timeframe = if profile.urgency == Urgency::High {
        Timeframe::Immediate
    } else {
        Timeframe::ShortTerm
    };

    // keyed by target id, in first-seen order
    let mut branches: IndexMap<u8, BranchCandidate> = IndexMap::new();
    for position in lines {
        let target = repository.find_by_lines(&with_flipped(&base.pattern(), &[position]))?;
        match branches.entry(target.id) {
            Entry::Occupied(mut entry) => {
                let merged = entry.get_mut();
                merged.raw_probability = (merged.raw_probability + share).min(1.0);
                merged.changing_lines.push(position);
                merged.marked_lines = Some(base.marked(&merged.changing_lines));
            }
            Entry::Vacant(entry) => {
                let guidance = format!(
                    "If line {position} of {} turns ({}), the situation becomes {}. {}",
                    base.label(),
                    position.life_stage().description(),
                    target.label(),
                    nature_hint(profile.nature),
                );
                let candidate = Branch {
                    pattern: TransformationPattern::LineChange,
                    base,
                    target: &target,
                    raw_probability: share,
                    guidance,
                    changing_lines: vec![position],
                    timeframe,
                }
                .into_candidate(repository);
                entry.insert(candidate);
            }
        }
    }
    Ok(branches.into_values().collect())
}

pub(super) fn analyze_hexagram(
    base: &Hexagram,
    profile: &SituationProfile,
    repository: &dyn HexagramRepository,
) -> BranchingResult<Vec<BranchCandidate>> {
    let lines = changing_lines(profile.urgency);
    let target = repository.find_by_lines(&with_flipped(&base.pattern(), &lines))?;
    let timeframe = match lines.len() {
        0 | 1 => Timeframe::ShortTerm,
        2 => Timeframe::MediumTerm,
        _ => Timeframe::LongTerm,
    };
    let listed = lines
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ");
    let guidance = format!(
        "Moving lines {listed} carry {} fully into {}. {}",
        base.label(),
        target.label(),
        nature_hint(profile.nature),
    );
    let raw_probability = 1.0 / (1.0 + lines.len() as f64);

    Ok(vec![Branch {
        pattern: TransformationPattern::HexagramChange,
        base,
        target: &target,
        raw_probability,
        guidance,
        changing_lines: lines,
        timeframe,
    }
    .into_candidate(repository)])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::{ClassicalHexagramRepository, MockHexagramRepository, OrthodoxyMetadata};
    use crate::situation::{Importance, Scope, SituationNature};
    use pretty_assertions::assert_eq;

    fn profile(urgency: Urgency) -> SituationProfile {
        SituationProfile::new(urgency, Importance::High, SituationNature::Decision, Scope::Personal)
    }

    fn positions(ps: &[u8]) -> Vec<LinePosition> {
        ps.iter().map(|&p| LinePosition::new(p).unwrap()).collect()
    }

    #[test]
    fn more_urgency_more_changing_lines() {
        assert_eq!(changing_lines(Urgency::Low), positions(&[3]));
        assert_eq!(changing_lines(Urgency::Medium), positions(&[2, 5]));
        assert_eq!(changing_lines(Urgency::High), positions(&[1, 4, 6]));
    }

    #[test]
    fn line_change_emits_one_branch_per_line() {
        let repo = ClassicalHexagramRepository::new();
        let base = repo.get_hexagram(1).unwrap();
        let out = analyze_lines(&base, &profile(Urgency::High), &repo).unwrap();

        // Qian with a single line yin: Gou (1), Xiao Chu (4), Guai (6)
        let targets: Vec<_> = out.iter().map(|c| c.target_hexagram_id).collect();
        assert_eq!(targets, vec![Some(44), Some(9), Some(43)]);
        for c in &out {
            assert!((c.raw_probability - 0.25).abs() < 1e-12);
            assert_eq!(c.orthodoxy_score, 0.85);
            assert_eq!(c.changing_lines.len(), 1);
            assert_eq!(c.timeframe, Timeframe::Immediate);
        }
    }

    #[test]
    fn hexagram_change_flips_all_lines_together() {
        let repo = ClassicalHexagramRepository::new();
        let base = repo.get_hexagram(2).unwrap();
        let out = analyze_hexagram(&base, &profile(Urgency::Medium), &repo).unwrap();

        assert_eq!(out.len(), 1);
        let c = &out[0];
        // Kun with lines 2 and 5 yang: Kan
        assert_eq!(c.target_hexagram_id, Some(29));
        assert!((c.raw_probability - 1.0 / 3.0).abs() < 1e-12);
        assert_eq!(c.orthodoxy_score, 0.9);
        assert_eq!(c.changing_lines, positions(&[2, 5]));
        assert_eq!(c.timeframe, Timeframe::MediumTerm);
    }

    #[test]
    fn low_urgency_single_line() {
        let repo = ClassicalHexagramRepository::new();
        let base = repo.get_hexagram(1).unwrap();
        let out = analyze_hexagram(&base, &profile(Urgency::Low), &repo).unwrap();
        // Qian with line 3 yin: Lu (Treading)
        assert_eq!(out[0].target_hexagram_id, Some(10));
        assert_eq!(out[0].raw_probability, 0.5);
    }

    #[test]
    fn flips_landing_on_one_target_merge_into_a_single_branch() {
        let classical = ClassicalHexagramRepository::new();
        let base = classical.get_hexagram(1).unwrap();
        let kun = classical.get_hexagram(2).unwrap();
        let mut repo = MockHexagramRepository::new();
        repo.expect_find_by_lines()
            .times(3)
            .returning(move |_| Ok(kun.clone()));
        repo.expect_orthodoxy_metadata().returning(|p| OrthodoxyMetadata {
            baseline_orthodoxy: p.baseline_orthodoxy(),
        });
        repo.expect_hexagram_element()
            .returning(move |id| Ok(classical.get_hexagram(id)?.element()));

        let out = analyze_lines(&base, &profile(Urgency::High), &repo).unwrap();

        assert_eq!(out.len(), 1);
        let merged = &out[0];
        assert_eq!(merged.target_hexagram_id, Some(2));
        assert!((merged.raw_probability - 0.75).abs() < 1e-12);
        assert_eq!(merged.changing_lines, positions(&[1, 4, 6]));
        let flagged: Vec<u8> = merged
            .marked_lines
            .expect("merged branch keeps marked lines")
            .iter()
            .filter(|l| l.changing)
            .map(|l| l.position.get())
            .collect();
        assert_eq!(flagged, vec![1, 4, 6]);
    }
}
