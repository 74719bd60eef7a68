// Copyright 2025 Cowboy AI, LLC.

//! Hexagram reference data
//!
//! [`HexagramRepository`] is the read-only lookup seam the engine is injected
//! with. [`ClassicalHexagramRepository`] is the in-memory implementation
//! holding the 64 hexagrams in King Wen order; it is immutable after
//! construction and can be shared across threads without locking.

use std::collections::HashMap;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::errors::{BranchingError, BranchingResult};
use crate::hexagram::{compose, FiveElement, Hexagram, LinePattern, Trigram, HEXAGRAM_COUNT};
use crate::pattern::TransformationPattern;

/// Orthodoxy facts about a transformation pattern
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct OrthodoxyMetadata {
    /// Baseline classical orthodoxy score (0..1)
    pub baseline_orthodoxy: f64,
}

/// Read-only provider of hexagram facts
#[cfg_attr(test, mockall::automock)]
pub trait HexagramRepository: Send + Sync {
    /// Hexagram by sequence number
    fn get_hexagram(&self, id: u8) -> BranchingResult<Hexagram>;

    /// Hexagram with exactly these lines
    fn find_by_lines(&self, lines: &LinePattern) -> BranchingResult<Hexagram>;

    /// Next hexagram in the classical sequence, wrapping from 64 to 1
    fn sequence_successor(&self, id: u8) -> BranchingResult<u8>;

    /// Previous hexagram in the classical sequence, wrapping from 1 to 64
    fn sequence_predecessor(&self, id: u8) -> BranchingResult<u8> {
        if !(1..=HEXAGRAM_COUNT).contains(&id) {
            return Err(BranchingError::HexagramNotFound { id });
        }
        Ok((id + HEXAGRAM_COUNT - 2) % HEXAGRAM_COUNT + 1)
    }

    /// Five-phase element of a hexagram (that of its upper trigram)
    fn hexagram_element(&self, id: u8) -> BranchingResult<FiveElement> {
        self.get_hexagram(id).map(|h| h.element())
    }

    /// Orthodoxy metadata for a pattern
    fn orthodoxy_metadata(&self, pattern: TransformationPattern) -> OrthodoxyMetadata {
        OrthodoxyMetadata {
            baseline_orthodoxy: pattern.baseline_orthodoxy(),
        }
    }
}

/// (pinyin, english, lower, upper) in King Wen order
const KING_WEN: [(&str, &str, Trigram, Trigram); 64] = {
    use Trigram::*;
    [
        ("Qian", "The Creative", Heaven, Heaven),
        ("Kun", "The Receptive", Earth, Earth),
        ("Zhun", "Difficulty at the Beginning", Thunder, Water),
        ("Meng", "Youthful Folly", Water, Mountain),
        ("Xu", "Waiting", Heaven, Water),
        ("Song", "Conflict", Water, Heaven),
        ("Shi", "The Army", Water, Earth),
        ("Bi", "Holding Together", Earth, Water),
        ("Xiao Chu", "Small Taming", Heaven, Wind),
        ("Lu", "Treading", Lake, Heaven),
        ("Tai", "Peace", Heaven, Earth),
        ("Pi", "Standstill", Earth, Heaven),
        ("Tong Ren", "Fellowship", Fire, Heaven),
        ("Da You", "Great Possession", Heaven, Fire),
        ("Qian", "Modesty", Mountain, Earth),
        ("Yu", "Enthusiasm", Earth, Thunder),
        ("Sui", "Following", Thunder, Lake),
        ("Gu", "Work on the Decayed", Wind, Mountain),
        ("Lin", "Approach", Lake, Earth),
        ("Guan", "Contemplation", Earth, Wind),
        ("Shi He", "Biting Through", Thunder, Fire),
        ("Bi", "Grace", Fire, Mountain),
        ("Bo", "Splitting Apart", Earth, Mountain),
        ("Fu", "Return", Thunder, Earth),
        ("Wu Wang", "Innocence", Thunder, Heaven),
        ("Da Chu", "Great Taming", Heaven, Mountain),
        ("Yi", "Nourishment", Thunder, Mountain),
        ("Da Guo", "Great Exceeding", Wind, Lake),
        ("Kan", "The Abysmal", Water, Water),
        ("Li", "The Clinging", Fire, Fire),
        ("Xian", "Influence", Mountain, Lake),
        ("Heng", "Duration", Wind, Thunder),
        ("Dun", "Retreat", Mountain, Heaven),
        ("Da Zhuang", "Great Power", Heaven, Thunder),
        ("Jin", "Progress", Earth, Fire),
        ("Ming Yi", "Darkening of the Light", Fire, Earth),
        ("Jia Ren", "The Family", Fire, Wind),
        ("Kui", "Opposition", Lake, Fire),
        ("Jian", "Obstruction", Mountain, Water),
        ("Xie", "Deliverance", Water, Thunder),
        ("Sun", "Decrease", Lake, Mountain),
        ("Yi", "Increase", Thunder, Wind),
        ("Guai", "Breakthrough", Heaven, Lake),
        ("Gou", "Coming to Meet", Wind, Heaven),
        ("Cui", "Gathering Together", Earth, Lake),
        ("Sheng", "Pushing Upward", Wind, Earth),
        ("Kun", "Oppression", Water, Lake),
        ("Jing", "The Well", Wind, Water),
        ("Ge", "Revolution", Fire, Lake),
        ("Ding", "The Cauldron", Wind, Fire),
        ("Zhen", "The Arousing", Thunder, Thunder),
        ("Gen", "Keeping Still", Mountain, Mountain),
        ("Jian", "Development", Mountain, Wind),
        ("Gui Mei", "The Marrying Maiden", Lake, Thunder),
        ("Feng", "Abundance", Fire, Thunder),
        ("Lu", "The Wanderer", Mountain, Fire),
        ("Xun", "The Gentle", Wind, Wind),
        ("Dui", "The Joyous", Lake, Lake),
        ("Huan", "Dispersion", Water, Wind),
        ("Jie", "Limitation", Lake, Water),
        ("Zhong Fu", "Inner Truth", Lake, Wind),
        ("Xiao Guo", "Small Exceeding", Mountain, Thunder),
        ("Ji Ji", "After Completion", Fire, Water),
        ("Wei Ji", "Before Completion", Water, Fire),
    ]
};

/// In-memory classical hexagram table
#[derive(Debug, Clone)]
pub struct ClassicalHexagramRepository {
    hexagrams: Vec<Hexagram>,
    by_lines: HashMap<LinePattern, u8>,
}

impl Default for ClassicalHexagramRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl ClassicalHexagramRepository {
    /// Build the 64-hexagram table and its line index
    pub fn new() -> Self {
        let hexagrams: Vec<Hexagram> = KING_WEN
            .iter()
            .zip(1..=HEXAGRAM_COUNT)
            .map(|((name, english, lower, upper), id)| Hexagram {
                id,
                name: name.to_string(),
                english_name: english.to_string(),
                lines: Hexagram::lines_of(compose(*lower, *upper)),
            })
            .collect();
        let by_lines = hexagrams.iter().map(|h| (h.pattern(), h.id)).collect();
        Self {
            hexagrams,
            by_lines,
        }
    }

    /// All hexagrams in sequence order
    pub fn all(&self) -> &[Hexagram] {
        &self.hexagrams
    }
}

impl HexagramRepository for ClassicalHexagramRepository {
    fn get_hexagram(&self, id: u8) -> BranchingResult<Hexagram> {
        if id == 0 {
            return Err(BranchingError::HexagramNotFound { id });
        }
        self.hexagrams
            .get(usize::from(id) - 1)
            .cloned()
            .ok_or(BranchingError::HexagramNotFound { id })
    }

    fn find_by_lines(&self, lines: &LinePattern) -> BranchingResult<Hexagram> {
        let id = *self
            .by_lines
            .get(lines)
            .ok_or_else(|| BranchingError::NoHexagramForLines {
                pattern: format!("{lines:?}"),
            })?;
        self.get_hexagram(id)
    }

    fn sequence_successor(&self, id: u8) -> BranchingResult<u8> {
        if !(1..=HEXAGRAM_COUNT).contains(&id) {
            return Err(BranchingError::HexagramNotFound { id });
        }
        Ok((id % HEXAGRAM_COUNT) + 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hexagram::LineValue::{Yang, Yin};
    use std::collections::HashSet;

    #[test]
    fn table_has_64_distinct_patterns() {
        let repo = ClassicalHexagramRepository::new();
        assert_eq!(repo.all().len(), 64);
        let patterns: HashSet<_> = repo.all().iter().map(|h| h.pattern()).collect();
        assert_eq!(patterns.len(), 64);
    }

    #[test]
    fn creative_and_receptive() {
        let repo = ClassicalHexagramRepository::new();
        assert_eq!(repo.get_hexagram(1).unwrap().pattern(), [Yang; 6]);
        assert_eq!(repo.get_hexagram(2).unwrap().pattern(), [Yin; 6]);
        assert_eq!(repo.find_by_lines(&[Yang; 6]).unwrap().id, 1);
    }

    #[test]
    fn known_line_patterns() {
        let repo = ClassicalHexagramRepository::new();
        // Zhun: thunder below water
        assert_eq!(
            repo.get_hexagram(3).unwrap().pattern(),
            [Yang, Yin, Yin, Yin, Yang, Yin]
        );
        // Tai: heaven below earth
        assert_eq!(
            repo.get_hexagram(11).unwrap().pattern(),
            [Yang, Yang, Yang, Yin, Yin, Yin]
        );
    }

    #[test]
    fn lookup_misses() {
        let repo = ClassicalHexagramRepository::new();
        assert!(repo.get_hexagram(0).unwrap_err().is_not_found());
        assert!(repo.get_hexagram(65).unwrap_err().is_not_found());
        assert!(repo.sequence_successor(0).is_err());
    }

    #[test]
    fn successor_wraps() {
        let repo = ClassicalHexagramRepository::new();
        assert_eq!(repo.sequence_successor(1).unwrap(), 2);
        assert_eq!(repo.sequence_successor(64).unwrap(), 1);
    }

    #[test]
    fn predecessor_wraps() {
        let repo = ClassicalHexagramRepository::new();
        assert_eq!(repo.sequence_predecessor(2).unwrap(), 1);
        assert_eq!(repo.sequence_predecessor(1).unwrap(), 64);
        assert!(repo.sequence_predecessor(65).is_err());
    }

    #[test]
    fn element_lookup_matches_classical_groups() {
        let repo = ClassicalHexagramRepository::new();
        // first eight entries of the classical element map
        let expected = [
            FiveElement::Metal,
            FiveElement::Earth,
            FiveElement::Water,
            FiveElement::Earth,
            FiveElement::Water,
            FiveElement::Metal,
            FiveElement::Earth,
            FiveElement::Water,
        ];
        for (id, element) in (1..=8).zip(expected) {
            assert_eq!(repo.hexagram_element(id).unwrap(), element, "#{id}");
        }
        assert!(repo.hexagram_element(0).is_err());
    }

    #[test]
    fn default_orthodoxy_comes_from_pattern() {
        let repo = ClassicalHexagramRepository::new();
        let meta = repo.orthodoxy_metadata(TransformationPattern::SequenceLogic);
        assert_eq!(meta.baseline_orthodoxy, 0.95);
    }
}
