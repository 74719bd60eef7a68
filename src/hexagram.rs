// Copyright 2025 Cowboy AI, LLC.

//! Hexagram value objects
//!
//! A hexagram is six stacked lines read bottom to top. Lines, positions,
//! trigrams and hexagrams are immutable values; every transformation returns
//! a new [`LinePattern`] which the repository resolves back to a hexagram.

use schemars::gen::SchemaGenerator;
use schemars::schema::Schema;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::errors::{BranchingError, BranchingResult};

/// Number of hexagrams in the classical sequence
pub const HEXAGRAM_COUNT: u8 = 64;

/// Yin or Yang value of a single line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum LineValue {
    /// Broken line
    Yin,
    /// Solid line
    Yang,
}

impl LineValue {
    /// The opposite polarity
    pub fn flipped(self) -> Self {
        match self {
            LineValue::Yin => LineValue::Yang,
            LineValue::Yang => LineValue::Yin,
        }
    }
}

/// The six line values of a hexagram, bottom to top
pub type LinePattern = [LineValue; 6];

/// Line position within a hexagram (1 = bottom, 6 = top)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct LinePosition(u8);

impl LinePosition {
    /// Create a position, rejecting anything outside 1..=6
    pub fn new(position: u8) -> BranchingResult<Self> {
        if (1..=6).contains(&position) {
            Ok(Self(position))
        } else {
            Err(BranchingError::InvalidLinePosition(position))
        }
    }

    /// All six positions, bottom to top
    pub fn all() -> [LinePosition; 6] {
        [Self(1), Self(2), Self(3), Self(4), Self(5), Self(6)]
    }

    /// Numeric position (1..=6)
    pub fn get(self) -> u8 {
        self.0
    }

    /// Zero-based index into a [`LinePattern`]
    pub fn index(self) -> usize {
        usize::from(self.0 - 1)
    }

    /// The next position upward, wrapping from the top line back to the first
    pub fn advance(self) -> Self {
        Self((self.0 % 6) + 1)
    }

    /// Value a line at this position classically prefers (odd Yang, even Yin)
    pub fn preferred_value(self) -> LineValue {
        if self.0 % 2 == 1 {
            LineValue::Yang
        } else {
            LineValue::Yin
        }
    }

    /// Life stage associated with this position
    pub fn life_stage(self) -> LifeStage {
        match self.0 {
            1 => LifeStage::Inception,
            2 => LifeStage::Emergence,
            3 => LifeStage::Threshold,
            4 => LifeStage::Approach,
            5 => LifeStage::Mastery,
            _ => LifeStage::Culmination,
        }
    }
}

impl TryFrom<u8> for LinePosition {
    type Error = BranchingError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<LinePosition> for u8 {
    fn from(position: LinePosition) -> Self {
        position.0
    }
}

impl fmt::Display for LinePosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl JsonSchema for LinePosition {
    fn schema_name() -> String {
        "LinePosition".to_string()
    }

    fn json_schema(gen: &mut SchemaGenerator) -> Schema {
        <u8>::json_schema(gen)
    }
}

/// Classical life stage of a line position
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum LifeStage {
    /// First line: something begins below the surface
    Inception,
    /// Second line: first visible expression
    Emergence,
    /// Third line: the dangerous edge of the lower trigram
    Threshold,
    /// Fourth line: nearing the seat of influence
    Approach,
    /// Fifth line: the ruling position
    Mastery,
    /// Sixth line: completion and excess
    Culmination,
}

impl LifeStage {
    /// Short human-readable description
    pub fn description(self) -> &'static str {
        match self {
            LifeStage::Inception => "a quiet beginning that is not yet visible",
            LifeStage::Emergence => "first steps that others begin to notice",
            LifeStage::Threshold => "a turning point that calls for caution",
            LifeStage::Approach => "drawing close to real influence",
            LifeStage::Mastery => "the fullest expression of the situation",
            LifeStage::Culmination => "completion, where holding on too long becomes excess",
        }
    }
}

/// A single line of a hexagram
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Line {
    /// Position within the hexagram
    pub position: LinePosition,
    /// Yin or Yang
    pub value: LineValue,
    /// Set only when a transformation marks this line for inversion
    pub changing: bool,
}

impl Line {
    /// A stable (non-changing) line
    pub fn new(position: LinePosition, value: LineValue) -> Self {
        Self {
            position,
            value,
            changing: false,
        }
    }

    /// Copy of this line marked as changing
    pub fn marked_changing(self) -> Self {
        Self {
            changing: true,
            ..self
        }
    }

    /// Whether the line sits in its classically correct place.
    ///
    /// Advisory only; no score in this crate depends on it.
    pub fn is_correctly_placed(&self) -> bool {
        self.value == self.position.preferred_value()
    }
}

/// Count of correctly and incorrectly placed lines
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Placement {
    /// Lines whose value matches their position's preference
    pub correct: u8,
    /// Lines whose value opposes their position's preference
    pub incorrect: u8,
}

/// The eight trigrams
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum Trigram {
    /// ☰ Qian
    Heaven,
    /// ☱ Dui
    Lake,
    /// ☲ Li
    Fire,
    /// ☳ Zhen
    Thunder,
    /// ☴ Xun
    Wind,
    /// ☵ Kan
    Water,
    /// ☶ Gen
    Mountain,
    /// ☷ Kun
    Earth,
}

impl Trigram {
    /// All trigrams
    pub const ALL: [Trigram; 8] = [
        Trigram::Heaven,
        Trigram::Lake,
        Trigram::Fire,
        Trigram::Thunder,
        Trigram::Wind,
        Trigram::Water,
        Trigram::Mountain,
        Trigram::Earth,
    ];

    /// Line values bottom to top
    pub fn lines(self) -> [LineValue; 3] {
        use LineValue::{Yang, Yin};
        match self {
            Trigram::Heaven => [Yang, Yang, Yang],
            Trigram::Lake => [Yang, Yang, Yin],
            Trigram::Fire => [Yang, Yin, Yang],
            Trigram::Thunder => [Yang, Yin, Yin],
            Trigram::Wind => [Yin, Yang, Yang],
            Trigram::Water => [Yin, Yang, Yin],
            Trigram::Mountain => [Yin, Yin, Yang],
            Trigram::Earth => [Yin, Yin, Yin],
        }
    }

    /// Trigram with the given line values
    pub fn from_lines(lines: [LineValue; 3]) -> Self {
        use LineValue::{Yang, Yin};
        match lines {
            [Yang, Yang, Yang] => Trigram::Heaven,
            [Yang, Yang, Yin] => Trigram::Lake,
            [Yang, Yin, Yang] => Trigram::Fire,
            [Yang, Yin, Yin] => Trigram::Thunder,
            [Yin, Yang, Yang] => Trigram::Wind,
            [Yin, Yang, Yin] => Trigram::Water,
            [Yin, Yin, Yang] => Trigram::Mountain,
            [Yin, Yin, Yin] => Trigram::Earth,
        }
    }

    /// Element of the five-phase cycle this trigram belongs to
    pub fn element(self) -> FiveElement {
        match self {
            Trigram::Heaven | Trigram::Lake => FiveElement::Metal,
            Trigram::Fire => FiveElement::Fire,
            Trigram::Thunder | Trigram::Wind => FiveElement::Wood,
            Trigram::Water => FiveElement::Water,
            Trigram::Mountain | Trigram::Earth => FiveElement::Earth,
        }
    }

    /// Unicode trigram symbol
    pub fn image(self) -> char {
        match self {
            Trigram::Heaven => '☰',
            Trigram::Lake => '☱',
            Trigram::Fire => '☲',
            Trigram::Thunder => '☳',
            Trigram::Wind => '☴',
            Trigram::Water => '☵',
            Trigram::Mountain => '☶',
            Trigram::Earth => '☷',
        }
    }

    /// Pinyin name
    pub fn name(self) -> &'static str {
        match self {
            Trigram::Heaven => "Qian",
            Trigram::Lake => "Dui",
            Trigram::Fire => "Li",
            Trigram::Thunder => "Zhen",
            Trigram::Wind => "Xun",
            Trigram::Water => "Kan",
            Trigram::Mountain => "Gen",
            Trigram::Earth => "Kun",
        }
    }
}

/// The five phases (五行)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum FiveElement {
    /// 木, spring, east
    Wood,
    /// 火, summer, south
    Fire,
    /// 土, the seasonal turn, centre
    Earth,
    /// 金, autumn, west
    Metal,
    /// 水, winter, north
    Water,
}

impl FiveElement {
    /// Element this one feeds in the generating cycle
    pub fn generates(self) -> Self {
        match self {
            FiveElement::Wood => FiveElement::Fire,
            FiveElement::Fire => FiveElement::Earth,
            FiveElement::Earth => FiveElement::Metal,
            FiveElement::Metal => FiveElement::Water,
            FiveElement::Water => FiveElement::Wood,
        }
    }

    /// Element this one overcomes in the controlling cycle
    pub fn destroys(self) -> Self {
        match self {
            FiveElement::Wood => FiveElement::Earth,
            FiveElement::Fire => FiveElement::Metal,
            FiveElement::Earth => FiveElement::Water,
            FiveElement::Metal => FiveElement::Wood,
            FiveElement::Water => FiveElement::Fire,
        }
    }

    /// Classical character
    pub fn chinese(self) -> char {
        match self {
            FiveElement::Wood => '木',
            FiveElement::Fire => '火',
            FiveElement::Earth => '土',
            FiveElement::Metal => '金',
            FiveElement::Water => '水',
        }
    }
}

/// How the element of a branch's target relates to that of its source
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum ElementRelation {
    /// Both share one element
    Same,
    /// Source feeds target (相生)
    Generative,
    /// Source overcomes target (相剋)
    Destructive,
    /// Neither cycle links them directly from the source
    Neutral,
}

impl ElementRelation {
    /// Relation from `from` to `to`
    pub fn between(from: FiveElement, to: FiveElement) -> Self {
        if from == to {
            ElementRelation::Same
        } else if from.generates() == to {
            ElementRelation::Generative
        } else if from.destroys() == to {
            ElementRelation::Destructive
        } else {
            ElementRelation::Neutral
        }
    }

    /// One-sentence reading of the relation
    pub fn note(self, from: FiveElement, to: FiveElement) -> String {
        let (f, t) = (from.chinese(), to.chinese());
        match self {
            ElementRelation::Same => format!("The element {f} stays constant."),
            ElementRelation::Generative => {
                format!("{f} feeds {t}: the change is supported by what came before.")
            }
            ElementRelation::Destructive => {
                format!("{f} overcomes {t}: expect friction before the new form settles.")
            }
            ElementRelation::Neutral => format!("{f} and {t} meet without a direct cycle."),
        }
    }
}

/// Join a lower and upper trigram into a line pattern
pub fn compose(lower: Trigram, upper: Trigram) -> LinePattern {
    let l = lower.lines();
    let u = upper.lines();
    [l[0], l[1], l[2], u[0], u[1], u[2]]
}

/// Read the pattern top to bottom (line 1 <-> 6, 2 <-> 5, 3 <-> 4)
pub fn reversed(pattern: &LinePattern) -> LinePattern {
    let mut out = *pattern;
    out.reverse();
    out
}

/// Invert every line
pub fn inverted(pattern: &LinePattern) -> LinePattern {
    (*pattern).map(LineValue::flipped)
}

/// Nuclear pattern: lower = lines 2,3,4 and upper = lines 3,4,5
pub fn nuclear(pattern: &LinePattern) -> LinePattern {
    [
        pattern[1], pattern[2], pattern[3], pattern[2], pattern[3], pattern[4],
    ]
}

/// Invert the lines at the given positions
pub fn with_flipped(pattern: &LinePattern, positions: &[LinePosition]) -> LinePattern {
    let mut out = *pattern;
    for position in positions {
        let idx = position.index();
        out[idx] = out[idx].flipped();
    }
    out
}

/// An immutable hexagram
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Hexagram {
    /// Classical sequence number (1..=64)
    pub id: u8,
    /// Pinyin name
    pub name: String,
    /// English name
    pub english_name: String,
    /// Lines bottom to top
    pub lines: [Line; 6],
}

impl Hexagram {
    /// Build a hexagram from its line pattern
    pub fn from_lines(
        id: u8,
        name: impl Into<String>,
        english_name: impl Into<String>,
        pattern: LinePattern,
    ) -> BranchingResult<Self> {
        if !(1..=HEXAGRAM_COUNT).contains(&id) {
            return Err(BranchingError::InvalidHexagramId(id));
        }
        Ok(Self {
            id,
            name: name.into(),
            english_name: english_name.into(),
            lines: Self::lines_of(pattern),
        })
    }

    /// Stable lines for a pattern
    pub fn lines_of(pattern: LinePattern) -> [Line; 6] {
        let positions = LinePosition::all();
        [0usize, 1, 2, 3, 4, 5].map(|i| Line::new(positions[i], pattern[i]))
    }

    /// Line values bottom to top
    pub fn pattern(&self) -> LinePattern {
        self.lines.map(|line| line.value)
    }

    /// The line at a position
    pub fn line(&self, position: LinePosition) -> Line {
        self.lines[position.index()]
    }

    /// Lines with the given positions marked as changing
    pub fn marked(&self, changing: &[LinePosition]) -> [Line; 6] {
        self.lines.map(|line| {
            if changing.contains(&line.position) {
                line.marked_changing()
            } else {
                line
            }
        })
    }

    /// Derived (lower, upper) trigram pair
    pub fn trigrams(&self) -> (Trigram, Trigram) {
        let p = self.pattern();
        (
            Trigram::from_lines([p[0], p[1], p[2]]),
            Trigram::from_lines([p[3], p[4], p[5]]),
        )
    }

    /// Element of the upper trigram
    pub fn element(&self) -> FiveElement {
        self.trigrams().1.element()
    }

    /// Correct/incorrect placement counts
    pub fn placement(&self) -> Placement {
        let correct = self
            .lines
            .iter()
            .filter(|line| line.is_correctly_placed())
            .count() as u8;
        Placement {
            correct,
            incorrect: 6 - correct,
        }
    }

    /// Display label such as `#1 Qian (The Creative)`
    pub fn label(&self) -> String {
        format!("#{} {} ({})", self.id, self.name, self.english_name)
    }
}

/// One of the five stages the classical sequence is divided into
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum SequenceStage {
    /// Hexagrams 1-12
    Creation,
    /// Hexagrams 13-24
    Development,
    /// Hexagrams 25-36
    Cultivation,
    /// Hexagrams 37-48
    Relationship,
    /// Hexagrams 49-64
    Transformation,
}

impl SequenceStage {
    /// Stage containing a hexagram id
    pub fn of(id: u8) -> Self {
        match id {
            0..=12 => SequenceStage::Creation,
            13..=24 => SequenceStage::Development,
            25..=36 => SequenceStage::Cultivation,
            37..=48 => SequenceStage::Relationship,
            _ => SequenceStage::Transformation,
        }
    }

    /// Theme of the stage
    pub fn theme(self) -> &'static str {
        match self {
            SequenceStage::Creation => "creation and laying foundations",
            SequenceStage::Development => "development and meeting needs",
            SequenceStage::Cultivation => "cultivation and self-completion",
            SequenceStage::Relationship => "relationship and harmony",
            SequenceStage::Transformation => "transformation and completion",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use LineValue::{Yang, Yin};

    #[test]
    fn line_position_bounds() {
        assert!(LinePosition::new(0).is_err());
        assert!(LinePosition::new(7).is_err());
        assert_eq!(LinePosition::new(6).unwrap().get(), 6);
    }

    #[test]
    fn line_position_advance_wraps() {
        let top = LinePosition::new(6).unwrap();
        assert_eq!(top.advance().get(), 1);
        assert_eq!(LinePosition::new(3).unwrap().advance().get(), 4);
    }

    #[test]
    fn line_position_deserialize_validates() {
        let ok: LinePosition = serde_json::from_str("4").unwrap();
        assert_eq!(ok.get(), 4);
        assert!(serde_json::from_str::<LinePosition>("9").is_err());
    }

    #[test]
    fn trigram_lines_round_trip() {
        for t in Trigram::ALL {
            assert_eq!(Trigram::from_lines(t.lines()), t);
        }
    }

    #[test]
    fn nuclear_takes_middle_lines() {
        let p = [Yang, Yin, Yang, Yin, Yin, Yang];
        assert_eq!(nuclear(&p), [Yin, Yang, Yin, Yang, Yin, Yin]);
    }

    #[test]
    fn with_flipped_only_touches_given_lines() {
        let p = [Yang; 6];
        let positions = [LinePosition::new(2).unwrap(), LinePosition::new(5).unwrap()];
        assert_eq!(
            with_flipped(&p, &positions),
            [Yang, Yin, Yang, Yang, Yin, Yang]
        );
    }

    #[test]
    fn placement_of_after_completion() {
        // Ji Ji: every line in its proper place
        let h = Hexagram::from_lines(
            63,
            "Ji Ji",
            "After Completion",
            compose(Trigram::Fire, Trigram::Water),
        )
        .unwrap();
        assert_eq!(h.placement(), Placement { correct: 6, incorrect: 0 });
        assert_eq!(h.trigrams(), (Trigram::Fire, Trigram::Water));
        assert_eq!(Trigram::Water.image(), '☵');
        assert_eq!(Trigram::Water.name(), "Kan");
    }

    #[test]
    fn hexagram_rejects_bad_id() {
        assert_eq!(
            Hexagram::from_lines(0, "x", "x", [Yin; 6]),
            Err(BranchingError::InvalidHexagramId(0))
        );
    }

    #[test]
    fn marked_sets_changing_flags() {
        let h = Hexagram::from_lines(2, "Kun", "The Receptive", [Yin; 6]).unwrap();
        let marked = h.marked(&[LinePosition::new(1).unwrap()]);
        assert!(marked[0].changing);
        assert!(marked[1..].iter().all(|l| !l.changing));
    }

    #[test]
    fn five_element_cycles_close() {
        for e in [
            FiveElement::Wood,
            FiveElement::Fire,
            FiveElement::Earth,
            FiveElement::Metal,
            FiveElement::Water,
        ] {
            let mut g = e;
            let mut d = e;
            for _ in 0..5 {
                g = g.generates();
                d = d.destroys();
            }
            assert_eq!(g, e);
            assert_eq!(d, e);
            assert_ne!(e.generates(), e.destroys());
        }
    }

    #[test]
    fn element_relations() {
        use FiveElement::*;
        assert_eq!(ElementRelation::between(Wood, Fire), ElementRelation::Generative);
        assert_eq!(ElementRelation::between(Metal, Wood), ElementRelation::Destructive);
        assert_eq!(ElementRelation::between(Earth, Earth), ElementRelation::Same);
        // Fire is fed by Wood, which is not a relation from Fire's side
        assert_eq!(ElementRelation::between(Fire, Wood), ElementRelation::Neutral);
    }

    #[test]
    fn hexagram_element_follows_upper_trigram() {
        let qian = Hexagram::from_lines(1, "Qian", "The Creative", [Yang; 6]).unwrap();
        assert_eq!(qian.element(), FiveElement::Metal);
        let zhun = Hexagram::from_lines(
            3,
            "Zhun",
            "Difficulty at the Beginning",
            compose(Trigram::Thunder, Trigram::Water),
        )
        .unwrap();
        assert_eq!(zhun.element(), FiveElement::Water);
    }

    #[test]
    fn sequence_stages() {
        assert_eq!(SequenceStage::of(1), SequenceStage::Creation);
        assert_eq!(SequenceStage::of(24), SequenceStage::Development);
        assert_eq!(SequenceStage::of(37), SequenceStage::Relationship);
        assert_eq!(SequenceStage::of(64), SequenceStage::Transformation);
    }
}
