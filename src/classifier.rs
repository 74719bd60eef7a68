// Copyright 2025 Cowboy AI, LLC.

//! Situation classifier: maps concern signals to situation profiles
//!
//! A pure, deterministic mapping from pre-extracted [`ConcernSignal`] evidence
//! to a [`SituationProfile`]. Each axis is decided by a fixed priority table;
//! anything unmatched falls back to the default profile
//! (Medium, Medium, general, Personal). Classification never fails.

use std::collections::BTreeSet;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::signal::{ConcernSignal, ConcernTopic, Valence};
use crate::situation::{Importance, Scope, SituationNature, SituationProfile, Urgency};

const HIGH_URGENCY: &[&str] = &[
    "urgent", "immediately", "now", "asap", "deadline", "emergency", "crisis", "today",
    "tonight", "tomorrow", "緊急", "今すぐ", "至急",
];

const LOW_URGENCY: &[&str] = &[
    "someday", "eventually", "gradually", "long-term", "future", "slowly", "いつか", "将来",
];

const HIGH_IMPORTANCE: &[&str] = &[
    "life", "career", "marriage", "divorce", "family", "critical", "important", "serious",
    "everything", "人生", "結婚", "転職",
];

const LOW_IMPORTANCE: &[&str] = &["minor", "small", "trivial", "little", "slight", "ちょっと"];

const SYSTEMIC_SCOPE: &[&str] = &[
    "company", "organization", "society", "community", "team", "department", "industry",
    "会社", "社会", "組織",
];

const INTERPERSONAL_SCOPE: &[&str] = &[
    "partner", "friend", "family", "boss", "colleague", "spouse", "parent", "child",
    "husband", "wife", "上司", "友人", "家族",
];

const NATURE_KEYWORDS: &[(SituationNature, &[&str])] = &[
    (
        SituationNature::Decision,
        &["decide", "decision", "choose", "choice", "option", "迷い", "決断"],
    ),
    (
        SituationNature::Relationship,
        &["relationship", "conflict", "argument", "friend", "partner", "人間関係"],
    ),
    (
        SituationNature::Anxiety,
        &["anxious", "anxiety", "worried", "worry", "afraid", "fear", "不安"],
    ),
    (
        SituationNature::Confusion,
        &["confused", "confusion", "lost", "unsure", "unclear", "混乱"],
    ),
    (SituationNature::Growth, &["grow", "growth", "learn", "improve", "develop", "成長"]),
    (SituationNature::Work, &["work", "job", "career", "promotion", "仕事"]),
    (SituationNature::Love, &["love", "dating", "romance", "crush", "恋愛"]),
    (SituationNature::Health, &["health", "sick", "illness", "tired", "健康"]),
];

/// Negative emotion at or above this intensity raises urgency to High
const DISTRESS_INTENSITY: f64 = 0.8;

/// Profile plus the rules that produced it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Classification {
    /// The classified profile
    pub profile: SituationProfile,
    /// Labels of the rules that fired; empty when the default profile was used
    pub evidence: Vec<String>,
}

impl Classification {
    /// True when no rule fired and the profile is the default one
    pub fn is_default(&self) -> bool {
        self.evidence.is_empty()
    }
}

/// Deterministic keyword/topic classifier
#[derive(Debug, Default, Clone)]
pub struct SituationClassifier;

impl SituationClassifier {
    /// Create a classifier
    pub fn new() -> Self {
        Self
    }

    /// Classify a signal into a profile
    pub fn classify(&self, signal: &ConcernSignal) -> SituationProfile {
        self.classify_detailed(signal).profile
    }

    /// Classify a signal, recording which rules fired
    pub fn classify_detailed(&self, signal: &ConcernSignal) -> Classification {
        let words = normalize(&signal.keywords);
        let mut evidence = Vec::new();

        let urgency = if let Some(k) = first_hit(&words, HIGH_URGENCY) {
            evidence.push(format!("urgency:high:{k}"));
            Urgency::High
        } else if signal.valence == Valence::Negative && signal.intensity >= DISTRESS_INTENSITY {
            evidence.push("urgency:high:distress".to_string());
            Urgency::High
        } else if let Some(k) = first_hit(&words, LOW_URGENCY) {
            evidence.push(format!("urgency:low:{k}"));
            Urgency::Low
        } else {
            Urgency::Medium
        };

        let importance = if let Some(k) = first_hit(&words, HIGH_IMPORTANCE) {
            evidence.push(format!("importance:high:{k}"));
            Importance::High
        } else if signal.topics.contains(&ConcernTopic::Health) {
            evidence.push("importance:high:health".to_string());
            Importance::High
        } else if let Some(k) = first_hit(&words, LOW_IMPORTANCE) {
            evidence.push(format!("importance:low:{k}"));
            Importance::Low
        } else {
            Importance::Medium
        };

        let natures = matched_natures(signal, &words);
        let mut ranked = SituationNature::PRIORITY
            .into_iter()
            .filter(|n| natures.contains(n));
        let nature = ranked.next().unwrap_or_default();
        let secondary_nature = ranked.next();
        if nature != SituationNature::General {
            evidence.push(format!("nature:{nature:?}").to_lowercase());
        }

        let scope = if let Some(k) = first_hit(&words, SYSTEMIC_SCOPE) {
            evidence.push(format!("scope:systemic:{k}"));
            Scope::Systemic
        } else if let Some(k) = first_hit(&words, INTERPERSONAL_SCOPE) {
            evidence.push(format!("scope:interpersonal:{k}"));
            Scope::Interpersonal
        } else if natures.contains(&SituationNature::Relationship)
            || natures.contains(&SituationNature::Love)
        {
            evidence.push("scope:interpersonal:nature".to_string());
            Scope::Interpersonal
        } else {
            Scope::Personal
        };

        let profile = SituationProfile {
            urgency,
            importance,
            nature,
            secondary_nature,
            scope,
        };
        debug!(?profile, ?evidence, "classified concern signal");

        Classification { profile, evidence }
    }
}

fn topic_nature(topic: ConcernTopic) -> SituationNature {
    match topic {
        ConcernTopic::Decision => SituationNature::Decision,
        ConcernTopic::Relationship => SituationNature::Relationship,
        ConcernTopic::Anxiety => SituationNature::Anxiety,
        ConcernTopic::Confusion => SituationNature::Confusion,
        ConcernTopic::Growth => SituationNature::Growth,
        ConcernTopic::Work => SituationNature::Work,
        ConcernTopic::Love => SituationNature::Love,
        ConcernTopic::Health => SituationNature::Health,
    }
}

fn matched_natures(signal: &ConcernSignal, words: &[String]) -> BTreeSet<SituationNature> {
    let mut natures: BTreeSet<SituationNature> =
        signal.topics.iter().copied().map(topic_nature).collect();
    for (nature, table) in NATURE_KEYWORDS {
        if first_hit(words, table).is_some() {
            natures.insert(*nature);
        }
    }
    natures
}

/// Lowercased, trimmed, non-empty keywords
fn normalize(keywords: &[String]) -> Vec<String> {
    keywords
        .iter()
        .map(|k| k.trim().to_lowercase())
        .filter(|k| !k.is_empty())
        .collect()
}

/// First table entry matched by any keyword.
///
/// ASCII entries match whole words; other entries match as substrings since
/// CJK text carries no word boundaries.
fn first_hit(words: &[String], table: &[&'static str]) -> Option<&'static str> {
    table.iter().copied().find(|&entry| {
        words.iter().any(|word| {
            if entry.is_ascii() {
                word == entry
                    || word
                        .split(|c: char| !(c.is_alphanumeric() || c == '-'))
                        .any(|token| token == entry)
            } else {
                word.contains(entry)
            }
        })
    })
}
