// Copyright 2025 Cowboy AI, LLC.

//! Pre-extracted concern features
//!
//! Text analysis happens upstream; this crate only consumes its output.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Overall emotional tone detected in the concern
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum Valence {
    /// Hopeful or upbeat
    Positive,
    /// No clear tone
    #[default]
    Neutral,
    /// Worried, sad or upset
    Negative,
}

/// Topic tags emitted by the upstream extractor
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum ConcernTopic {
    /// Choosing between options
    Decision,
    /// Other people
    Relationship,
    /// Worry
    Anxiety,
    /// Uncertainty about the situation
    Confusion,
    /// Self-development
    Growth,
    /// Job and career
    Work,
    /// Romance
    Love,
    /// Wellbeing
    Health,
}

/// Classified features of a user's concern
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ConcernSignal {
    /// Extracted keywords, in any case
    #[serde(default)]
    pub keywords: Vec<String>,
    /// Detected emotional tone
    #[serde(default)]
    pub valence: Valence,
    /// Strength of the detected emotion (0..1)
    #[serde(default)]
    pub intensity: f64,
    /// Topic tags
    #[serde(default)]
    pub topics: BTreeSet<ConcernTopic>,
}

impl ConcernSignal {
    /// An empty signal
    pub fn new() -> Self {
        Self::default()
    }

    /// Add keywords
    pub fn with_keywords<I, S>(mut self, keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.keywords.extend(keywords.into_iter().map(Into::into));
        self
    }

    /// Add a topic tag
    pub fn with_topic(mut self, topic: ConcernTopic) -> Self {
        self.topics.insert(topic);
        self
    }

    /// Set the emotional tone and its intensity (clamped to 0..1)
    pub fn with_emotion(mut self, valence: Valence, intensity: f64) -> Self {
        self.valence = valence;
        self.intensity = if intensity.is_finite() {
            intensity.clamp(0.0, 1.0)
        } else {
            0.0
        };
        self
    }

    /// True when the signal carries no evidence at all
    pub fn is_empty(&self) -> bool {
        self.keywords.iter().all(|k| k.trim().is_empty())
            && self.topics.is_empty()
            && self.valence == Valence::Neutral
    }
}
