// Copyright 2025 Cowboy AI, LLC.

//! # Hexagram Branching
//!
//! Adaptive transformation and branching engine for I Ching hexagrams.
//!
//! Given pre-extracted features of a user's concern and a base hexagram, the
//! engine derives a ranked set of possible future branches:
//! - **Classification**: concern signal to situation profile (urgency, importance, nature, scope)
//! - **Selection**: which of the seven classical transformation patterns apply
//! - **Analysis**: one pure strategy per pattern producing branch candidates
//! - **Weighting**: orthodoxy, urgency fit and nature alignment, renormalized per batch
//! - **Synthesis**: ranking, overall confidence and recommendations
//!
//! ## Design Principles
//!
//! 1. **Deterministic**: identical input yields identical ranking
//! 2. **Never fails**: lookup misses and degenerate batches become diagnostics
//! 3. **Injected data**: hexagram facts come from a [`HexagramRepository`]
//! 4. **Immutable values**: hexagrams, lines and profiles are never mutated
//!
//! ```
//! use hexagram_branching::{AnalyzeRequest, BranchingEngine, ConcernSignal, ConcernTopic};
//!
//! let engine = BranchingEngine::default();
//! let signal = ConcernSignal::new()
//!     .with_keywords(["deadline", "career"])
//!     .with_topic(ConcernTopic::Decision);
//! let result = engine.analyze(&AnalyzeRequest::new(signal, 1));
//! assert!(result.primary_recommendation.is_some());
//! ```

#![warn(missing_docs)]

pub mod analyzers;
pub mod candidate;
pub mod classifier;
pub mod config;
pub mod engine;
pub mod errors;
pub mod hexagram;
pub mod pattern;
pub mod repository;
pub mod selector;
pub mod signal;
pub mod situation;
pub mod synthesis;
pub mod weighting;

pub use candidate::{BranchCandidate, LineTransition, Timeframe, WeightedCandidate};
pub use classifier::{Classification, SituationClassifier};
pub use config::EngineConfig;
pub use engine::{result_schema, AnalyzeRequest, BranchingEngine};
pub use errors::{BranchingError, BranchingResult};
pub use hexagram::{
    ElementRelation, FiveElement, Hexagram, LifeStage, Line, LinePattern, LinePosition, LineValue,
    Placement, SequenceStage, Trigram,
};
pub use pattern::{Applicability, Complexity, TransformationPattern, UrgencyBand};
pub use repository::{ClassicalHexagramRepository, HexagramRepository, OrthodoxyMetadata};
pub use selector::{ExperienceLevel, PatternSelector, UserProfile};
pub use signal::{ConcernSignal, ConcernTopic, Valence};
pub use situation::{Importance, Scope, SituationNature, SituationProfile, Urgency};
pub use synthesis::{AnalysisMetadata, Diagnostic, RankedResult, Recommendation, ResultSynthesizer};
pub use weighting::WeightingEngine;
