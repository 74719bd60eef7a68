// Copyright 2025 Cowboy AI, LLC.

//! The branching pipeline
//!
//! ```text
//! ConcernSignal -> SituationClassifier -> SituationProfile
//!               -> PatternSelector     -> [TransformationPattern]
//!               -> analyzers           -> [BranchCandidate]
//!               -> WeightingEngine     -> [WeightedCandidate]
//!               -> ResultSynthesizer   -> RankedResult
//! ```
//!
//! The pipeline is synchronous and holds no state between requests. The
//! only collaborator is the injected [`HexagramRepository`], which is
//! read-only and may be shared across threads.

use std::sync::Arc;

use schemars::schema::RootSchema;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::analyzers;
use crate::classifier::SituationClassifier;
use crate::config::EngineConfig;
use crate::errors::BranchingResult;
use crate::repository::{ClassicalHexagramRepository, HexagramRepository};
use crate::selector::{PatternSelector, UserProfile};
use crate::signal::ConcernSignal;
use crate::situation::SituationProfile;
use crate::synthesis::{AnalysisMetadata, Diagnostic, RankedResult, ResultSynthesizer};
use crate::weighting::{is_degenerate, WeightingEngine};

/// One analysis request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct AnalyzeRequest {
    /// Pre-extracted features of the concern
    pub concern_signal: ConcernSignal,
    /// Hexagram the analysis starts from (1..=64)
    pub base_hexagram_id: u8,
    /// Optional information about the person asking
    #[serde(default)]
    pub user_profile: Option<UserProfile>,
}

impl AnalyzeRequest {
    /// Request starting from an explicit base hexagram
    pub fn new(concern_signal: ConcernSignal, base_hexagram_id: u8) -> Self {
        Self {
            concern_signal,
            base_hexagram_id,
            user_profile: None,
        }
    }

    /// Request whose base hexagram is suggested by the concern's nature
    pub fn from_signal(concern_signal: ConcernSignal) -> Self {
        let nature = SituationClassifier::new().classify(&concern_signal).nature;
        Self::new(concern_signal, nature.suggested_base_hexagram())
    }

    /// Attach a user profile
    pub fn with_user(mut self, user: UserProfile) -> Self {
        self.user_profile = Some(user);
        self
    }
}

/// Runs the full classification, selection, analysis, weighting and
/// synthesis pipeline
#[derive(Clone)]
pub struct BranchingEngine {
    repository: Arc<dyn HexagramRepository>,
    config: EngineConfig,
    classifier: SituationClassifier,
    selector: PatternSelector,
    weighting: WeightingEngine,
    synthesizer: ResultSynthesizer,
}

impl std::fmt::Debug for BranchingEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BranchingEngine")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl Default for BranchingEngine {
    fn default() -> Self {
        Self::new(Arc::new(ClassicalHexagramRepository::new()))
    }
}

impl BranchingEngine {
    /// Engine with default configuration
    pub fn new(repository: Arc<dyn HexagramRepository>) -> Self {
        Self::build(repository, EngineConfig::default())
    }

    /// Engine with a validated configuration
    pub fn with_config(
        repository: Arc<dyn HexagramRepository>,
        config: EngineConfig,
    ) -> BranchingResult<Self> {
        config.validate()?;
        Ok(Self::build(repository, config))
    }

    fn build(repository: Arc<dyn HexagramRepository>, config: EngineConfig) -> Self {
        Self {
            repository,
            synthesizer: ResultSynthesizer::from_config(&config),
            config,
            classifier: SituationClassifier::new(),
            selector: PatternSelector::new(),
            weighting: WeightingEngine::new(),
        }
    }

    /// Active configuration
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Analyze a request. Never fails; problems show up as diagnostics and
    /// low confidence.
    pub fn analyze(&self, request: &AnalyzeRequest) -> RankedResult {
        let classification = self.classifier.classify_detailed(&request.concern_signal);
        let mut diagnostics = Vec::new();
        if classification.is_default() {
            debug!("no classification rule matched, using default profile");
            diagnostics.push(Diagnostic::ClassificationDefault);
        }
        self.run(
            request.base_hexagram_id,
            classification.profile,
            request.user_profile.as_ref(),
            diagnostics,
        )
    }

    /// Analyze an already classified situation
    pub fn analyze_profile(
        &self,
        base_hexagram_id: u8,
        profile: SituationProfile,
        user: Option<&UserProfile>,
    ) -> RankedResult {
        self.run(base_hexagram_id, profile, user, Vec::new())
    }

    fn run(
        &self,
        base_hexagram_id: u8,
        profile: SituationProfile,
        user: Option<&UserProfile>,
        mut diagnostics: Vec<Diagnostic>,
    ) -> RankedResult {
        let fallback_user = self.config.default_experience.map(UserProfile::new);
        let user = user.or(fallback_user.as_ref());
        let selected = self.selector.select(&profile, user);
        let mut metadata = AnalysisMetadata::new(base_hexagram_id, profile, selected.clone());

        let base = match self.repository.get_hexagram(base_hexagram_id) {
            Ok(base) => base,
            Err(err) => {
                warn!(base_hexagram_id, error = %err, "base hexagram lookup failed");
                diagnostics.push(Diagnostic::RepositoryLookupMiss {
                    pattern: None,
                    detail: err.to_string(),
                });
                metadata.diagnostics = diagnostics;
                return RankedResult::empty(metadata);
            }
        };

        let mut candidates = Vec::new();
        for &pattern in &selected {
            match analyzers::try_analyze(pattern, &base, &profile, self.repository.as_ref()) {
                Ok(found) => {
                    debug!(?pattern, count = found.len(), "pattern analyzed");
                    candidates.extend(found);
                }
                Err(err) => {
                    warn!(?pattern, error = %err, "pattern produced no candidates");
                    diagnostics.push(Diagnostic::RepositoryLookupMiss {
                        pattern: Some(pattern),
                        detail: err.to_string(),
                    });
                }
            }
        }

        let weighted = self.weighting.weight(candidates, &profile);
        if is_degenerate(&weighted) {
            diagnostics.push(Diagnostic::DegenerateWeighting {
                candidates: weighted.len(),
            });
        }

        metadata.diagnostics = diagnostics;
        let result = self.synthesizer.synthesize(weighted, &selected, metadata);
        info!(
            analysis_id = %result.metadata.analysis_id,
            base_hexagram_id,
            candidates = result.candidates.len(),
            confidence = result.overall_confidence,
            "analysis complete"
        );
        result
    }
}

/// JSON schema of [`RankedResult`]
pub fn result_schema() -> RootSchema {
    schemars::schema_for!(RankedResult)
}
