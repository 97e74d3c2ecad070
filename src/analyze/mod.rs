// src/analyze/mod.rs
//! Analysis pipeline entry: normalize -> extract features -> compose scores,
//! plus keyword extraction over the same lexicon.

pub mod calibration;
pub mod debug;
pub mod features;
pub mod keywords;
pub mod normalize;
pub mod rules;
pub mod scoring;
pub(crate) mod text;

use serde::Serialize;
use std::sync::Arc;
use tracing::debug;

use crate::debug::{anon_hash, dev_logging_enabled};
use crate::lexicon::LexiconSet;
use crate::sentiment::{ScoreDistribution, Sentiment};

// Re-export convenient types.
pub use crate::analyze::calibration::Calibration;
pub use crate::analyze::features::{FeatureTrace, FeatureVector};
pub use crate::analyze::normalize::{Marker, Modifier, NormalizedText, Token, TokenKind};

/// Everything one pass of the engine produced.
#[derive(Debug, Clone, Serialize)]
pub struct Analysis {
    pub normalized: NormalizedText,
    pub features: FeatureVector,
    pub distribution: ScoreDistribution,
}

/// The heuristic sentiment engine. Cheap to clone; the lexicon is shared.
#[derive(Debug, Clone)]
pub struct SentimentEngine {
    lexicon: Arc<LexiconSet>,
    calibration: Calibration,
}

impl SentimentEngine {
    pub fn new(lexicon: Arc<LexiconSet>, calibration: Calibration) -> Self {
        Self {
            lexicon,
            calibration,
        }
    }

    /// Built-in lexicon and default calibration.
    pub fn builtin() -> Self {
        Self::new(Arc::new(LexiconSet::builtin()), Calibration::default())
    }

    pub fn lexicon(&self) -> &LexiconSet {
        &self.lexicon
    }

    pub fn calibration(&self) -> &Calibration {
        &self.calibration
    }

    pub fn normalize(&self, text: &str) -> NormalizedText {
        normalize::normalize(text, &self.lexicon)
    }

    /// Full pass with intermediate results.
    pub fn analyze(&self, text: &str) -> Analysis {
        let normalized = self.normalize(text);
        let features = features::extract(&normalized, &self.lexicon, &self.calibration);
        let distribution = scoring::compose(&features, &self.calibration);

        if dev_logging_enabled() {
            let top = distribution.top();
            debug!(
                target: "sentiment",
                id = %anon_hash(normalized.original()),
                tokens = normalized.tokens().len(),
                negation = features.has_negation,
                strong_pos = features.has_strong_positive,
                strong_neg = features.has_strong_negative,
                rules = ?features.trace.rules,
                top = %top.sentiment,
                score = top.score,
                "analyzed"
            );
        }

        Analysis {
            normalized,
            features,
            distribution,
        }
    }

    /// Ranked distribution for `text`. Total for any input.
    pub fn analyze_sentiment(&self, text: &str) -> ScoreDistribution {
        self.analyze(text).distribution
    }

    /// Up to [`keywords::MAX_KEYWORDS`] salient tokens for `sentiment`.
    pub fn extract_keywords(&self, text: &str, sentiment: Sentiment) -> Vec<String> {
        keywords::extract_keywords(&self.normalize(text), &self.lexicon, sentiment)
    }
}

impl Default for SentimentEngine {
    fn default() -> Self {
        Self::builtin()
    }
}
