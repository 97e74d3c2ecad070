//! Dashboard-facing analysis service: validation, engine call, keywords,
//! result records, metrics and the result store.

use serde::Serialize;
use std::time::Instant;
use thiserror::Error;
use tracing::debug;

use crate::analyze::{Analysis, SentimentEngine};
use crate::config::{EngineConfig, Limits};
use crate::history::ResultStore;
use crate::metrics;
use crate::result::{BatchAnalysisResult, BatchItemError, SentimentResult, Source};
use crate::sentiment::ScoreDistribution;
use crate::validate::{validate_text, ValidationError};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BatchError {
    #[error("Batch analysis requires at least one text")]
    Empty,
    #[error("Batch size too large. Maximum {max} texts allowed")]
    TooLarge { max: usize },
}

/// A stored result plus the full distribution it was derived from.
#[derive(Debug, Clone, Serialize)]
pub struct Analyzed {
    pub result: SentimentResult,
    pub distribution: ScoreDistribution,
}

#[derive(Debug)]
pub struct SentimentService {
    engine: SentimentEngine,
    limits: Limits,
    store: ResultStore,
}

impl SentimentService {
    pub fn new(engine: SentimentEngine, limits: Limits) -> Self {
        Self {
            store: ResultStore::with_capacity(limits.history_capacity),
            engine,
            limits,
        }
    }

    pub fn from_config(cfg: &EngineConfig) -> anyhow::Result<Self> {
        Ok(Self::new(cfg.build_engine()?, cfg.limits))
    }

    pub fn engine(&self) -> &SentimentEngine {
        &self.engine
    }

    pub fn limits(&self) -> &Limits {
        &self.limits
    }

    pub fn store(&self) -> &ResultStore {
        &self.store
    }

    /// Validate and analyze without touching the store.
    pub fn evaluate(&self, text: &str, source: Source) -> Result<(SentimentResult, Analysis), ValidationError> {
        if let Err(e) = validate_text(text, &self.limits) {
            metrics::record_validation_reject();
            return Err(e);
        }
        let started = Instant::now();
        let text = text.trim();
        let analysis = self.engine.analyze(text);
        let top = analysis.distribution.top();
        let keywords = self.engine.extract_keywords(text, top.sentiment);
        metrics::record_analysis(top.sentiment, started.elapsed().as_secs_f64() * 1000.0);

        Ok((SentimentResult::new(text, top, keywords, source), analysis))
    }

    /// Analyze one text and keep the result.
    pub fn analyze(&self, text: &str, source: Source) -> Result<Analyzed, ValidationError> {
        let (result, analysis) = self.evaluate(text, source)?;
        let stored = self.store.push(result.clone());
        metrics::set_history_size(stored);
        Ok(Analyzed {
            result,
            distribution: analysis.distribution,
        })
    }

    /// Analyze every text independently, in order. Invalid items become
    /// neutral fallback results and are listed in `errors`.
    pub fn analyze_batch<S: AsRef<str>>(&self, texts: &[S], source: Source) -> Result<BatchAnalysisResult, BatchError> {
        if texts.is_empty() {
            return Err(BatchError::Empty);
        }
        if texts.len() > self.limits.max_batch {
            return Err(BatchError::TooLarge {
                max: self.limits.max_batch,
            });
        }

        let mut results = Vec::with_capacity(texts.len());
        let mut errors = Vec::new();
        for (index, text) in texts.iter().enumerate() {
            match self.evaluate(text.as_ref(), source) {
                Ok((r, _)) => results.push(r),
                Err(e) => {
                    errors.push(BatchItemError {
                        index,
                        message: e.to_string(),
                    });
                    results.push(SentimentResult::fallback(text.as_ref().trim()));
                }
            }
        }
        metrics::record_batch_items(texts.len());

        let batch = BatchAnalysisResult::new(results, errors);
        let stored = self.store.extend(batch.results.iter().cloned());
        metrics::set_history_size(stored);
        debug!(
            target: "sentiment",
            items = batch.summary.total,
            errors = batch.errors.len(),
            "batch analyzed"
        );
        Ok(batch)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sentiment::Sentiment;

    fn service() -> SentimentService {
        SentimentService::new(SentimentEngine::builtin(), Limits::default())
    }

    #[test]
    fn analyze_stores_trimmed_result() {
        let svc = service();
        let a = svc.analyze("  Love it!  ", Source::DirectInput).unwrap();
        assert_eq!(a.result.text, "Love it!");
        assert_eq!(a.result.sentiment, Sentiment::Positive);
        assert_eq!(a.result.confidence, a.distribution.top().score);
        assert!(a.result.keywords.contains(&"love".to_string()));
        assert_eq!(svc.store().len(), 1);
    }

    #[test]
    fn invalid_text_is_rejected_and_not_stored() {
        let svc = service();
        assert_eq!(svc.analyze("  ", Source::DirectInput).unwrap_err(), ValidationError::Empty);
        assert!(svc.store().is_empty());
    }

    #[test]
    fn batch_keeps_order_and_reports_bad_items() {
        let svc = service();
        let texts = ["I hate this", "no", "It is okay I guess"];
        let b = svc.analyze_batch(&texts, Source::BatchAnalysis).unwrap();
        assert_eq!(b.results.len(), 3);
        assert_eq!(b.results[0].sentiment, Sentiment::Negative);
        assert_eq!(b.results[1].source, Source::FallbackAnalysis);
        assert_eq!(b.results[1].sentiment, Sentiment::Neutral);
        assert_eq!(b.errors.len(), 1);
        assert_eq!(b.errors[0].index, 1);
        assert_eq!(b.summary.total, 3);
        assert_eq!(svc.store().len(), 3);
    }

    #[test]
    fn batch_size_limits() {
        let svc = service();
        let empty: [&str; 0] = [];
        assert_eq!(svc.analyze_batch(&empty, Source::BatchAnalysis).unwrap_err(), BatchError::Empty);
        let many = vec!["fine text"; 101];
        assert_eq!(
            svc.analyze_batch(many.as_slice(), Source::BatchAnalysis).unwrap_err(),
            BatchError::TooLarge { max: 100 }
        );
    }
}
