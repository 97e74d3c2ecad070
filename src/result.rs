//! result.rs — analysis records returned to the dashboard and kept in the store.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use crate::sentiment::{ScoreEntry, Sentiment};

/// Where a result came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Source {
    #[serde(rename = "Direct Input")]
    DirectInput,
    #[serde(rename = "Batch Analysis")]
    BatchAnalysis,
    #[serde(rename = "File Upload")]
    FileUpload,
    /// Item that failed validation inside a batch.
    #[serde(rename = "Fallback Analysis")]
    FallbackAnalysis,
}

impl Source {
    pub fn as_str(self) -> &'static str {
        match self {
            Source::DirectInput => "Direct Input",
            Source::BatchAnalysis => "Batch Analysis",
            Source::FileUpload => "File Upload",
            Source::FallbackAnalysis => "Fallback Analysis",
        }
    }
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One classified text. Immutable once built.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SentimentResult {
    pub id: Uuid,
    pub text: String,
    pub sentiment: Sentiment,
    /// Score of the top-ranked class, in `[0, 1]`.
    pub confidence: f64,
    pub keywords: Vec<String>,
    pub timestamp: DateTime<Utc>,
    pub source: Source,
}

impl SentimentResult {
    pub fn new(text: impl Into<String>, top: ScoreEntry, keywords: Vec<String>, source: Source) -> Self {
        Self {
            id: Uuid::new_v4(),
            text: text.into(),
            sentiment: top.sentiment,
            confidence: top.score,
            keywords,
            timestamp: Utc::now(),
            source,
        }
    }

    /// Placeholder for a batch item that could not be analyzed.
    pub fn fallback(text: impl Into<String>) -> Self {
        Self::new(
            text,
            ScoreEntry {
                sentiment: Sentiment::Neutral,
                score: 0.5,
            },
            Vec::new(),
            Source::FallbackAnalysis,
        )
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BatchSummary {
    pub total: usize,
    pub positive: usize,
    pub negative: usize,
    pub neutral: usize,
    pub average_confidence: f64,
}

impl BatchSummary {
    pub fn from_results(results: &[SentimentResult]) -> Self {
        let mut s = BatchSummary {
            total: results.len(),
            ..Default::default()
        };
        for r in results {
            match r.sentiment {
                Sentiment::Positive => s.positive += 1,
                Sentiment::Negative => s.negative += 1,
                Sentiment::Neutral => s.neutral += 1,
            }
        }
        if !results.is_empty() {
            s.average_confidence =
                results.iter().map(|r| r.confidence).sum::<f64>() / results.len() as f64;
        }
        s
    }

    pub fn count(&self, sentiment: Sentiment) -> usize {
        match sentiment {
            Sentiment::Positive => self.positive,
            Sentiment::Negative => self.negative,
            Sentiment::Neutral => self.neutral,
        }
    }
}

/// Batch item that failed validation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchItemError {
    pub index: usize,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchAnalysisResult {
    pub id: Uuid,
    pub results: Vec<SentimentResult>,
    pub summary: BatchSummary,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<BatchItemError>,
    pub timestamp: DateTime<Utc>,
}

impl BatchAnalysisResult {
    pub fn new(results: Vec<SentimentResult>, errors: Vec<BatchItemError>) -> Self {
        Self {
            id: Uuid::new_v4(),
            summary: BatchSummary::from_results(&results),
            results,
            errors,
            timestamp: Utc::now(),
        }
    }
}
