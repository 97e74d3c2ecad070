//! # Feature Extractor
//!
//! Scans the normalized tokens and the lower-cased original text against the
//! lexicon and produces raw per-class scores plus boolean signals. Scores only
//! grow during extraction. Strong-indicator weight and contextual rule weight
//! are kept apart from the lexicon scores so the composer's negation swap
//! leaves them alone (the rules already look at negation themselves).
//!
//! The extractor also records a [`FeatureTrace`] (what matched and why) that
//! the explanation builder reads.

use anyhow::ensure;
use metrics::counter;
use serde::Serialize;
use std::collections::BTreeSet;
use tracing::warn;

use super::calibration::Calibration;
use super::normalize::{Marker, NormalizedText};
use super::rules::{matching_rules, BUILTIN_RULES};
use super::text::{preceding_word, word_matches};
use crate::lexicon::LexiconSet;
use crate::sentiment::Sentiment;

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct FeatureVector {
    pub positive_score: f64,
    pub negative_score: f64,
    pub neutral_score: f64,
    pub strong_positive_score: f64,
    pub strong_negative_score: f64,
    /// Added by contextual rules.
    pub context_positive_score: f64,
    pub context_negative_score: f64,
    pub has_negation: bool,
    pub has_intensifier: bool,
    pub has_diminisher: bool,
    pub has_strong_positive: bool,
    pub has_strong_negative: bool,
    pub trace: FeatureTrace,
}

/// What the extractor matched.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct FeatureTrace {
    pub phrases: Vec<(Sentiment, String)>,
    /// Word, class and occurrence count.
    pub words: Vec<(Sentiment, String, usize)>,
    pub strong: Vec<(Sentiment, String)>,
    pub markers: BTreeSet<Marker>,
    pub rules: Vec<&'static str>,
    /// Set when the vector is the fail-soft default.
    pub fallback: bool,
}

impl FeatureVector {
    fn seeded(cal: &Calibration) -> Self {
        Self {
            neutral_score: cal.base_neutral,
            ..Self::default()
        }
    }

    /// Neutral-biased vector used when extraction fails.
    pub fn fallback(cal: &Calibration) -> Self {
        Self {
            positive_score: cal.fallback_positive,
            negative_score: cal.fallback_negative,
            neutral_score: cal.fallback_neutral,
            trace: FeatureTrace {
                fallback: true,
                ..FeatureTrace::default()
            },
            ..Self::default()
        }
    }

    fn add(&mut self, sentiment: Sentiment, delta: f64) {
        match sentiment {
            Sentiment::Positive => self.positive_score += delta,
            Sentiment::Negative => self.negative_score += delta,
            Sentiment::Neutral => self.neutral_score += delta,
        }
    }

    fn add_context(&mut self, sentiment: Sentiment, delta: f64) {
        match sentiment {
            Sentiment::Positive => self.context_positive_score += delta,
            Sentiment::Negative => self.context_negative_score += delta,
            Sentiment::Neutral => self.neutral_score += delta,
        }
    }

    /// Lexicon, strong and context score of a class.
    pub fn total(&self, sentiment: Sentiment) -> f64 {
        match sentiment {
            Sentiment::Positive => {
                self.positive_score + self.strong_positive_score + self.context_positive_score
            }
            Sentiment::Negative => {
                self.negative_score + self.strong_negative_score + self.context_negative_score
            }
            Sentiment::Neutral => self.neutral_score,
        }
    }

    fn all_finite(&self) -> bool {
        [
            self.positive_score,
            self.negative_score,
            self.neutral_score,
            self.strong_positive_score,
            self.strong_negative_score,
            self.context_positive_score,
            self.context_negative_score,
        ]
        .iter()
        .all(|v| v.is_finite())
    }
}

/// Extract features; falls back to [`FeatureVector::fallback`] on failure.
pub fn extract(n: &NormalizedText, lexicon: &LexiconSet, cal: &Calibration) -> FeatureVector {
    match try_extract(n, lexicon, cal) {
        Ok(f) => f,
        Err(e) => {
            warn!(target: "sentiment", error = %e, "feature extraction failed, using default vector");
            counter!("sentiment_fallback_total", "stage" => "extract").increment(1);
            FeatureVector::fallback(cal)
        }
    }
}

pub fn try_extract(
    n: &NormalizedText,
    lexicon: &LexiconSet,
    cal: &Calibration,
) -> anyhow::Result<FeatureVector> {
    let lower = n.original().to_lowercase();
    let mut fv = FeatureVector::seeded(cal);

    // strong indicators: each entry counts once, matched at the start of a
    // word outside any negation scope so inflections ("loved", "wasted") hit
    let plain_words: BTreeSet<&str> = n
        .words()
        .filter(|t| !t.negated)
        .map(|t| t.lower.as_str())
        .collect();
    let starts_plain_word = |entry: &str| plain_words.iter().any(|t| t.starts_with(entry));
    for w in lexicon.strong_positive() {
        if starts_plain_word(w.as_str()) {
            fv.has_strong_positive = true;
            fv.strong_positive_score += cal.strong_weight;
            fv.trace.strong.push((Sentiment::Positive, w.clone()));
        }
    }
    for w in lexicon.strong_negative() {
        if starts_plain_word(w.as_str()) {
            fv.has_strong_negative = true;
            fv.strong_negative_score += cal.strong_weight;
            fv.trace.strong.push((Sentiment::Negative, w.clone()));
        }
    }
    let any_strong = fv.has_strong_positive || fv.has_strong_negative;

    for s in Sentiment::ALL {
        let (phrase_weight, word_weight) = match s {
            Sentiment::Neutral => (cal.neutral_phrase_weight, cal.neutral_word_weight),
            _ => (cal.phrase_weight, cal.word_weight),
        };
        let class = lexicon.class(s);

        for p in &class.phrases {
            if lower.contains(p.as_str()) {
                fv.add(s, phrase_weight);
                fv.trace.phrases.push((s, p.clone()));
            }
        }

        if s == Sentiment::Neutral && any_strong {
            continue;
        }
        for w in &class.words {
            let mut count = 0;
            for idx in word_matches(&lower, w) {
                let boosted = preceding_word(&lower, idx)
                    .is_some_and(|prev| lexicon.intensifiers().contains(prev));
                let factor = if boosted && s != Sentiment::Neutral {
                    cal.word_intensifier_factor
                } else {
                    1.0
                };
                fv.add(s, word_weight * factor);
                count += 1;
            }
            if count > 0 {
                fv.trace.words.push((s, w.clone(), count));
            }
        }
    }

    fv.has_negation = n.has_negation();
    fv.has_intensifier = n.has_intensifier();
    fv.has_diminisher = n.has_diminisher();

    let markers = n.markers();
    for s in Sentiment::ALL {
        if markers.iter().any(|m| m.mood() == Some(s)) {
            fv.add(s, cal.emoji_weight);
        }
    }
    if markers.contains(&Marker::Excitement) {
        let (pos, neg) = (fv.total(Sentiment::Positive), fv.total(Sentiment::Negative));
        if pos > neg {
            fv.add(Sentiment::Positive, cal.excitement_weight);
        } else if neg > pos {
            fv.add(Sentiment::Negative, cal.excitement_weight);
        }
    }
    fv.trace.markers = markers;

    for r in matching_rules(&lower, fv.has_negation, cal.service_window_chars, BUILTIN_RULES) {
        fv.add_context(r.then.add_to, r.then.delta);
        fv.trace.rules.push(r.name);
    }

    ensure!(fv.all_finite(), "non-finite feature score");
    Ok(fv)
}
