//! Tunable calibration constants for feature extraction and score composition.
//!
//! TOML shape (every key optional, missing keys keep the defaults):
//! ```toml
//! [calibration]
//! phrase_weight = 0.8
//! word_weight = 0.4
//! intensifier_factor = 1.4
//! strong_override_factor = 2.0
//! score_floor = 0.05
//! ```

use anyhow::bail;
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct Calibration {
    /// Neutral accumulator start value; positive/negative start at zero.
    pub base_neutral: f64,
    /// Per matched positive/negative phrase.
    pub phrase_weight: f64,
    /// Per matched neutral phrase.
    pub neutral_phrase_weight: f64,
    /// Per positive/negative word occurrence.
    pub word_weight: f64,
    /// Per neutral word occurrence.
    pub neutral_word_weight: f64,
    /// Multiplier for a word occurrence directly preceded by an intensifier.
    pub word_intensifier_factor: f64,
    /// Per distinct strong-indicator word.
    pub strong_weight: f64,
    pub emoji_weight: f64,
    pub excitement_weight: f64,
    /// Character radius around a customer-service mention.
    pub service_window_chars: usize,

    pub intensifier_factor: f64,
    pub diminisher_factor: f64,
    pub diminisher_neutral_factor: f64,
    pub strong_override_factor: f64,
    pub strong_neutral_factor: f64,
    /// Minimum reported score per class.
    pub score_floor: f64,

    /// Distribution returned when nothing scored (or composition failed).
    pub default_positive: f64,
    pub default_negative: f64,
    pub default_neutral: f64,

    /// Feature vector returned when extraction failed.
    pub fallback_positive: f64,
    pub fallback_negative: f64,
    pub fallback_neutral: f64,
}

impl Default for Calibration {
    fn default() -> Self {
        Self {
            base_neutral: 0.3,
            phrase_weight: 0.8,
            neutral_phrase_weight: 0.6,
            word_weight: 0.4,
            neutral_word_weight: 0.3,
            word_intensifier_factor: 1.5,
            strong_weight: 1.0,
            emoji_weight: 0.6,
            excitement_weight: 0.4,
            service_window_chars: 20,

            intensifier_factor: 1.4,
            diminisher_factor: 0.8,
            diminisher_neutral_factor: 1.2,
            strong_override_factor: 2.0,
            strong_neutral_factor: 0.3,
            score_floor: 0.05,

            default_positive: 0.25,
            default_negative: 0.15,
            default_neutral: 0.6,

            fallback_positive: 0.3,
            fallback_negative: 0.3,
            fallback_neutral: 0.4,
        }
    }
}

impl Calibration {
    /// Reject non-finite or negative constants and an unusable floor.
    pub fn validate(&self) -> anyhow::Result<()> {
        let named = [
            ("base_neutral", self.base_neutral),
            ("phrase_weight", self.phrase_weight),
            ("neutral_phrase_weight", self.neutral_phrase_weight),
            ("word_weight", self.word_weight),
            ("neutral_word_weight", self.neutral_word_weight),
            ("word_intensifier_factor", self.word_intensifier_factor),
            ("strong_weight", self.strong_weight),
            ("emoji_weight", self.emoji_weight),
            ("excitement_weight", self.excitement_weight),
            ("intensifier_factor", self.intensifier_factor),
            ("diminisher_factor", self.diminisher_factor),
            ("diminisher_neutral_factor", self.diminisher_neutral_factor),
            ("strong_override_factor", self.strong_override_factor),
            ("strong_neutral_factor", self.strong_neutral_factor),
            ("score_floor", self.score_floor),
            ("default_positive", self.default_positive),
            ("default_negative", self.default_negative),
            ("default_neutral", self.default_neutral),
            ("fallback_positive", self.fallback_positive),
            ("fallback_negative", self.fallback_negative),
            ("fallback_neutral", self.fallback_neutral),
        ];
        for (name, v) in named {
            if !v.is_finite() || v < 0.0 {
                bail!("calibration `{name}` must be a finite, non-negative number (got {v})");
            }
        }
        if self.phrase_weight <= self.word_weight {
            bail!("calibration `phrase_weight` must exceed `word_weight`");
        }
        if self.score_floor * 3.0 >= 1.0 {
            bail!("calibration `score_floor` must be below 1/3");
        }
        let sum = self.default_positive + self.default_negative + self.default_neutral;
        if sum <= 0.0 {
            bail!("calibration default distribution must not be all zero");
        }
        if [self.default_positive, self.default_negative, self.default_neutral]
            .iter()
            .any(|v| v / sum < self.score_floor)
        {
            bail!("calibration default distribution must keep every class at or above `score_floor`");
        }
        Ok(())
    }
}
