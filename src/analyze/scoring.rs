//! # Score Composer
//!
//! Turns a [`FeatureVector`] into the ranked three-entry distribution:
//! 1. negation swaps the positive/negative lexicon scores (strong and
//!    context weight are added after the swap);
//! 2. an intensifier amplifies whichever of positive/negative leads;
//! 3. a diminisher damps positive/negative and lifts neutral;
//! 4. a one-sided strong indicator doubles its class and suppresses neutral;
//! 5. normalize (all-zero gives the default distribution);
//! 6. floor: `p' = floor + (1 - 3 * floor) * p`, which keeps every class at
//!    or above the floor and the sum at exactly 1;
//! 7. sort descending, ties positive > negative > neutral.
//!
//! Composition never fails from the caller's view: non-finite arithmetic
//! yields the default distribution.

use metrics::counter;
use tracing::warn;

use super::calibration::Calibration;
use super::features::FeatureVector;
use crate::sentiment::ScoreDistribution;

/// Normalized default distribution (neutral-dominant).
pub fn default_distribution(cal: &Calibration) -> ScoreDistribution {
    let sum = cal.default_positive + cal.default_negative + cal.default_neutral;
    ScoreDistribution::from_scores(
        cal.default_positive / sum,
        cal.default_negative / sum,
        cal.default_neutral / sum,
    )
}

pub fn compose(f: &FeatureVector, cal: &Calibration) -> ScoreDistribution {
    match try_compose(f, cal) {
        Some(d) => d,
        None => {
            warn!(target: "sentiment", "score composition produced non-finite values, using default distribution");
            counter!("sentiment_fallback_total", "stage" => "compose").increment(1);
            default_distribution(cal)
        }
    }
}

/// `None` when the arithmetic leaves the finite, non-negative range.
pub fn try_compose(f: &FeatureVector, cal: &Calibration) -> Option<ScoreDistribution> {
    let (mut pos, mut neg, mut neu) = (f.positive_score, f.negative_score, f.neutral_score);

    if f.has_negation {
        std::mem::swap(&mut pos, &mut neg);
    }
    pos += f.strong_positive_score + f.context_positive_score;
    neg += f.strong_negative_score + f.context_negative_score;

    if f.has_intensifier {
        if pos > neg {
            pos *= cal.intensifier_factor;
        } else if neg > pos {
            neg *= cal.intensifier_factor;
        }
    }

    if f.has_diminisher {
        pos *= cal.diminisher_factor;
        neg *= cal.diminisher_factor;
        neu *= cal.diminisher_neutral_factor;
    }

    match (f.has_strong_positive, f.has_strong_negative) {
        (true, false) => {
            pos *= cal.strong_override_factor;
            neu *= cal.strong_neutral_factor;
        }
        (false, true) => {
            neg *= cal.strong_override_factor;
            neu *= cal.strong_neutral_factor;
        }
        _ => {}
    }

    let scores = [pos, neg, neu];
    if scores.iter().any(|v| !v.is_finite() || *v < 0.0) {
        return None;
    }
    let total: f64 = scores.iter().sum();
    if !total.is_finite() {
        return None;
    }
    if total == 0.0 {
        return Some(default_distribution(cal));
    }

    let floor = cal.score_floor;
    let span = 1.0 - 3.0 * floor;
    let [p, n, u] = scores.map(|v| floor + span * (v / total));
    Some(ScoreDistribution::from_scores(p, n, u))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sentiment::Sentiment;

    fn fv(pos: f64, neg: f64, neu: f64) -> FeatureVector {
        FeatureVector {
            positive_score: pos,
            negative_score: neg,
            neutral_score: neu,
            ..FeatureVector::default()
        }
    }

    #[test]
    fn floor_holds_and_sum_is_one() {
        let d = compose(&fv(10.0, 0.0, 0.0), &Calibration::default());
        assert!((d.sum() - 1.0).abs() < 1e-9);
        for e in d.entries() {
            assert!(e.score >= 0.05 - 1e-12, "{e:?}");
        }
        assert_eq!(d.top().sentiment, Sentiment::Positive);
        assert!((d.top().score - 0.9).abs() < 1e-9);
    }

    #[test]
    fn negation_swaps_lexicon_but_not_strong_scores() {
        let mut f = fv(0.8, 0.0, 0.3);
        f.has_negation = true;
        let d = compose(&f, &Calibration::default());
        assert_eq!(d.top().sentiment, Sentiment::Negative);

        let mut f = fv(0.4, 0.4, 0.3);
        f.has_negation = true;
        f.has_strong_negative = true;
        f.strong_negative_score = 1.0;
        let d = compose(&f, &Calibration::default());
        assert_eq!(d.top().sentiment, Sentiment::Negative);
    }

    #[test]
    fn context_weight_survives_negation() {
        // "would not recommend": lexicon positive flips, the rule's negative does not
        let mut f = fv(0.4, 0.0, 0.3);
        f.has_negation = true;
        f.context_negative_score = 0.5;
        let d = compose(&f, &Calibration::default());
        assert_eq!(d.top().sentiment, Sentiment::Negative);
        assert_eq!(d.entries()[2].sentiment, Sentiment::Positive);
    }

    #[test]
    fn strong_override_beats_neutral_filler() {
        let mut f = fv(0.0, 0.0, 2.4);
        f.has_strong_positive = true;
        f.strong_positive_score = 1.0;
        let d = compose(&f, &Calibration::default());
        // 2.0 positive against 0.72 neutral
        assert_eq!(d.top().sentiment, Sentiment::Positive);
    }

    #[test]
    fn intensifier_tie_is_left_alone() {
        let mut f = fv(0.4, 0.4, 0.0);
        f.has_intensifier = true;
        let d = compose(&f, &Calibration::default());
        assert!((d.score_of(Sentiment::Positive) - d.score_of(Sentiment::Negative)).abs() < 1e-12);
        assert_eq!(d.top().sentiment, Sentiment::Positive);
    }

    #[test]
    fn zero_and_non_finite_give_default() {
        let cal = Calibration::default();
        let d = compose(&fv(0.0, 0.0, 0.0), &cal);
        assert_eq!(d.top().sentiment, Sentiment::Neutral);
        assert!((d.top().score - 0.6).abs() < 1e-12);

        assert!(try_compose(&fv(f64::NAN, 0.0, 0.3), &cal).is_none());
        let d = compose(&fv(f64::INFINITY, 0.0, 0.3), &cal);
        assert_eq!(d, default_distribution(&cal));
    }
}
