//! Property-style checks over seeded, programmatically built sentences.
//! The generator is deterministic (fixed seed), so failures are reproducible.

use std::sync::Arc;

use rand::{rngs::StdRng, seq::IndexedRandom, Rng, SeedableRng};

use sentiment_dashboard::analyze::Calibration;
use sentiment_dashboard::lexicon::LexiconSet;
use sentiment_dashboard::{SentimentEngine, Sentiment};

const SEED: u64 = 0x5EED_2024;
const ROUNDS: usize = 300;

/// Words that appear in no lexicon table, trigger list or stopword list.
const FILLER: &[&str] = &[
    "table", "river", "window", "yellow", "paper", "garden", "cloud", "bicycle", "orange",
    "seven", "monday", "kitchen", "letter", "bridge", "pencil", "station", "carpet", "winter",
];

/// A mix of lexicon words, modifiers, punctuation and emoji.
const MIXED: &[&str] = &[
    "good", "bad", "love", "hate", "okay", "not", "very", "slightly", "never", "amazing",
    "terrible", "average", "support", "customer service", "recommend", "!!!", "???", "...",
    ":)", ":(", "😊", "😢", "can't", "won't", "quality", "cheap", "better than", "fine",
];

fn sentence(rng: &mut StdRng, pool: &[&str], len: usize) -> String {
    (0..len)
        .map(|_| *pool.choose(&mut *rng).expect("non-empty pool"))
        .collect::<Vec<_>>()
        .join(" ")
}

fn mixed_sentences() -> Vec<String> {
    let mut rng = StdRng::seed_from_u64(SEED);
    (0..ROUNDS)
        .map(|_| {
            let len = rng.random_range(1..20);
            let mut pool = MIXED.to_vec();
            pool.extend_from_slice(FILLER);
            sentence(&mut rng, &pool, len)
        })
        .collect()
}

#[test]
fn distribution_sums_to_one_and_respects_floor() {
    let engine = SentimentEngine::builtin();
    let mut texts = mixed_sentences();
    texts.extend(["".to_string(), "   ".to_string(), "!!!".to_string(), "😊".to_string()]);

    for text in &texts {
        let d = engine.analyze_sentiment(text);
        assert!((d.sum() - 1.0).abs() < 1e-6, "{text:?}: sum {}", d.sum());
        let labels: Vec<Sentiment> = d.entries().iter().map(|e| e.sentiment).collect();
        for s in Sentiment::ALL {
            assert!(labels.contains(&s), "{text:?}: missing {s}");
        }
        for e in d.entries() {
            assert!(e.score >= 0.05 - 1e-9 && e.score <= 1.0, "{text:?}: {e:?}");
        }
        let scores: Vec<f64> = d.entries().iter().map(|e| e.score).collect();
        assert!(scores.windows(2).all(|w| w[0] >= w[1]), "{text:?}: not sorted");
    }
}

#[test]
fn failed_extraction_still_yields_a_full_distribution() {
    let cal = Calibration {
        word_weight: f64::INFINITY,
        ..Calibration::default()
    };
    let engine = SentimentEngine::new(Arc::new(LexiconSet::builtin()), cal);

    for text in ["good stuff", "good, good and more good"] {
        let d = engine.analyze_sentiment(text);
        assert_eq!(d.entries().len(), 3, "{text:?}");
        assert!((d.sum() - 1.0).abs() < 1e-6, "{text:?}: sum {}", d.sum());
        for e in d.entries() {
            assert!(e.score.is_finite() && e.score >= 0.05 - 1e-9, "{text:?}: {e:?}");
        }
        assert_eq!(d.top().sentiment, Sentiment::Neutral, "{text:?}");
    }
}

#[test]
fn identical_input_gives_identical_output() {
    let a = SentimentEngine::builtin();
    let b = SentimentEngine::builtin();
    for text in mixed_sentences().iter().take(100) {
        let x = a.analyze_sentiment(text);
        assert_eq!(x, a.analyze_sentiment(text), "{text:?}");
        assert_eq!(x, b.analyze_sentiment(text), "{text:?}");
        assert_eq!(
            a.extract_keywords(text, Sentiment::Positive),
            b.extract_keywords(text, Sentiment::Positive)
        );
    }
}

#[test]
fn strong_positive_word_dominates_filler() {
    let lex = LexiconSet::builtin();
    let engine = SentimentEngine::builtin();
    let strong: Vec<&str> = lex.strong_positive().iter().map(String::as_str).collect();
    let mut rng = StdRng::seed_from_u64(SEED ^ 1);

    for _ in 0..ROUNDS {
        let (n_before, n_after) = (rng.random_range(0..12), rng.random_range(0..12));
        let before = sentence(&mut rng, FILLER, n_before);
        let after = sentence(&mut rng, FILLER, n_after);
        let word = *strong.choose(&mut rng).expect("strong list");
        let text = format!("{before} {word} {after}");
        let top = engine.analyze_sentiment(&text).top();
        assert_eq!(top.sentiment, Sentiment::Positive, "{text:?}");
    }
}

#[test]
fn strong_negative_word_dominates_filler() {
    let lex = LexiconSet::builtin();
    let engine = SentimentEngine::builtin();
    let strong: Vec<&str> = lex.strong_negative().iter().map(String::as_str).collect();
    let mut rng = StdRng::seed_from_u64(SEED ^ 2);

    for _ in 0..ROUNDS {
        let n_before = rng.random_range(0..12);
        let before = sentence(&mut rng, FILLER, n_before);
        let word = *strong.choose(&mut rng).expect("strong list");
        let text = format!("{before} {word}");
        let top = engine.analyze_sentiment(&text).top();
        assert_eq!(top.sentiment, Sentiment::Negative, "{text:?}");
    }
}

#[test]
fn negation_changes_the_top_label() {
    let engine = SentimentEngine::builtin();
    let plain = engine.analyze_sentiment("I love this").top().sentiment;
    let negated = engine.analyze_sentiment("I do not love this").top().sentiment;
    assert_eq!(plain, Sentiment::Positive);
    assert_ne!(plain, negated);
}

#[test]
fn keywords_are_bounded_and_clean() {
    let lex = LexiconSet::builtin();
    let engine = SentimentEngine::builtin();
    let mut rng = StdRng::seed_from_u64(SEED ^ 3);
    let mut pool = MIXED.to_vec();
    pool.extend_from_slice(FILLER);
    pool.extend_from_slice(&["the", "and", "is", "it", "we", "of"]);

    for _ in 0..ROUNDS {
        let len = rng.random_range(0..40);
        let text = sentence(&mut rng, &pool, len);
        for s in Sentiment::ALL {
            let kws = engine.extract_keywords(&text, s);
            assert!(kws.len() <= 8, "{text:?}: {kws:?}");
            for k in &kws {
                assert!(k.chars().count() >= 3, "{text:?}: short keyword {k:?}");
                assert!(!lex.is_stopword(k), "{text:?}: stopword {k:?}");
                assert!(!k.contains('_'), "{text:?}: marker leaked {k:?}");
            }
        }
    }
}

#[test]
fn stopword_only_input_has_no_keywords() {
    let engine = SentimentEngine::builtin();
    assert!(engine.extract_keywords("", Sentiment::Neutral).is_empty());
    assert!(engine
        .extract_keywords("the and of it is we", Sentiment::Positive)
        .is_empty());
}
