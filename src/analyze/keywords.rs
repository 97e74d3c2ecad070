//! Keyword extraction that reuses the scoring lexicon.
//!
//! Candidates are lower-cased word tokens longer than 2 chars that are not
//! stopwords. Tokens fused with a negation prefix are skipped. A candidate survives if it is a strong word, a word of the
//! requested class, longer than 4 chars, or sits within two tokens of any
//! lexicon word. Survivors are ranked by
//! `5·strong + 3·class + frequency + min(len/10, 1) + 2·in_any_lexicon`;
//! ties keep first-appearance order.

use std::collections::HashMap;

use super::normalize::{Modifier, NormalizedText};
use super::text::is_word_char;
use crate::lexicon::LexiconSet;
use crate::sentiment::Sentiment;

pub const MAX_KEYWORDS: usize = 8;
const CONTEXT_RADIUS: usize = 2;

fn candidates(n: &NormalizedText) -> Vec<String> {
    n.words()
        .filter(|t| !t.has_prefix(Modifier::Negation))
        .flat_map(|t| {
            strip_markers(&t.lower)
                .split(|c: char| !is_word_char(c))
                .filter(|w| w.chars().count() > 2)
                .map(str::to_string)
                .collect::<Vec<_>>()
        })
        .collect()
}

// literal `not_good` style input carries no meaning for keywords
fn strip_markers(word: &str) -> &str {
    let mut w = word;
    loop {
        let before = w.len();
        for m in [Modifier::Negation, Modifier::Intensifier, Modifier::Diminisher] {
            let tag = m.tag().to_ascii_lowercase();
            if let Some(rest) = w.strip_prefix(tag.as_str()) {
                w = rest;
            }
        }
        if w.len() == before {
            return w.trim_matches('_');
        }
    }
}

pub fn extract_keywords(n: &NormalizedText, lexicon: &LexiconSet, sentiment: Sentiment) -> Vec<String> {
    let words = candidates(n);
    let class_vocab = lexicon.vocabulary(sentiment);

    let mut order: Vec<&str> = Vec::new();
    let mut freq: HashMap<&str, usize> = HashMap::new();
    for w in &words {
        *freq.entry(w.as_str()).or_default() += 1;
    }

    for (i, w) in words.iter().enumerate() {
        if lexicon.is_stopword(w) || order.contains(&w.as_str()) {
            continue;
        }
        let lo = i.saturating_sub(CONTEXT_RADIUS);
        let hi = (i + CONTEXT_RADIUS + 1).min(words.len());
        let keep = lexicon.is_strong(w)
            || class_vocab.contains(w)
            || w.chars().count() > 4
            || words[lo..hi].iter().any(|c| lexicon.in_any_vocabulary(c));
        if keep {
            order.push(w.as_str());
        }
    }

    let mut scored: Vec<(&str, f64)> = order
        .into_iter()
        .map(|w| {
            let mut score = freq.get(w).copied().unwrap_or(0) as f64;
            if lexicon.is_strong(w) {
                score += 5.0;
            }
            if class_vocab.contains(w) {
                score += 3.0;
            }
            score += (w.chars().count() as f64 / 10.0).min(1.0);
            if lexicon.in_any_vocabulary(w) {
                score += 2.0;
            }
            (w, score)
        })
        .collect();
    // stable: equal scores keep first appearance
    scored.sort_by(|a, b| b.1.total_cmp(&a.1));

    scored
        .into_iter()
        .take(MAX_KEYWORDS)
        .map(|(w, _)| w.to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyze::normalize::normalize;

    fn kw(text: &str, s: Sentiment) -> Vec<String> {
        let lex = LexiconSet::builtin();
        extract_keywords(&normalize(text, &lex), &lex, s)
    }

    #[test]
    fn love_it() {
        assert_eq!(kw("Love it!", Sentiment::Positive), vec!["love"]);
    }

    #[test]
    fn strong_and_class_words_rank_first() {
        let k = kw(
            "The battery is terrible and the screen is excellent, battery life short",
            Sentiment::Negative,
        );
        assert_eq!(k[0], "terrible");
        assert!(k.contains(&"battery".to_string()));
        assert!(k.contains(&"excellent".to_string()));
        assert!(!k.contains(&"the".to_string()));
    }

    #[test]
    fn bounded_and_clean() {
        let text = "alpha bravo charlie delta echoes foxtrot golfer hotels indigo juliet kilos limas";
        let k = kw(text, Sentiment::Neutral);
        assert_eq!(k.len(), MAX_KEYWORDS);
        assert_eq!(k[0], "charlie");
        assert!(k.iter().all(|w| w.chars().count() >= 3));
    }

    #[test]
    fn empty_and_stopword_only_inputs() {
        assert!(kw("", Sentiment::Positive).is_empty());
        assert!(kw("the and but with", Sentiment::Negative).is_empty());
    }

    #[test]
    fn negated_words_are_not_keywords() {
        let k = kw("The product is not good at all, terrible", Sentiment::Positive);
        assert!(!k.contains(&"good".to_string()), "got {k:?}");
        assert!(k.contains(&"terrible".to_string()), "got {k:?}");
    }

    #[test]
    fn literal_marker_prefixes_are_stripped() {
        assert_eq!(kw("NOT_good", Sentiment::Positive), vec!["good"]);
    }
}
