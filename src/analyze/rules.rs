//! Contextual rules applied after lexicon scoring.
//!
//! Each rule is a `When` condition over the lower-cased original text and a
//! `Then` score bump for one class:
//! - `any_contains`: match if ANY anchor phrase appears (substring)
//! - `negation`:     match only if the text's negation flag equals this value
//! - `near`:         a modifier must appear within the window around the
//!                   first anchor occurrence
//! - `unless_near`:  no match if any of these appears in that window
//!
//! Every matching rule applies; order does not matter.

use serde::Serialize;

use super::text::char_window;
use crate::sentiment::Sentiment;

#[derive(Debug, Clone, Copy, Serialize)]
pub struct Rule {
    pub name: &'static str,
    pub when: When,
    pub then: Then,
}

#[derive(Debug, Clone, Copy, Default, Serialize)]
pub struct When {
    pub any_contains: &'static [&'static str],
    pub negation: Option<bool>,
    pub near: Option<&'static [&'static str]>,
    pub unless_near: Option<&'static [&'static str]>,
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct Then {
    pub add_to: Sentiment,
    pub delta: f64,
}

const SERVICE: &[&str] = &["customer service", "support"];
const SERVICE_PRAISE: &[&str] = &["excellent", "great"];
const SERVICE_COMPLAINT: &[&str] = &["poor", "terrible"];
const RECOMMEND: &[&str] = &["recommend", "suggest"];

const fn rule(name: &'static str, when: When, add_to: Sentiment, delta: f64) -> Rule {
    Rule {
        name,
        when,
        then: Then { add_to, delta },
    }
}

const fn contains(any: &'static [&'static str]) -> When {
    When {
        any_contains: any,
        negation: None,
        near: None,
        unless_near: None,
    }
}

pub static BUILTIN_RULES: &[Rule] = &[
    rule("comparative_better", contains(&["better than", "superior to"]), Sentiment::Positive, 0.3),
    rule("comparative_worse", contains(&["worse than", "inferior to"]), Sentiment::Negative, 0.3),
    rule(
        "recommend_negated",
        When {
            negation: Some(true),
            ..contains(RECOMMEND)
        },
        Sentiment::Negative,
        0.5,
    ),
    rule(
        "recommend",
        When {
            negation: Some(false),
            ..contains(RECOMMEND)
        },
        Sentiment::Positive,
        0.5,
    ),
    rule("satisfaction", contains(&["satisfied", "pleased"]), Sentiment::Positive, 0.4),
    rule("dissatisfaction", contains(&["disappointed", "unsatisfied"]), Sentiment::Negative, 0.4),
    rule("quality_high", contains(&["high quality", "premium"]), Sentiment::Positive, 0.4),
    rule("quality_low", contains(&["low quality", "cheap"]), Sentiment::Negative, 0.4),
    rule(
        "service_praise",
        When {
            near: Some(SERVICE_PRAISE),
            ..contains(SERVICE)
        },
        Sentiment::Positive,
        0.5,
    ),
    rule(
        "service_complaint",
        When {
            near: Some(SERVICE_COMPLAINT),
            unless_near: Some(SERVICE_PRAISE),
            ..contains(SERVICE)
        },
        Sentiment::Negative,
        0.5,
    ),
];

/// Rules from `rules` that fire on `lower` (already lower-cased).
pub fn matching_rules<'r>(
    lower: &str,
    has_negation: bool,
    window_chars: usize,
    rules: &'r [Rule],
) -> Vec<&'r Rule> {
    rules
        .iter()
        .filter(|r| matches_when(lower, has_negation, window_chars, &r.when))
        .collect()
}

// --- internals ---

fn matches_when(lower: &str, has_negation: bool, window_chars: usize, w: &When) -> bool {
    if let Some(want) = w.negation {
        if want != has_negation {
            return false;
        }
    }
    let Some((start, end)) = w
        .any_contains
        .iter()
        .find_map(|p| lower.find(p).map(|i| (i, i + p.len())))
    else {
        return false;
    };
    if w.near.is_none() && w.unless_near.is_none() {
        return true;
    }

    let window = char_window(lower, start, end, window_chars);
    if let Some(near) = w.near {
        if !near.iter().any(|m| window.contains(m)) {
            return false;
        }
    }
    if let Some(unless) = w.unless_near {
        if unless.iter().any(|m| window.contains(m)) {
            return false;
        }
    }
    true
}
