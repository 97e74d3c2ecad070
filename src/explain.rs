//! Human-readable explanation of a classification, built from the engine's
//! own match trace rather than a separate word list.

use serde::Serialize;

use crate::analyze::text::contains_word;
use crate::analyze::Analysis;
use crate::lexicon::LexiconSet;
use crate::result::SentimentResult;
use crate::sentiment::Sentiment;

#[derive(Debug, Clone, Serialize)]
pub struct Explanation {
    pub overall_reasoning: String,
    pub key_factors: Vec<KeyFactor>,
    pub text_features: Vec<TextFeature>,
    pub confidence_factors: Vec<ConfidenceFactor>,
    pub alternative_interpretations: Vec<Alternative>,
}

#[derive(Debug, Clone, Serialize)]
pub struct KeyFactor {
    pub factor: String,
    pub impact: Sentiment,
    pub weight: f64,
    pub explanation: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct TextFeature {
    pub feature: &'static str,
    pub value: String,
    pub significance: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ConfidenceFactor {
    pub factor: &'static str,
    pub contribution: f64,
    pub explanation: &'static str,
}

#[derive(Debug, Clone, Serialize)]
pub struct Alternative {
    pub sentiment: Sentiment,
    pub probability: f64,
    pub reasoning: String,
}

fn matched_words(analysis: &Analysis, sentiment: Sentiment) -> Vec<String> {
    let trace = &analysis.features.trace;
    let mut out: Vec<String> = Vec::new();
    let found = trace
        .strong
        .iter()
        .filter(|(s, _)| *s == sentiment)
        .map(|(_, w)| w)
        .chain(trace.words.iter().filter(|(s, _, _)| *s == sentiment).map(|(_, w, _)| w))
        .chain(trace.phrases.iter().filter(|(s, _)| *s == sentiment).map(|(_, p)| p));
    for w in found {
        if !out.contains(w) {
            out.push(w.clone());
        }
    }
    out
}

fn found_in(lower: &str, list: &std::collections::BTreeSet<String>) -> Vec<String> {
    list.iter()
        .filter(|w| contains_word(lower, w))
        .cloned()
        .collect()
}

fn key_factors(result: &SentimentResult, analysis: &Analysis, lexicon: &LexiconSet) -> Vec<KeyFactor> {
    let lower = result.text.to_lowercase();
    let mut factors = Vec::new();

    for (s, name, per) in [
        (Sentiment::Positive, "Positive Language", 0.3),
        (Sentiment::Negative, "Negative Language", 0.3),
        (Sentiment::Neutral, "Neutral Language", 0.2),
    ] {
        let found = matched_words(analysis, s);
        if !found.is_empty() {
            factors.push(KeyFactor {
                factor: name.to_string(),
                impact: s,
                weight: found.len() as f64 * per,
                explanation: format!("Found {s} language: {}.", found.join(", ")),
            });
        }
    }

    let intensifiers = found_in(&lower, lexicon.intensifiers());
    if !intensifiers.is_empty() {
        factors.push(KeyFactor {
            factor: "Intensifiers".to_string(),
            impact: result.sentiment,
            weight: intensifiers.len() as f64 * 0.2,
            explanation: format!(
                "Found intensifiers: {}. These amplify the sentiment expressed.",
                intensifiers.join(", ")
            ),
        });
    }

    let negations = found_in(&lower, lexicon.negations());
    if !negations.is_empty() {
        let impact = if result.sentiment == Sentiment::Positive {
            Sentiment::Negative
        } else {
            Sentiment::Positive
        };
        factors.push(KeyFactor {
            factor: "Negations".to_string(),
            impact,
            weight: negations.len() as f64 * 0.25,
            explanation: format!(
                "Found negations: {}. These can flip or modify the sentiment.",
                negations.join(", ")
            ),
        });
    }

    for rule in &analysis.features.trace.rules {
        factors.push(KeyFactor {
            factor: format!("Context: {}", rule.replace('_', " ")),
            impact: rule_impact(rule),
            weight: 0.2,
            explanation: "A contextual pattern matched around the sentiment words.".to_string(),
        });
    }

    let exclamations = result.text.matches('!').count();
    if exclamations > 0 {
        factors.push(KeyFactor {
            factor: "Exclamation Marks".to_string(),
            impact: result.sentiment,
            weight: (exclamations as f64 * 0.1).min(0.3),
            explanation: format!(
                "{exclamations} exclamation mark(s) found, suggesting emotional intensity."
            ),
        });
    }

    if !result.keywords.is_empty() {
        let shown: Vec<&str> = result.keywords.iter().take(5).map(String::as_str).collect();
        factors.push(KeyFactor {
            factor: "Key Terms".to_string(),
            impact: result.sentiment,
            weight: result.keywords.len() as f64 * 0.1,
            explanation: format!("Identified key terms: {}.", shown.join(", ")),
        });
    }

    factors
}

fn rule_impact(name: &str) -> Sentiment {
    crate::analyze::rules::BUILTIN_RULES
        .iter()
        .find(|r| r.name == name)
        .map(|r| r.then.add_to)
        .unwrap_or(Sentiment::Neutral)
}

fn text_features(text: &str) -> Vec<TextFeature> {
    let len = text.chars().count();
    let words = text.split_whitespace().count();
    let punct = text.chars().filter(|c| "!?.,;:".contains(*c)).count();
    let caps = text.chars().filter(|c| c.is_ascii_uppercase()).count();
    let pct = |n: usize| if len == 0 { 0 } else { (n as f64 / len as f64 * 100.0).round() as u32 };

    let length_note = if len < 50 {
        "Short texts may have less context for analysis"
    } else if len > 200 {
        "Longer texts provide more context for accurate analysis"
    } else {
        "Moderate length provides good context for analysis"
    };
    let depth = if words < 10 {
        "limited"
    } else if words > 50 {
        "extensive"
    } else {
        "adequate"
    };

    let mut out = vec![
        TextFeature {
            feature: "Text Length",
            value: format!("{len} characters"),
            significance: length_note.to_string(),
        },
        TextFeature {
            feature: "Word Count",
            value: words.to_string(),
            significance: format!("{words} words provide {depth} context"),
        },
        TextFeature {
            feature: "Punctuation Density",
            value: format!("{}%", pct(punct)),
            significance: if punct as f64 > len as f64 * 0.1 {
                "High punctuation may indicate emotional expression".to_string()
            } else {
                "Normal punctuation usage".to_string()
            },
        },
    ];
    if caps > 0 {
        out.push(TextFeature {
            feature: "Capital Letters",
            value: format!("{caps} ({}%)", pct(caps)),
            significance: if caps as f64 > len as f64 * 0.2 {
                "High caps usage may indicate emphasis or strong emotion".to_string()
            } else {
                "Normal capitalization".to_string()
            },
        });
    }
    out
}

fn confidence_factors(result: &SentimentResult, analysis: &Analysis) -> Vec<ConfidenceFactor> {
    let polar = matched_words(analysis, Sentiment::Positive).len()
        + matched_words(analysis, Sentiment::Negative).len();
    let long_enough = result.text.chars().count() > 20;
    let clear = result.keywords.len() > 2;

    let mut out = vec![
        ConfidenceFactor {
            factor: "Sentiment Word Strength",
            contribution: (polar as f64 * 0.2).min(0.4),
            explanation: "Strong sentiment words provide clear indicators for classification",
        },
        ConfidenceFactor {
            factor: "Text Length Adequacy",
            contribution: if long_enough { 0.2 } else { 0.1 },
            explanation: if long_enough {
                "Sufficient text length for reliable analysis"
            } else {
                "Short text may limit analysis accuracy"
            },
        },
        ConfidenceFactor {
            factor: "Context Clarity",
            contribution: if clear { 0.2 } else { 0.1 },
            explanation: if clear {
                "Clear contextual indicators present"
            } else {
                "Limited contextual information"
            },
        },
    ];
    if !analysis.features.has_negation {
        out.push(ConfidenceFactor {
            factor: "No Negations",
            contribution: 0.15,
            explanation: "Absence of negations makes sentiment interpretation more straightforward",
        });
    }
    out
}

fn overall_reasoning(result: &SentimentResult, factors: &[KeyFactor]) -> String {
    let mut dominant: Vec<&KeyFactor> = factors.iter().filter(|f| f.weight > 0.2).collect();
    dominant.sort_by(|a, b| b.weight.total_cmp(&a.weight));
    dominant.truncate(3);

    let mut out = format!(
        "This text was classified as {} with {}% confidence. ",
        result.sentiment,
        (result.confidence * 100.0).round()
    );
    if !dominant.is_empty() {
        let names: Vec<String> = dominant.iter().map(|f| f.factor.to_lowercase()).collect();
        out.push_str(&format!(
            "The primary factors influencing this classification were: {}. ",
            names.join(", ")
        ));
    }

    let len = result.text.chars().count();
    if len < 30 {
        out.push_str("The short text limits the depth of analysis, but clear indicators were still identified. ");
    } else if len > 200 {
        out.push_str("The substantial text length provides rich context for the analysis. ");
    }

    out.push_str(if result.confidence > 0.8 {
        "The high confidence score indicates strong and clear sentiment indicators."
    } else if result.confidence < 0.6 {
        "The moderate confidence score suggests some ambiguity or mixed indicators."
    } else {
        "The confidence score reflects a balanced assessment of the indicators present."
    });
    out
}

fn alternatives(result: &SentimentResult, factors: &[KeyFactor]) -> Vec<Alternative> {
    let mut per_class = [0.0f64; 3];
    for f in factors {
        per_class[class_index(f.impact)] += f.weight;
    }
    let total: f64 = per_class.iter().sum();
    if total <= 0.0 {
        return Vec::new();
    }

    let mut out: Vec<Alternative> = Sentiment::ALL
        .into_iter()
        .filter(|s| *s != result.sentiment)
        .filter_map(|s| {
            let score = per_class[class_index(s)];
            let probability = score / total * (1.0 - result.confidence);
            (score > 0.0 && probability > 0.1).then(|| Alternative {
                sentiment: s,
                probability,
                reasoning: format!("Alternative interpretation based on {s} indicators found in the text"),
            })
        })
        .collect();
    out.sort_by(|a, b| b.probability.total_cmp(&a.probability));
    out
}

fn class_index(s: Sentiment) -> usize {
    match s {
        Sentiment::Positive => 0,
        Sentiment::Negative => 1,
        Sentiment::Neutral => 2,
    }
}

pub fn explain(result: &SentimentResult, analysis: &Analysis, lexicon: &LexiconSet) -> Explanation {
    let key_factors = key_factors(result, analysis, lexicon);
    Explanation {
        overall_reasoning: overall_reasoning(result, &key_factors),
        text_features: text_features(&result.text),
        confidence_factors: confidence_factors(result, analysis),
        alternative_interpretations: alternatives(result, &key_factors),
        key_factors,
    }
}
