//! # Lexicon Store
//!
//! Immutable word and phrase tables the engine scores against:
//! - per class (`positive`, `negative`, `neutral`): phrases and single words,
//! - shared modifier lists: intensifiers, diminishers, negations,
//! - strong override lists (`strong_positive`, `strong_negative`),
//! - the stopword list used by keyword extraction.
//!
//! Entries are lower-cased on load; all matching happens on lower-cased text.
//! A lexicon TOML file can extend or replace the built-in tables:
//!
//! ```toml
//! extend = true
//! intensifiers = ["super"]
//! strong_negative = ["scam"]
//!
//! [positive]
//! words = ["stellar"]
//! phrases = ["blown away"]
//! ```

mod builtin;

use anyhow::{bail, Context};
use serde::Deserialize;
use std::collections::BTreeSet;
use std::fs;
use std::path::Path;
use tracing::info;

use crate::sentiment::Sentiment;

/// Phrases and words of one sentiment class.
#[derive(Debug, Clone, Default)]
pub struct ClassLexicon {
    pub phrases: BTreeSet<String>,
    pub words: BTreeSet<String>,
}

impl ClassLexicon {
    fn from_slices(phrases: &[&str], words: &[&str]) -> Self {
        Self {
            phrases: phrases.iter().map(|s| s.to_string()).collect(),
            words: words.iter().map(|s| s.to_string()).collect(),
        }
    }
}

/// The full, read-only lexicon. Build once and share behind an `Arc`.
#[derive(Debug, Clone)]
pub struct LexiconSet {
    positive: ClassLexicon,
    negative: ClassLexicon,
    neutral: ClassLexicon,
    intensifiers: BTreeSet<String>,
    diminishers: BTreeSet<String>,
    negations: BTreeSet<String>,
    strong_positive: BTreeSet<String>,
    strong_negative: BTreeSet<String>,
    stopwords: BTreeSet<String>,
    // words + words of phrases (len > 2), per class; derived on build
    vocabulary: [BTreeSet<String>; 3],
}

/// Serde shape of a lexicon file. Every table is optional.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LexiconFile {
    /// `true` merges into the built-in tables, `false` replaces them.
    #[serde(default = "default_extend")]
    pub extend: bool,
    #[serde(default)]
    pub positive: ClassFile,
    #[serde(default)]
    pub negative: ClassFile,
    #[serde(default)]
    pub neutral: ClassFile,
    #[serde(default)]
    pub intensifiers: Vec<String>,
    #[serde(default)]
    pub diminishers: Vec<String>,
    #[serde(default)]
    pub negations: Vec<String>,
    #[serde(default)]
    pub strong_positive: Vec<String>,
    #[serde(default)]
    pub strong_negative: Vec<String>,
    #[serde(default)]
    pub stopwords: Vec<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ClassFile {
    #[serde(default)]
    pub phrases: Vec<String>,
    #[serde(default)]
    pub words: Vec<String>,
}

fn default_extend() -> bool {
    true
}

impl LexiconSet {
    /// The built-in tables.
    pub fn builtin() -> Self {
        use builtin::*;
        let set = |xs: &[&str]| xs.iter().map(|s| s.to_string()).collect::<BTreeSet<_>>();
        Self::assemble(
            ClassLexicon::from_slices(POSITIVE_PHRASES, POSITIVE_WORDS),
            ClassLexicon::from_slices(NEGATIVE_PHRASES, NEGATIVE_WORDS),
            ClassLexicon::from_slices(NEUTRAL_PHRASES, NEUTRAL_WORDS),
            set(INTENSIFIERS),
            set(DIMINISHERS),
            set(NEGATIONS),
            set(STRONG_POSITIVE),
            set(STRONG_NEGATIVE),
            set(STOPWORDS),
        )
    }

    /// Load a lexicon file from disk and apply it to the built-in tables.
    /// `extend` overrides the file's own `extend` flag when set.
    pub fn load(path: &Path, extend: Option<bool>) -> anyhow::Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("reading lexicon from {}", path.display()))?;
        let mut file: LexiconFile = toml::from_str(&content)
            .with_context(|| format!("parsing lexicon at {}", path.display()))?;
        if let Some(e) = extend {
            file.extend = e;
        }
        let lex = Self::from_file(file)
            .with_context(|| format!("invalid lexicon at {}", path.display()))?;
        info!(
            target: "sentiment",
            path = %path.display(),
            words = lex.word_count(),
            "lexicon loaded"
        );
        Ok(lex)
    }

    pub fn from_toml_str(toml_str: &str) -> anyhow::Result<Self> {
        let file: LexiconFile = toml::from_str(toml_str)?;
        Self::from_file(file)
    }

    /// Apply a parsed lexicon file (extend or replace) and validate the result.
    pub fn from_file(file: LexiconFile) -> anyhow::Result<Self> {
        let mut base = if file.extend {
            Self::builtin()
        } else {
            Self::empty()
        };

        merge_class(&mut base.positive, file.positive);
        merge_class(&mut base.negative, file.negative);
        merge_class(&mut base.neutral, file.neutral);
        merge(&mut base.intensifiers, file.intensifiers);
        merge(&mut base.diminishers, file.diminishers);
        merge(&mut base.negations, file.negations);
        merge(&mut base.strong_positive, file.strong_positive);
        merge(&mut base.strong_negative, file.strong_negative);
        merge(&mut base.stopwords, file.stopwords);

        let lex = Self::assemble(
            base.positive,
            base.negative,
            base.neutral,
            base.intensifiers,
            base.diminishers,
            base.negations,
            base.strong_positive,
            base.strong_negative,
            base.stopwords,
        );
        lex.validate()?;
        Ok(lex)
    }

    fn empty() -> Self {
        Self::assemble(
            ClassLexicon::default(),
            ClassLexicon::default(),
            ClassLexicon::default(),
            BTreeSet::new(),
            BTreeSet::new(),
            BTreeSet::new(),
            BTreeSet::new(),
            BTreeSet::new(),
            BTreeSet::new(),
        )
    }

    #[allow(clippy::too_many_arguments)]
    fn assemble(
        positive: ClassLexicon,
        negative: ClassLexicon,
        neutral: ClassLexicon,
        intensifiers: BTreeSet<String>,
        diminishers: BTreeSet<String>,
        negations: BTreeSet<String>,
        strong_positive: BTreeSet<String>,
        strong_negative: BTreeSet<String>,
        stopwords: BTreeSet<String>,
    ) -> Self {
        let vocabulary = [
            vocabulary_of(&positive),
            vocabulary_of(&negative),
            vocabulary_of(&neutral),
        ];
        Self {
            positive,
            negative,
            neutral,
            intensifiers,
            diminishers,
            negations,
            strong_positive,
            strong_negative,
            stopwords,
            vocabulary,
        }
    }

    fn validate(&self) -> anyhow::Result<()> {
        if let Some(w) = self.strong_positive.intersection(&self.strong_negative).next() {
            bail!("`{w}` is listed as both strong positive and strong negative");
        }
        for s in Sentiment::ALL {
            let c = self.class(s);
            if c.words.iter().chain(c.phrases.iter()).any(|w| w.is_empty()) {
                bail!("empty entry in the {s} tables");
            }
        }
        Ok(())
    }

    pub fn class(&self, sentiment: Sentiment) -> &ClassLexicon {
        match sentiment {
            Sentiment::Positive => &self.positive,
            Sentiment::Negative => &self.negative,
            Sentiment::Neutral => &self.neutral,
        }
    }

    pub fn intensifiers(&self) -> &BTreeSet<String> {
        &self.intensifiers
    }

    pub fn diminishers(&self) -> &BTreeSet<String> {
        &self.diminishers
    }

    pub fn negations(&self) -> &BTreeSet<String> {
        &self.negations
    }

    pub fn strong_positive(&self) -> &BTreeSet<String> {
        &self.strong_positive
    }

    pub fn strong_negative(&self) -> &BTreeSet<String> {
        &self.strong_negative
    }

    pub fn is_stopword(&self, word: &str) -> bool {
        self.stopwords.contains(word)
    }

    pub fn is_strong(&self, word: &str) -> bool {
        self.strong_positive.contains(word) || self.strong_negative.contains(word)
    }

    /// Words of the class plus the words its phrases are made of (longer than 2 chars).
    pub fn vocabulary(&self, sentiment: Sentiment) -> &BTreeSet<String> {
        let idx = match sentiment {
            Sentiment::Positive => 0,
            Sentiment::Negative => 1,
            Sentiment::Neutral => 2,
        };
        &self.vocabulary[idx]
    }

    /// True if the word belongs to any class vocabulary.
    pub fn in_any_vocabulary(&self, word: &str) -> bool {
        self.vocabulary.iter().any(|v| v.contains(word))
    }

    fn word_count(&self) -> usize {
        Sentiment::ALL
            .iter()
            .map(|s| self.class(*s).words.len() + self.class(*s).phrases.len())
            .sum()
    }
}

impl Default for LexiconSet {
    fn default() -> Self {
        Self::builtin()
    }
}

fn vocabulary_of(class: &ClassLexicon) -> BTreeSet<String> {
    class
        .words
        .iter()
        .map(String::as_str)
        .chain(class.phrases.iter().flat_map(|p| p.split_whitespace()))
        .filter(|w| w.chars().count() > 2)
        .map(str::to_string)
        .collect()
}

fn clean(entry: String) -> Option<String> {
    let t = entry.trim().to_lowercase();
    (!t.is_empty()).then_some(t)
}

fn merge(into: &mut BTreeSet<String>, extra: Vec<String>) {
    into.extend(extra.into_iter().filter_map(clean));
}

fn merge_class(into: &mut ClassLexicon, extra: ClassFile) {
    merge(&mut into.phrases, extra.phrases);
    merge(&mut into.words, extra.words);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_strong_lists_are_disjoint() {
        let lex = LexiconSet::builtin();
        assert!(lex.validate().is_ok());
        assert!(lex.strong_positive().contains("love"));
        assert!(lex.strong_negative().contains("worst"));
        assert!(lex.is_stopword("the"));
    }

    #[test]
    fn vocabulary_includes_phrase_words() {
        let lex = LexiconSet::builtin();
        let pos = lex.vocabulary(Sentiment::Positive);
        assert!(pos.contains("penny"));
        assert!(pos.contains("love"));
        // two-letter phrase words are left out
        assert!(!lex.vocabulary(Sentiment::Neutral).contains("so"));
    }

    #[test]
    fn extends_builtin_and_lowercases() {
        let lex = LexiconSet::from_toml_str(
            r#"
strong_negative = ["  SCAM "]

[positive]
words = ["Stellar"]
"#,
        )
        .expect("valid lexicon");
        assert!(lex.class(Sentiment::Positive).words.contains("stellar"));
        assert!(lex.class(Sentiment::Positive).words.contains("excellent"));
        assert!(lex.strong_negative().contains("scam"));
    }

    #[test]
    fn replace_mode_drops_builtin() {
        let lex = LexiconSet::from_toml_str(
            r#"
extend = false
[negative]
words = ["meh"]
"#,
        )
        .unwrap();
        assert!(lex.class(Sentiment::Negative).words.contains("meh"));
        assert!(!lex.class(Sentiment::Negative).words.contains("terrible"));
        assert!(lex.negations().is_empty());
    }

    #[test]
    fn rejects_overlapping_strong_lists() {
        let err = LexiconSet::from_toml_str(r#"strong_negative = ["love"]"#).unwrap_err();
        assert!(err.to_string().contains("love"), "{err}");
    }

    #[test]
    fn rejects_unknown_keys() {
        assert!(LexiconSet::from_toml_str(r#"adjectives = ["x"]"#).is_err());
    }
}
