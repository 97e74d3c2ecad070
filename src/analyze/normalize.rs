//! # Text Normalizer
//!
//! Turns raw text into an annotated token stream:
//! 1. trim, fold typographic apostrophes, expand contractions;
//! 2. lex into words, punctuation runs, emoticons, emoji and single symbols;
//! 3. fuse negation, intensifier and diminisher triggers onto the token that
//!    follows them (in that order). A token that already carries a prefix is
//!    never used as a trigger by a later pass;
//! 4. mark the negation scope: the negated token, and the token after it when
//!    the negated token is itself an intensifier/diminisher (`not very good`).
//!
//! [`NormalizedText::tagged`] renders the familiar marker string
//! (`NOT_good`, `INTENSIFIER_love`, `EXCITEMENT`, `POSITIVE_EMOJI`, ...) for
//! diagnostics. Nothing downstream parses it back.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use std::collections::BTreeSet;

use crate::lexicon::LexiconSet;
use crate::sentiment::Sentiment;

/// A fused trigger prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Modifier {
    Negation,
    Intensifier,
    Diminisher,
}

impl Modifier {
    pub fn tag(self) -> &'static str {
        match self {
            Modifier::Negation => "NOT_",
            Modifier::Intensifier => "INTENSIFIER_",
            Modifier::Diminisher => "DIMINISHER_",
        }
    }
}

/// Mood and punctuation markers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Marker {
    Excitement,
    Confusion,
    Pause,
    PositiveEmoji,
    NegativeEmoji,
    NeutralEmoji,
    AngerEmoji,
    LoveEmoji,
    PositiveEmoticon,
    NegativeEmoticon,
    NeutralEmoticon,
}

impl Marker {
    pub fn as_str(self) -> &'static str {
        match self {
            Marker::Excitement => "EXCITEMENT",
            Marker::Confusion => "CONFUSION",
            Marker::Pause => "PAUSE",
            Marker::PositiveEmoji => "POSITIVE_EMOJI",
            Marker::NegativeEmoji => "NEGATIVE_EMOJI",
            Marker::NeutralEmoji => "NEUTRAL_EMOJI",
            Marker::AngerEmoji => "ANGER_EMOJI",
            Marker::LoveEmoji => "LOVE_EMOJI",
            Marker::PositiveEmoticon => "POSITIVE_EMOTICON",
            Marker::NegativeEmoticon => "NEGATIVE_EMOTICON",
            Marker::NeutralEmoticon => "NEUTRAL_EMOTICON",
        }
    }

    /// The class an emoji/emoticon marker votes for.
    pub fn mood(self) -> Option<Sentiment> {
        match self {
            Marker::PositiveEmoji | Marker::LoveEmoji | Marker::PositiveEmoticon => {
                Some(Sentiment::Positive)
            }
            Marker::NegativeEmoji | Marker::AngerEmoji | Marker::NegativeEmoticon => {
                Some(Sentiment::Negative)
            }
            Marker::NeutralEmoji | Marker::NeutralEmoticon => Some(Sentiment::Neutral),
            Marker::Excitement | Marker::Confusion | Marker::Pause => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TokenKind {
    Word,
    Marker(Marker),
    /// Any other single non-space char (punctuation, unmapped emoji).
    Symbol,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Token {
    /// Text as written (after contraction expansion).
    pub text: String,
    #[serde(skip)]
    pub lower: String,
    pub kind: TokenKind,
    /// Fused prefixes, outermost first.
    pub prefix: Vec<Modifier>,
    /// Inside a negation scope.
    pub negated: bool,
    // no whitespace between this token and the previous one
    #[serde(skip)]
    glued: bool,
}

impl Token {
    pub fn is_word(&self) -> bool {
        self.kind == TokenKind::Word
    }

    pub fn has_prefix(&self, m: Modifier) -> bool {
        self.prefix.contains(&m)
    }

    fn render(&self, out: &mut String) {
        for m in &self.prefix {
            out.push_str(m.tag());
        }
        match self.kind {
            TokenKind::Marker(mk) => out.push_str(mk.as_str()),
            TokenKind::Word | TokenKind::Symbol => out.push_str(&self.text),
        }
    }
}

/// Output of [`normalize`]: the trimmed original plus its token stream.
#[derive(Debug, Clone, Serialize)]
pub struct NormalizedText {
    original: String,
    tokens: Vec<Token>,
}

impl NormalizedText {
    pub fn original(&self) -> &str {
        &self.original
    }

    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    pub fn words(&self) -> impl Iterator<Item = &Token> {
        self.tokens.iter().filter(|t| t.is_word())
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Legacy marker-string rendering.
    pub fn tagged(&self) -> String {
        let mut out = String::with_capacity(self.original.len() + 16);
        for (i, t) in self.tokens.iter().enumerate() {
            if i > 0 && !t.glued {
                out.push(' ');
            }
            t.render(&mut out);
        }
        out
    }

    pub fn has_modifier(&self, m: Modifier) -> bool {
        self.tokens.iter().any(|t| t.has_prefix(m))
    }

    pub fn has_negation(&self) -> bool {
        self.has_modifier(Modifier::Negation)
    }

    pub fn has_intensifier(&self) -> bool {
        self.has_modifier(Modifier::Intensifier)
    }

    pub fn has_diminisher(&self) -> bool {
        self.has_modifier(Modifier::Diminisher)
    }

    pub fn has_marker(&self, marker: Marker) -> bool {
        self.tokens
            .iter()
            .any(|t| t.kind == TokenKind::Marker(marker))
    }

    pub fn markers(&self) -> BTreeSet<Marker> {
        self.tokens
            .iter()
            .filter_map(|t| match t.kind {
                TokenKind::Marker(m) => Some(m),
                _ => None,
            })
            .collect()
    }
}

static CONTRACTIONS: Lazy<Vec<(Regex, &'static str)>> = Lazy::new(|| {
    [
        (r"(?i)\bwon't\b", "will not"),
        (r"(?i)\bcan't\b", "can not"),
        (r"(?i)\bit's\b", "it is"),
        (r"(?i)\bthat's\b", "that is"),
        (r"(?i)n't\b", " not"),
        (r"(?i)'re\b", " are"),
        (r"(?i)'ve\b", " have"),
        (r"(?i)'ll\b", " will"),
        (r"(?i)'d\b", " would"),
        (r"(?i)'m\b", " am"),
    ]
    .into_iter()
    .map(|(p, r)| (Regex::new(p).expect("contraction regex"), r))
    .collect()
});

// Emoticons first so `:D` is not split into `:` + `D`.
static LEXER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?x)
        (?P<emoticon>:-?\)|:\]|=\)|:-?D\b|=D\b|:-?\(|:\[|=\(|\bD:|:-?\||=\|)
        | (?P<excitement>!{2,})
        | (?P<confusion>\?{2,})
        | (?P<pause>\.{3,})
        | (?P<word>[\w']+)
        | (?P<other>\S)
        ",
    )
    .expect("lexer regex")
});

fn emoticon_marker(s: &str) -> Marker {
    match s {
        ":(" | ":-(" | ":[" | "=(" | "D:" => Marker::NegativeEmoticon,
        ":|" | ":-|" | "=|" => Marker::NeutralEmoticon,
        _ => Marker::PositiveEmoticon,
    }
}

fn emoji_marker(c: char) -> Option<Marker> {
    let m = match c {
        '😊' | '😀' | '😃' | '😄' | '😁' | '🙂' | '😌' | '😍' | '🥰' | '😘' | '🤗' => {
            Marker::PositiveEmoji
        }
        '😢' | '😭' | '😞' | '😔' | '😟' | '😕' | '🙁' | '\u{2639}' | '😰' | '😨' => {
            Marker::NegativeEmoji
        }
        '😐' | '😑' | '🤔' | '😶' | '🙄' | '😏' => Marker::NeutralEmoji,
        '😡' | '😠' | '🤬' | '😤' | '💢' => Marker::AngerEmoji,
        '\u{2764}' | '💕' | '💖' | '💗' | '💝' | '🧡' | '💛' | '💚' | '💙' | '💜' => Marker::LoveEmoji,
        _ => return None,
    };
    Some(m)
}

// token + byte span in the expanded text
struct Lexed {
    token: Token,
    start: usize,
    end: usize,
}

impl Lexed {
    fn new(text: &str, kind: TokenKind, start: usize, end: usize) -> Self {
        Self {
            token: Token {
                text: text.to_string(),
                lower: text.to_lowercase(),
                kind,
                prefix: Vec::new(),
                negated: false,
                glued: false,
            },
            start,
            end,
        }
    }
}

fn expand_contractions(text: &str) -> String {
    let mut s = text.replace(['\u{2019}', '\u{2018}'], "'");
    for (re, rep) in CONTRACTIONS.iter() {
        s = re.replace_all(&s, *rep).into_owned();
    }
    s
}

fn lex(text: &str) -> Vec<Lexed> {
    let mut out = Vec::new();
    for caps in LEXER.captures_iter(text) {
        let Some((name, m)) = ["emoticon", "excitement", "confusion", "pause", "word", "other"]
            .into_iter()
            .find_map(|n| caps.name(n).map(|m| (n, m)))
        else {
            continue;
        };
        let (start, end) = (m.start(), m.end());
        let lexed = match name {
            "emoticon" => Lexed::new(
                m.as_str(),
                TokenKind::Marker(emoticon_marker(m.as_str())),
                start,
                end,
            ),
            "excitement" => Lexed::new(m.as_str(), TokenKind::Marker(Marker::Excitement), start, end),
            "confusion" => Lexed::new(m.as_str(), TokenKind::Marker(Marker::Confusion), start, end),
            "pause" => Lexed::new(m.as_str(), TokenKind::Marker(Marker::Pause), start, end),
            "word" => {
                let w = m.as_str().trim_matches('\'');
                if w.is_empty() {
                    Lexed::new(m.as_str(), TokenKind::Symbol, start, end)
                } else {
                    Lexed::new(w, TokenKind::Word, start, end)
                }
            }
            _ => {
                let c = m.as_str().chars().next().unwrap_or(' ');
                // variation selectors ride along with the preceding emoji
                if c == '\u{FE0F}' {
                    continue;
                }
                match emoji_marker(c) {
                    Some(mk) => Lexed::new(m.as_str(), TokenKind::Marker(mk), start, end),
                    None => Lexed::new(m.as_str(), TokenKind::Symbol, start, end),
                }
            }
        };
        out.push(lexed);
    }
    out
}

/// Fuse `modifier` onto the token after every trigger word that is followed by
/// whitespace. Consecutive triggers stack (`not not good` -> `NOT_NOT_good`).
fn fuse(tokens: Vec<Lexed>, modifier: Modifier, triggers: &BTreeSet<String>) -> Vec<Lexed> {
    let mut out = Vec::with_capacity(tokens.len());
    let mut pending = 0usize;
    let mut pending_start = None;
    let mut iter = tokens.into_iter().peekable();

    while let Some(mut cur) = iter.next() {
        let is_trigger = cur.token.prefix.is_empty()
            && cur.token.is_word()
            && triggers.contains(&cur.token.lower)
            && iter.peek().is_some_and(|next| next.start > cur.end);
        if is_trigger {
            pending += 1;
            pending_start.get_or_insert(cur.start);
            continue;
        }
        if pending > 0 {
            let mut prefix = vec![modifier; pending];
            prefix.append(&mut cur.token.prefix);
            cur.token.prefix = prefix;
            cur.start = pending_start.take().unwrap_or(cur.start);
            pending = 0;
        }
        out.push(cur);
    }
    out
}

fn mark_negation_scope(tokens: &mut [Lexed], lexicon: &LexiconSet) {
    for i in 0..tokens.len() {
        if tokens[i].token.has_prefix(Modifier::Negation) {
            tokens[i].token.negated = true;
        }
        let t = &tokens[i].token;
        let carries = t.negated
            && t.is_word()
            && (lexicon.intensifiers().contains(&t.lower) || lexicon.diminishers().contains(&t.lower));
        let end = tokens[i].end;
        if carries {
            if let Some(next) = tokens.get_mut(i + 1) {
                if next.start > end {
                    next.token.negated = true;
                }
            }
        }
    }
}

/// Normalize `text` against the lexicon's trigger lists. Total for any input.
pub fn normalize(text: &str, lexicon: &LexiconSet) -> NormalizedText {
    let original = text.trim().to_string();
    let expanded = expand_contractions(&original);

    let mut lexed = lex(&expanded);
    lexed = fuse(lexed, Modifier::Negation, lexicon.negations());
    mark_negation_scope(&mut lexed, lexicon);
    lexed = fuse(lexed, Modifier::Intensifier, lexicon.intensifiers());
    lexed = fuse(lexed, Modifier::Diminisher, lexicon.diminishers());

    let mut prev_end = None;
    let tokens = lexed
        .into_iter()
        .map(|mut l| {
            l.token.glued = prev_end == Some(l.start);
            prev_end = Some(l.end);
            l.token
        })
        .collect();

    NormalizedText { original, tokens }
}
