//! Built-in lexicon tables, curated from labelled review text.

pub(super) const POSITIVE_PHRASES: &[&str] = &[
    "love this",
    "absolutely amazing",
    "fantastic experience",
    "highly recommend",
    "exceeded expectations",
    "brilliant service",
    "outstanding quality",
    "perfect solution",
    "incredibly helpful",
    "wonderful experience",
    "great value",
    "excellent customer service",
    "top notch",
    "five stars",
    "best ever",
    "amazing quality",
    "superb performance",
    "delighted with",
    "thrilled about",
    "impressed by",
    "satisfied with results",
    "works perfectly",
    "exactly what needed",
    "beyond expectations",
    "remarkable improvement",
    "money well spent",
    "worth every penny",
    "highly satisfied",
    "would buy again",
];

pub(super) const POSITIVE_WORDS: &[&str] = &[
    "excellent",
    "amazing",
    "wonderful",
    "fantastic",
    "perfect",
    "outstanding",
    "brilliant",
    "superb",
    "magnificent",
    "delightful",
    "awesome",
    "great",
    "good",
    "love",
    "like",
    "enjoy",
    "happy",
    "pleased",
    "satisfied",
    "impressive",
    "remarkable",
    "exceptional",
    "marvelous",
    "terrific",
    "beautiful",
    "stunning",
    "incredible",
    "phenomenal",
    "spectacular",
    "flawless",
    "superior",
    "premium",
    "quality",
    "valuable",
    "helpful",
    "efficient",
    "reliable",
    "trustworthy",
    "professional",
    "friendly",
    "recommend",
    "thrilled",
    "delighted",
    "impressed",
];

pub(super) const NEGATIVE_PHRASES: &[&str] = &[
    "terrible experience",
    "worst ever",
    "complete waste",
    "total disaster",
    "absolutely awful",
    "horrible service",
    "disappointing quality",
    "poor performance",
    "not recommended",
    "avoid at all costs",
    "money wasted",
    "regret buying",
    "broken promises",
    "failed expectations",
    "useless product",
    "terrible support",
    "nightmare experience",
    "completely unsatisfied",
    "major problems",
    "serious issues",
    "does not work",
    "falling apart",
    "cheap quality",
    "overpriced junk",
    "waste of money",
    "total failure",
    "extremely disappointed",
    "never again",
];

pub(super) const NEGATIVE_WORDS: &[&str] = &[
    "terrible",
    "awful",
    "horrible",
    "disgusting",
    "disappointing",
    "pathetic",
    "atrocious",
    "dreadful",
    "appalling",
    "abysmal",
    "bad",
    "hate",
    "dislike",
    "annoying",
    "frustrating",
    "useless",
    "worthless",
    "poor",
    "worst",
    "unacceptable",
    "inadequate",
    "inferior",
    "defective",
    "faulty",
    "broken",
    "damaged",
    "unreliable",
    "unprofessional",
    "rude",
    "slow",
    "expensive",
    "overpriced",
    "cheap",
    "flimsy",
    "fragile",
    "uncomfortable",
    "disappointed",
    "regret",
    "waste",
    "failed",
    "disaster",
    "nightmare",
];

pub(super) const NEUTRAL_PHRASES: &[&str] = &[
    "it is okay",
    "average quality",
    "nothing special",
    "as expected",
    "standard service",
    "typical experience",
    "meets requirements",
    "basic functionality",
    "normal performance",
    "adequate solution",
    "fair price",
    "reasonable option",
    "could be better",
    "room for improvement",
    "mixed feelings",
    "pros and cons",
    "neither good nor bad",
    "middle of the road",
    "so so",
    "not bad not great",
];

pub(super) const NEUTRAL_WORDS: &[&str] = &[
    "okay",
    "average",
    "normal",
    "standard",
    "typical",
    "regular",
    "ordinary",
    "common",
    "usual",
    "basic",
    "moderate",
    "fair",
    "adequate",
    "acceptable",
    "reasonable",
    "decent",
    "sufficient",
    "mediocre",
    "mixed",
    "neutral",
    "balanced",
    "expected",
    "fine",
    "alright",
    "so-so",
    "middle",
];

pub(super) const INTENSIFIERS: &[&str] = &[
    "very",
    "extremely",
    "incredibly",
    "absolutely",
    "totally",
    "completely",
    "truly",
    "really",
    "quite",
    "beyond",
    "thoroughly",
    "simply",
    "utterly",
    "consistently",
];

pub(super) const DIMINISHERS: &[&str] = &["slightly", "somewhat", "rather", "quite", "fairly", "pretty"];

pub(super) const NEGATIONS: &[&str] = &[
    "not", "no", "never", "nothing", "nowhere", "nobody", "none", "neither", "nor",
];

/// Words whose presence must never end up neutral.
pub(super) const STRONG_POSITIVE: &[&str] = &[
    "love",
    "excellent",
    "amazing",
    "wonderful",
    "fantastic",
    "perfect",
    "outstanding",
    "brilliant",
    "superb",
    "magnificent",
    "awesome",
    "incredible",
    "phenomenal",
    "spectacular",
    "flawless",
    "exceptional",
];

pub(super) const STRONG_NEGATIVE: &[&str] = &[
    "hate",
    "terrible",
    "awful",
    "horrible",
    "disgusting",
    "pathetic",
    "atrocious",
    "dreadful",
    "appalling",
    "abysmal",
    "worst",
    "useless",
    "worthless",
    "unacceptable",
    "disaster",
    "nightmare",
    "regret",
    "waste",
    "failed",
    "broken",
    "damaged",
    "defective",
    "faulty",
];

/// English stopwords dropped by keyword extraction.
pub(super) const STOPWORDS: &[&str] = &[
    "the", "a", "an", "and", "or", "but", "in", "on", "at", "to", "for", "of", "with", "by",
    "this", "that", "these", "those", "i", "you", "he", "she", "it", "we", "they", "am", "is",
    "are", "was", "were", "be", "been", "being", "have", "has", "had", "do", "does", "did",
    "will", "would", "could", "should", "may", "might", "must", "can", "shall", "my", "your",
    "our", "their", "its", "his", "her", "them", "me", "us", "him", "what", "which", "who",
    "whom", "when", "where", "why", "how", "all", "any", "each", "from", "into", "than",
    "then", "there", "here", "also", "just", "only", "about", "over", "after", "before", "again",
    "because", "while", "some", "such", "own", "same", "too", "very", "says", "said", "ever",
    "not", "no", "nor", "so", "if", "as", "up", "out", "off", "one",
];
