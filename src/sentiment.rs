//! Sentiment classes and the three-entry score distribution the engine returns.
//!
//! The distribution is the stable contract consumed by the dashboard: exactly one
//! entry per class, scores summing to 1, sorted descending with a fixed tie-break.

use serde::ser::SerializeStruct;
use serde::{Deserialize, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// The three sentiment classes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sentiment {
    Positive,
    Negative,
    Neutral,
}

impl Sentiment {
    pub const ALL: [Sentiment; 3] = [Sentiment::Positive, Sentiment::Negative, Sentiment::Neutral];

    pub fn as_str(self) -> &'static str {
        match self {
            Sentiment::Positive => "positive",
            Sentiment::Negative => "negative",
            Sentiment::Neutral => "neutral",
        }
    }

    /// Fixed label identifier used in the raw distribution
    /// (`LABEL_0` negative, `LABEL_1` neutral, `LABEL_2` positive).
    pub fn label_id(self) -> &'static str {
        match self {
            Sentiment::Negative => "LABEL_0",
            Sentiment::Neutral => "LABEL_1",
            Sentiment::Positive => "LABEL_2",
        }
    }

    /// Inverse of [`Sentiment::label_id`]. Unknown labels map to neutral.
    pub fn from_label_id(label: &str) -> Self {
        match label {
            "LABEL_2" => Sentiment::Positive,
            "LABEL_0" => Sentiment::Negative,
            _ => Sentiment::Neutral,
        }
    }

    /// Tie-break rank: lower wins (positive > negative > neutral).
    fn priority(self) -> u8 {
        match self {
            Sentiment::Positive => 0,
            Sentiment::Negative => 1,
            Sentiment::Neutral => 2,
        }
    }
}

impl fmt::Display for Sentiment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Sentiment {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "positive" => Ok(Sentiment::Positive),
            "negative" => Ok(Sentiment::Negative),
            "neutral" => Ok(Sentiment::Neutral),
            other => anyhow::bail!("unknown sentiment `{other}`"),
        }
    }
}

/// One `{label, score}` pair.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoreEntry {
    pub sentiment: Sentiment,
    pub score: f64,
}

impl Serialize for ScoreEntry {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut st = serializer.serialize_struct("ScoreEntry", 3)?;
        st.serialize_field("label", self.sentiment.label_id())?;
        st.serialize_field("sentiment", &self.sentiment)?;
        st.serialize_field("score", &self.score)?;
        st.end()
    }
}

/// Ranked distribution over the three classes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ScoreDistribution {
    entries: [ScoreEntry; 3],
}

impl ScoreDistribution {
    /// Build from per-class scores. Sorts descending with the fixed tie-break.
    pub fn from_scores(positive: f64, negative: f64, neutral: f64) -> Self {
        let mut entries = [
            ScoreEntry {
                sentiment: Sentiment::Positive,
                score: positive,
            },
            ScoreEntry {
                sentiment: Sentiment::Negative,
                score: negative,
            },
            ScoreEntry {
                sentiment: Sentiment::Neutral,
                score: neutral,
            },
        ];
        entries.sort_by(|a, b| {
            b.score
                .total_cmp(&a.score)
                .then(a.sentiment.priority().cmp(&b.sentiment.priority()))
        });
        Self { entries }
    }

    pub fn entries(&self) -> &[ScoreEntry; 3] {
        &self.entries
    }

    /// Top-ranked entry: the sentiment and its confidence.
    pub fn top(&self) -> ScoreEntry {
        self.entries[0]
    }

    pub fn score_of(&self, sentiment: Sentiment) -> f64 {
        self.entries
            .iter()
            .find(|e| e.sentiment == sentiment)
            .map(|e| e.score)
            .unwrap_or(0.0)
    }

    pub fn sum(&self) -> f64 {
        self.entries.iter().map(|e| e.score).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ties_resolve_positive_then_negative_then_neutral() {
        let d = ScoreDistribution::from_scores(0.3, 0.3, 0.3);
        let order: Vec<_> = d.entries().iter().map(|e| e.sentiment).collect();
        assert_eq!(
            order,
            vec![Sentiment::Positive, Sentiment::Negative, Sentiment::Neutral]
        );

        let d = ScoreDistribution::from_scores(0.2, 0.4, 0.4);
        assert_eq!(d.top().sentiment, Sentiment::Negative);
    }

    #[test]
    fn label_ids_round_trip_and_serialize() {
        for s in Sentiment::ALL {
            assert_eq!(Sentiment::from_label_id(s.label_id()), s);
        }
        let d = ScoreDistribution::from_scores(0.7, 0.2, 0.1);
        let v = serde_json::to_value(d).unwrap();
        assert_eq!(v[0]["label"], "LABEL_2");
        assert_eq!(v[0]["sentiment"], "positive");
    }

    #[test]
    fn parses_case_insensitively() {
        assert_eq!("Positive".parse::<Sentiment>().unwrap(), Sentiment::Positive);
        assert!("angry".parse::<Sentiment>().is_err());
    }
}
