//! Comparative grouping of stored results (by source, age, confidence, length).

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::result::{BatchSummary, SentimentResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GroupBy {
    #[default]
    Source,
    Time,
    Confidence,
    Length,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComparisonGroup {
    pub name: String,
    #[serde(flatten)]
    pub summary: BatchSummary,
}

/// Buckets in display order; empty ones are dropped. Fewer than two results
/// give nothing to compare.
pub fn group_results(results: &[SentimentResult], by: GroupBy, now: DateTime<Utc>) -> Vec<ComparisonGroup> {
    if results.len() < 2 {
        return Vec::new();
    }

    let buckets: Vec<(String, Vec<SentimentResult>)> = match by {
        GroupBy::Source => {
            let mut out: Vec<(String, Vec<SentimentResult>)> = Vec::new();
            for r in results {
                let name = r.source.as_str();
                match out.iter_mut().find(|(n, _)| n.as_str() == name) {
                    Some((_, v)) => v.push(r.clone()),
                    None => out.push((name.to_string(), vec![r.clone()])),
                }
            }
            out
        }
        _ => bucket_names(by)
            .iter()
            .map(|name| {
                let members = results
                    .iter()
                    .filter(|r| bucket_of(r, by, now) == *name)
                    .cloned()
                    .collect();
                (name.to_string(), members)
            })
            .collect(),
    };

    buckets
        .into_iter()
        .filter(|(_, v)| !v.is_empty())
        .map(|(name, v)| ComparisonGroup {
            name,
            summary: BatchSummary::from_results(&v),
        })
        .collect()
}

fn bucket_names(by: GroupBy) -> &'static [&'static str] {
    match by {
        GroupBy::Source => &[],
        GroupBy::Time => &["Last Hour", "Last 24 Hours", "Older"],
        GroupBy::Confidence => &[
            "High Confidence (80%+)",
            "Medium Confidence (60-79%)",
            "Low Confidence (<60%)",
        ],
        GroupBy::Length => &["Short (< 50 chars)", "Medium (50-200 chars)", "Long (200+ chars)"],
    }
}

fn bucket_of(r: &SentimentResult, by: GroupBy, now: DateTime<Utc>) -> &'static str {
    let names = bucket_names(by);
    let idx = match by {
        GroupBy::Source => return r.source.as_str(),
        GroupBy::Time => {
            if r.timestamp > now - Duration::hours(1) {
                0
            } else if r.timestamp > now - Duration::hours(24) {
                1
            } else {
                2
            }
        }
        GroupBy::Confidence => {
            if r.confidence >= 0.8 {
                0
            } else if r.confidence >= 0.6 {
                1
            } else {
                2
            }
        }
        GroupBy::Length => match r.text.chars().count() {
            0..=49 => 0,
            50..=199 => 1,
            _ => 2,
        },
    };
    names[idx]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::result::Source;
    use crate::sentiment::{ScoreEntry, Sentiment};

    fn r(text: &str, score: f64, source: Source, age_min: i64, now: DateTime<Utc>) -> SentimentResult {
        let mut r = SentimentResult::new(
            text,
            ScoreEntry {
                sentiment: Sentiment::Positive,
                score,
            },
            vec![],
            source,
        );
        r.timestamp = now - Duration::minutes(age_min);
        r
    }

    #[test]
    fn groups_by_source_in_first_seen_order() {
        let now = Utc::now();
        let rs = vec![
            r("aaa", 0.9, Source::FileUpload, 0, now),
            r("bbb", 0.7, Source::DirectInput, 0, now),
            r("ccc", 0.5, Source::FileUpload, 0, now),
        ];
        let g = group_results(&rs, GroupBy::Source, now);
        assert_eq!(g.len(), 2);
        assert_eq!(g[0].name, "File Upload");
        assert_eq!(g[0].summary.total, 2);
        assert!((g[0].summary.average_confidence - 0.7).abs() < 1e-12);
    }

    #[test]
    fn time_and_confidence_buckets_skip_empty() {
        let now = Utc::now();
        let rs = vec![
            r("aaa", 0.85, Source::DirectInput, 5, now),
            r("bbb", 0.65, Source::DirectInput, 120, now),
            r("ccc", 0.62, Source::DirectInput, 60 * 48, now),
        ];
        let names: Vec<_> = group_results(&rs, GroupBy::Time, now).into_iter().map(|g| g.name).collect();
        assert_eq!(names, vec!["Last Hour", "Last 24 Hours", "Older"]);

        let names: Vec<_> = group_results(&rs, GroupBy::Confidence, now)
            .into_iter()
            .map(|g| g.name)
            .collect();
        assert_eq!(names, vec!["High Confidence (80%+)", "Medium Confidence (60-79%)"]);
    }

    #[test]
    fn length_buckets_and_too_few_results() {
        let now = Utc::now();
        let long = "x".repeat(250);
        let rs = vec![r("short", 0.9, Source::DirectInput, 0, now), r(&long, 0.9, Source::DirectInput, 0, now)];
        let names: Vec<_> = group_results(&rs, GroupBy::Length, now).into_iter().map(|g| g.name).collect();
        assert_eq!(names, vec!["Short (< 50 chars)", "Long (200+ chars)"]);
        assert!(group_results(&rs[..1], GroupBy::Length, now).is_empty());
    }
}
