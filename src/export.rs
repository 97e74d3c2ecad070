//! CSV and JSON report export of stored results.

use anyhow::Context;
use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use crate::result::{BatchSummary, SentimentResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    #[default]
    Csv,
    Json,
}

impl ExportFormat {
    pub fn extension(self) -> &'static str {
        match self {
            ExportFormat::Csv => "csv",
            ExportFormat::Json => "json",
        }
    }

    pub fn content_type(self) -> &'static str {
        match self {
            ExportFormat::Csv => "text/csv; charset=utf-8",
            ExportFormat::Json => "application/json",
        }
    }
}

/// `sentiment-analysis-YYYY-MM-DD.<ext>`
pub fn export_filename(format: ExportFormat, now: DateTime<Utc>) -> String {
    format!("sentiment-analysis-{}.{}", now.format("%Y-%m-%d"), format.extension())
}

pub fn to_csv(results: &[SentimentResult]) -> anyhow::Result<String> {
    let mut wtr = csv::Writer::from_writer(Vec::new());
    wtr.write_record(["Text", "Sentiment", "Confidence", "Keywords", "Timestamp", "Source"])?;
    for r in results {
        let confidence = format!("{}%", (r.confidence * 100.0).round());
        let keywords = r.keywords.join(", ");
        let timestamp = r.timestamp.to_rfc3339_opts(SecondsFormat::Millis, true);
        wtr.write_record([
            r.text.as_str(),
            r.sentiment.as_str(),
            confidence.as_str(),
            keywords.as_str(),
            timestamp.as_str(),
            r.source.as_str(),
        ])?;
    }
    let bytes = wtr.into_inner().context("flushing csv writer")?;
    String::from_utf8(bytes).context("csv output is not utf-8")
}

#[derive(Debug, Serialize)]
struct JsonReport<'a> {
    export_date: DateTime<Utc>,
    total_results: usize,
    summary: BatchSummary,
    results: &'a [SentimentResult],
}

pub fn to_json_report(results: &[SentimentResult], now: DateTime<Utc>) -> anyhow::Result<String> {
    let report = JsonReport {
        export_date: now,
        total_results: results.len(),
        summary: BatchSummary::from_results(results),
        results,
    };
    Ok(serde_json::to_string_pretty(&report)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::result::Source;
    use crate::sentiment::{ScoreEntry, Sentiment};
    use chrono::TimeZone;

    fn sample() -> Vec<SentimentResult> {
        let mut r = SentimentResult::new(
            "Great, \"really\" great",
            ScoreEntry {
                sentiment: Sentiment::Positive,
                score: 0.876,
            },
            vec!["great".into(), "really".into()],
            Source::DirectInput,
        );
        r.timestamp = Utc.with_ymd_and_hms(2024, 3, 9, 12, 0, 0).unwrap();
        vec![r]
    }

    #[test]
    fn csv_quotes_and_rounds() {
        let csv = to_csv(&sample()).unwrap();
        let mut lines = csv.lines();
        assert_eq!(lines.next(), Some("Text,Sentiment,Confidence,Keywords,Timestamp,Source"));
        assert_eq!(
            lines.next(),
            Some("\"Great, \"\"really\"\" great\",positive,88%,\"great, really\",2024-03-09T12:00:00.000Z,Direct Input")
        );
    }

    #[test]
    fn json_report_shape() {
        let now = Utc.with_ymd_and_hms(2024, 3, 10, 8, 30, 0).unwrap();
        let v: serde_json::Value = serde_json::from_str(&to_json_report(&sample(), now).unwrap()).unwrap();
        assert_eq!(v["total_results"], 1);
        assert_eq!(v["summary"]["positive"], 1);
        assert_eq!(v["results"][0]["source"], "Direct Input");
        assert_eq!(export_filename(ExportFormat::Json, now), "sentiment-analysis-2024-03-10.json");
    }
}
