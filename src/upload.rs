//! Parse uploaded `.txt` / `.csv` files into texts for batch analysis.

use serde::Serialize;
use thiserror::Error;

use crate::config::Limits;
use crate::validate::validate_text;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UploadError {
    #[error("File size too large. Maximum size is {max_mb}MB")]
    TooLarge { max_mb: usize },
    #[error("Invalid file format. Only .txt and .csv files are supported")]
    UnsupportedFormat,
    #[error("File is empty or contains no readable text")]
    Empty,
    #[error("Too many texts in file. Maximum {max} texts allowed")]
    TooManyTexts { max: usize },
    #[error("No valid texts found in file. All texts are either empty or too short")]
    NoValidTexts,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UploadFormat {
    Txt,
    Csv,
}

impl UploadFormat {
    pub fn from_filename(name: &str) -> Option<Self> {
        let ext = name.rsplit_once('.')?.1.to_ascii_lowercase();
        match ext.as_str() {
            "txt" => Some(UploadFormat::Txt),
            "csv" => Some(UploadFormat::Csv),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ParsedUpload {
    pub texts: Vec<String>,
    /// `Line N: reason` for each skipped line.
    pub warnings: Vec<String>,
}

pub fn parse_upload(filename: &str, content: &str, limits: &Limits) -> Result<ParsedUpload, UploadError> {
    if content.len() > limits.max_upload_bytes {
        return Err(UploadError::TooLarge {
            max_mb: limits.max_upload_bytes / (1024 * 1024),
        });
    }
    let format = UploadFormat::from_filename(filename).ok_or(UploadError::UnsupportedFormat)?;
    if content.trim().is_empty() {
        return Err(UploadError::Empty);
    }

    let lines = match format {
        UploadFormat::Txt => txt_lines(content),
        UploadFormat::Csv => csv_first_column(content),
    };
    if lines.is_empty() {
        return Err(UploadError::Empty);
    }
    if lines.len() > limits.max_batch {
        return Err(UploadError::TooManyTexts {
            max: limits.max_batch,
        });
    }

    let mut out = ParsedUpload::default();
    for (i, line) in lines.into_iter().enumerate() {
        match validate_text(&line, limits) {
            Ok(()) => out.texts.push(line),
            Err(e) => out.warnings.push(format!("Line {}: {e}", i + 1)),
        }
    }
    if out.texts.is_empty() {
        return Err(UploadError::NoValidTexts);
    }
    Ok(out)
}

fn txt_lines(content: &str) -> Vec<String> {
    content
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .map(str::to_string)
        .collect()
}

fn csv_first_column(content: &str) -> Vec<String> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(content.as_bytes());

    rdr.records()
        // a malformed row is skipped rather than failing the whole file
        .filter_map(Result::ok)
        .filter_map(|rec| rec.get(0).map(|f| f.trim_matches(['"', '\'']).trim().to_string()))
        .filter(|f| !f.is_empty())
        .collect()
}
