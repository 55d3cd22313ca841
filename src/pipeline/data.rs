//! Dataset records and CSV loading.

use crate::error::{Error, Result};
use csv::ReaderBuilder;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs::File;
use std::path::Path;
use tracing::info;

/// Binary news label. The numeric values match the dataset encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
pub enum Label {
    Fake = 0,
    Real = 1,
}

impl Label {
    pub const ALL: [Label; 2] = [Label::Fake, Label::Real];

    pub fn as_u8(self) -> u8 {
        self as u8
    }

    pub fn from_u8(value: u8) -> Option<Self> {
        match value {
            0 => Some(Label::Fake),
            1 => Some(Label::Real),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Label::Fake => "Fake",
            Label::Real => "Real",
        }
    }
}

impl From<Label> for u8 {
    fn from(label: Label) -> u8 {
        label.as_u8()
    }
}

impl TryFrom<u8> for Label {
    type Error = String;

    fn try_from(value: u8) -> std::result::Result<Self, Self::Error> {
        Label::from_u8(value).ok_or_else(|| format!("label must be 0 or 1, got {value}"))
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A single labeled news article.
#[derive(Debug, Clone, PartialEq)]
pub struct NewsRecord {
    pub title: String,
    pub text: String,
    pub label: Label,
}

impl NewsRecord {
    /// Text fed to the vectorizer: `title + " " + text`.
    pub fn effective_text(&self) -> String {
        format!("{} {}", self.title, self.text)
    }
}

/// Row as it appears in the CSV. Missing cells become empty strings.
#[derive(Debug, Deserialize)]
struct RawRecord {
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    text: Option<String>,
    #[serde(default)]
    label: Option<String>,
}

fn parse_label(raw: Option<&str>, row: usize) -> Result<Label> {
    let value = raw.unwrap_or("").trim();
    let parsed = match value {
        "0" => Some(Label::Fake),
        "1" => Some(Label::Real),
        other => other
            .parse::<f64>()
            .ok()
            .filter(|v| v.fract() == 0.0)
            .and_then(|v| match v as i64 {
                0 => Some(Label::Fake),
                1 => Some(Label::Real),
                _ => None,
            }),
    };
    parsed.ok_or_else(|| Error::InvalidLabel {
        row,
        value: value.to_string(),
    })
}

/// Load the labeled dataset.
///
/// Fails with [`Error::DatasetNotFound`] before opening anything when `path`
/// does not exist. Rows are numbered from 1, excluding the header.
pub fn load_records(path: &Path) -> Result<Vec<NewsRecord>> {
    if !path.exists() {
        return Err(Error::DatasetNotFound(path.to_path_buf()));
    }

    let file = File::open(path)?;
    let mut reader = ReaderBuilder::new().has_headers(true).from_reader(file);

    let mut records = Vec::new();
    for (idx, result) in reader.deserialize::<RawRecord>().enumerate() {
        let raw = result?;
        let label = parse_label(raw.label.as_deref(), idx + 1)?;
        records.push(NewsRecord {
            title: raw.title.unwrap_or_default(),
            text: raw.text.unwrap_or_default(),
            label,
        });
    }

    info!(path = %path.display(), rows = records.len(), "dataset loaded");
    Ok(records)
}

/// Count of (fake, real) records.
pub fn class_balance(labels: &[Label]) -> (usize, usize) {
    let real = labels.iter().filter(|&&l| l == Label::Real).count();
    (labels.len() - real, real)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_csv(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_missing_dataset() {
        let err = load_records(Path::new("/nonexistent/news.csv")).unwrap_err();
        assert!(matches!(err, Error::DatasetNotFound(_)));
    }

    #[test]
    fn test_missing_fields_become_empty() {
        let file = write_csv(",title,text,label\n0,,body only,1\n1,headline,,0\n");
        let records = load_records(file.path()).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].title, "");
        assert_eq!(records[0].effective_text(), " body only");
        assert_eq!(records[0].label, Label::Real);
        assert_eq!(records[1].text, "");
        assert_eq!(records[1].label, Label::Fake);
    }

    #[test]
    fn test_invalid_label_names_row() {
        let file = write_csv("title,text,label\na,b,0\nc,d,7\n");
        match load_records(file.path()).unwrap_err() {
            Error::InvalidLabel { row, value } => {
                assert_eq!(row, 2);
                assert_eq!(value, "7");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_float_encoded_labels() {
        let file = write_csv("title,text,label\na,b,1.0\nc,d,0.0\n");
        let records = load_records(file.path()).unwrap();
        assert_eq!(records[0].label, Label::Real);
        assert_eq!(records[1].label, Label::Fake);
    }

    #[test]
    fn test_class_balance() {
        let labels = [Label::Fake, Label::Real, Label::Real];
        assert_eq!(class_balance(&labels), (1, 2));
    }
}
