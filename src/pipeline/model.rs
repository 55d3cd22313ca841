//! The fitted pipeline: vectorizer and classifier persisted as one unit.
//!
//! On disk this is a single JSON document:
//!
//! ```json
//! {
//!   "format_version": 1,
//!   "vectorizer": { "vocabulary": [...], "idf": [...], "max_features": 5000, "ngram_range": [1, 2] },
//!   "classifier": { "weights": [...], "intercept": 0.12 }
//! }
//! ```
//!
//! Loading checks the version first, then that the classifier and the
//! vocabulary have the same width.

use super::data::Label;
use super::logistic::LogisticRegression;
use super::tfidf::TfidfVectorizer;
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::debug;

/// Current artifact layout version.
pub const FORMAT_VERSION: u32 = 1;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FakeNewsModel {
    pub format_version: u32,
    pub vectorizer: TfidfVectorizer,
    pub classifier: LogisticRegression,
}

#[derive(Deserialize)]
struct VersionProbe {
    format_version: u32,
}

impl FakeNewsModel {
    /// Bundle a fitted vectorizer and classifier.
    pub fn new(vectorizer: TfidfVectorizer, classifier: LogisticRegression) -> Result<Self> {
        let model = FakeNewsModel {
            format_version: FORMAT_VERSION,
            vectorizer,
            classifier,
        };
        model.validate()?;
        Ok(model)
    }

    pub fn validate(&self) -> Result<()> {
        if self.format_version != FORMAT_VERSION {
            return Err(Error::UnsupportedFormatVersion {
                found: self.format_version,
                expected: FORMAT_VERSION,
            });
        }
        self.classifier.validate(self.vectorizer.len())
    }

    /// Parse and validate an artifact held in memory.
    pub fn from_json(json: &str) -> Result<Self> {
        let probe: VersionProbe = serde_json::from_str(json)?;
        if probe.format_version != FORMAT_VERSION {
            return Err(Error::UnsupportedFormatVersion {
                found: probe.format_version,
                expected: FORMAT_VERSION,
            });
        }
        let model: FakeNewsModel = serde_json::from_str(json)?;
        model.validate()?;
        Ok(model)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Load a model artifact from disk.
    pub fn load(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        let model = Self::from_json(&json)?;
        debug!(
            path = %path.display(),
            features = model.vectorizer.len(),
            "model artifact loaded"
        );
        Ok(model)
    }

    /// `[p(fake), p(real)]` for one document.
    pub fn predict_proba(&self, text: &str) -> [f64; 2] {
        let row = self.vectorizer.transform(text);
        self.classifier.predict_proba(&row)
    }

    pub fn predict_label(&self, text: &str) -> Label {
        let row = self.vectorizer.transform(text);
        self.classifier.predict(&row)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tiny_model() -> FakeNewsModel {
        let mut vectorizer = TfidfVectorizer::new(10, (1, 1));
        vectorizer.fit(&["senate budget", "aliens hoax"]);
        let classifier = LogisticRegression {
            weights: vec![-1.0, 1.0, -1.0, 1.0],
            intercept: 0.0,
        };
        FakeNewsModel::new(vectorizer, classifier).unwrap()
    }

    #[test]
    fn test_json_roundtrip() {
        let model = tiny_model();
        let restored = FakeNewsModel::from_json(&model.to_json().unwrap()).unwrap();
        for probe in ["senate budget", "aliens", ""] {
            assert_eq!(restored.predict_proba(probe), model.predict_proba(probe));
        }
    }

    #[test]
    fn test_future_version_is_rejected() {
        let mut value: serde_json::Value =
            serde_json::from_str(&tiny_model().to_json().unwrap()).unwrap();
        value["format_version"] = serde_json::json!(99);
        let err = FakeNewsModel::from_json(&value.to_string()).unwrap_err();
        assert!(matches!(
            err,
            Error::UnsupportedFormatVersion { found: 99, expected: FORMAT_VERSION }
        ));
    }

    #[test]
    fn test_weight_mismatch_is_rejected() {
        let mut value: serde_json::Value =
            serde_json::from_str(&tiny_model().to_json().unwrap()).unwrap();
        value["classifier"]["weights"] = serde_json::json!([0.5]);
        let err = FakeNewsModel::from_json(&value.to_string()).unwrap_err();
        assert!(matches!(err, Error::IncompatibleModel(_)));
    }

    #[test]
    fn test_truncated_artifact_is_rejected() {
        let json = tiny_model().to_json().unwrap();
        let truncated = &json[..json.len() / 2];
        assert!(FakeNewsModel::from_json(truncated).is_err());
    }

    #[test]
    fn test_predict_label_uses_weights() {
        let model = tiny_model();
        // vocabulary is sorted: aliens, budget, hoax, senate
        assert_eq!(model.predict_label("aliens hoax"), Label::Fake);
        assert_eq!(model.predict_label("senate budget"), Label::Real);
    }
}
