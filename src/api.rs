//! High-level API for fake news prediction
//!
//! # Quick Start
//!
//! ```no_run
//! use fakenews::api::Predictor;
//!
//! let predictor = Predictor::load("public/models/fake_news_model.json")?;
//! let result = predictor.predict("Senate passes the annual budget");
//! println!("{} ({:.1}%)", result.label, result.confidence * 100.0);
//! # Ok::<(), fakenews::Error>(())
//! ```
//!
//! # Never-failing prediction
//!
//! Callers that must always get a well-formed answer use [`predict`], which
//! folds every load or inference error into [`PredictionOutcome::Failure`]:
//!
//! ```no_run
//! use fakenews::api::predict;
//! use std::path::Path;
//!
//! let outcome = predict(Path::new("public/models/fake_news_model.json"), "some text");
//! println!("{}", serde_json::to_string(&outcome.to_record()).unwrap());
//! ```

use crate::error::Result;
use crate::model_loader::{ensure_model_file, ModelFiles};
use crate::pipeline::model::FakeNewsModel;
use rayon::prelude::*;
use std::fmt;
use std::path::{Path, PathBuf};

pub use crate::pipeline::data::Label;
pub use crate::pipeline::predict::{
    predict_single as predict, Prediction, PredictionOutcome, PredictionRecord,
    FALLBACK_CONFIDENCE,
};

/// A loaded, immutable model ready to score text.
#[derive(Debug, Clone)]
pub struct Predictor {
    model: FakeNewsModel,
    path: PathBuf,
}

impl Predictor {
    /// Load and validate the model artifact at `path`.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - the artifact does not exist
    /// - it cannot be read or parsed
    /// - its format version or dimensions do not match
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        ensure_model_file(path)?;
        let model = FakeNewsModel::load(path)?;
        Ok(Self {
            model,
            path: path.to_path_buf(),
        })
    }

    /// Load the artifact named by a [`ModelFiles`] set.
    pub fn with_files(files: &ModelFiles) -> Result<Self> {
        Self::load(&files.model)
    }

    /// Wrap an in-memory model, e.g. straight after training.
    pub fn from_model(model: FakeNewsModel) -> Self {
        Self {
            model,
            path: PathBuf::new(),
        }
    }

    /// Classify one text.
    ///
    /// Works for any input, including the empty string and text made
    /// entirely of unseen words. The same text always yields the same result.
    pub fn predict(&self, text: &str) -> Prediction {
        Prediction::from_probabilities(self.model.predict_proba(text))
    }

    /// Classify several texts.
    pub fn predict_batch(&self, texts: &[&str]) -> Vec<Prediction> {
        self.model
            .vectorizer
            .transform_batch(texts)
            .par_iter()
            .map(|row| Prediction::from_probabilities(self.model.classifier.predict_proba(row)))
            .collect()
    }

    pub fn model(&self) -> &FakeNewsModel {
        &self.model
    }

    /// Information about the loaded model
    pub fn model_info(&self) -> ModelInfo {
        ModelInfo {
            path: self.path.clone(),
            format_version: self.model.format_version,
            vocabulary_size: self.model.vectorizer.len(),
        }
    }
}

/// Information about the loaded model
#[derive(Debug, Clone)]
pub struct ModelInfo {
    pub path: PathBuf,
    pub format_version: u32,
    pub vocabulary_size: usize,
}

impl fmt::Display for Prediction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} (confidence: {:.2}%)",
            self.label,
            self.confidence * 100.0
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::logistic::LogisticRegression;
    use crate::pipeline::tfidf::TfidfVectorizer;

    fn predictor() -> Predictor {
        let mut vectorizer = TfidfVectorizer::new(10, (1, 1));
        vectorizer.fit(&["senate budget", "aliens hoax"]);
        // aliens, budget, hoax, senate
        let classifier = LogisticRegression {
            weights: vec![-2.0, 2.0, -2.0, 2.0],
            intercept: 0.1,
        };
        Predictor::from_model(FakeNewsModel::new(vectorizer, classifier).unwrap())
    }

    #[test]
    fn test_predict_in_range() {
        let p = predictor();
        for text in ["senate budget", "aliens hoax", "", "never seen before"] {
            let r = p.predict(text);
            assert!((0.0..=1.0).contains(&r.confidence));
            assert!(r.confidence >= 0.5);
        }
    }

    #[test]
    fn test_batch_matches_single() {
        let p = predictor();
        let texts = ["senate budget", "aliens hoax", ""];
        let batch = p.predict_batch(&texts);
        for (text, result) in texts.iter().zip(&batch) {
            assert_eq!(*result, p.predict(text));
        }
    }

    #[test]
    fn test_empty_text_uses_intercept() {
        let r = predictor().predict("");
        assert_eq!(r.label, Label::Real);
    }

    #[test]
    fn test_load_missing_artifact() {
        let err = Predictor::load("/nonexistent/fake_news_model.json").unwrap_err();
        assert!(matches!(err, crate::Error::ModelNotFound(_)));
    }
}
