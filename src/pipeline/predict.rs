//! Single text prediction against a persisted model.
//!
//! [`predict_single`] is the boundary used by unattended callers: it never
//! returns an error. Any failure to load or apply the model comes back as
//! [`PredictionOutcome::Failure`], which serializes to the neutral record
//! `{"prediction": 0, "confidence": 0.5, "error": "..."}`.

use super::data::Label;
use crate::api::Predictor;
use serde::Serialize;
use std::path::Path;
use tracing::warn;

/// Confidence reported when no prediction could be made.
pub const FALLBACK_CONFIDENCE: f64 = 0.5;

/// Result of scoring one text with a loaded model.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Prediction {
    pub label: Label,
    /// Probability of the predicted class, i.e. `max(p_fake, p_real)`
    pub confidence: f64,
    /// `[p(fake), p(real)]`
    pub probabilities: [f64; 2],
}

impl Prediction {
    pub fn from_probabilities(probabilities: [f64; 2]) -> Self {
        let [p_fake, p_real] = probabilities;
        let label = if p_real > p_fake {
            Label::Real
        } else {
            Label::Fake
        };
        Prediction {
            label,
            confidence: p_fake.max(p_real),
            probabilities,
        }
    }
}

/// Tagged result of [`predict_single`].
#[derive(Debug, Clone, PartialEq)]
pub enum PredictionOutcome {
    Success { prediction: Label, confidence: f64 },
    Failure { diagnostic: String },
}

/// Wire format of a prediction.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PredictionRecord {
    pub prediction: u8,
    pub confidence: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl PredictionOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, PredictionOutcome::Success { .. })
    }

    pub fn to_record(&self) -> PredictionRecord {
        match self {
            PredictionOutcome::Success {
                prediction,
                confidence,
            } => PredictionRecord {
                prediction: prediction.as_u8(),
                confidence: *confidence,
                error: None,
            },
            PredictionOutcome::Failure { diagnostic } => PredictionRecord {
                prediction: Label::Fake.as_u8(),
                confidence: FALLBACK_CONFIDENCE,
                error: Some(diagnostic.clone()),
            },
        }
    }
}

impl From<Prediction> for PredictionOutcome {
    fn from(p: Prediction) -> Self {
        PredictionOutcome::Success {
            prediction: p.label,
            confidence: p.confidence,
        }
    }
}

/// Load the model at `model_path` and classify `text`.
pub fn predict_single(model_path: &Path, text: &str) -> PredictionOutcome {
    match Predictor::load(model_path) {
        Ok(predictor) => predictor.predict(text).into(),
        Err(e) => {
            warn!(path = %model_path.display(), error = %e, "prediction failed");
            PredictionOutcome::Failure {
                diagnostic: e.to_string(),
            }
        }
    }
}
