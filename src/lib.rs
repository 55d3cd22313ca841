//! # fakenews - Fake News Classifier
//!
//! Classifies a short news passage as fake (`0`) or real (`1`) with a
//! TF-IDF + logistic regression pipeline, in pure Rust.
//!
//! ## Quick Start
//!
//! ### Training
//!
//! ```no_run
//! use fakenews::pipeline::config::Config;
//! use fakenews::pipeline::train::train_model;
//!
//! let config = Config::load_or_default("config.toml")?;
//! let report = train_model(&config)?;
//! println!("{report}");
//! # Ok::<(), fakenews::Error>(())
//! ```
//!
//! ### Prediction
//!
//! ```no_run
//! use fakenews::api::Predictor;
//!
//! let predictor = Predictor::load("public/models/fake_news_model.json")?;
//! let result = predictor.predict("Scientists confirm the moon is made of cheese");
//! println!("Label: {}", result.label);
//! println!("Confidence: {:.1}%", result.confidence * 100.0);
//! # Ok::<(), fakenews::Error>(())
//! ```
//!
//! ## Artifacts
//!
//! | File | Contents | Needed for prediction |
//! |------|----------|-----------------------|
//! | `fake_news_model.json` | vocabulary, IDF weights, classifier weights | ✓ |
//! | `vocabulary.json` | learned terms and their count | ✗ |
//!
//! The model file carries a `format_version`; loading rejects unknown
//! versions and artifacts whose parts do not line up.
//!
//! ## Features
//!
//! | Feature | Description | Default |
//! |---------|-------------|---------|
//! | `cli` | Include CLI binary | ✓ |
//!
//! ## Error Handling
//!
//! Training errors are returned as [`Error`]. Prediction through
//! [`api::predict`] never fails; errors become a neutral
//! `{"prediction": 0, "confidence": 0.5, "error": ...}` record:
//!
//! ```no_run
//! use fakenews::api::predict;
//! use std::path::Path;
//!
//! let outcome = predict(Path::new("missing.json"), "text");
//! assert!(!outcome.is_success());
//! assert_eq!(outcome.to_record().confidence, 0.5);
//! ```

pub mod api;
pub mod error;
pub mod model_loader;
pub mod pipeline;

pub use error::{Error, Result};
pub use pipeline::data::{Label, NewsRecord};
pub use pipeline::model::FakeNewsModel;
pub use pipeline::tfidf::TfidfVectorizer;
