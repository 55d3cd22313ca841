//! Fake News Classifier Pipeline
//!
//! A fixed two-stage text classification pipeline:
//!
//! - **TF-IDF** over unigrams and bigrams, English stop words removed,
//!   vocabulary capped at the 5000 most frequent terms
//! - **Logistic regression** with L2 regularization (C = 1.0)
//!
//! ## Training
//!
//! ```bash
//! ./target/release/fakenews train --dataset ml/WELFake_Dataset.csv
//! ```
//!
//! The dataset is split 80/20 with a stratified, seeded shuffle. The
//! vectorizer and classifier are fitted on the 80% partition; the summary
//! reports holdout accuracy and per-class precision/recall/F1. The fitted
//! pipeline is then written atomically together with a vocabulary manifest.
//!
//! ## Prediction
//!
//! ```bash
//! ./target/release/fakenews predict "Senate passes the annual budget"
//! {"prediction":1,"confidence":0.87}
//! ```
//!
//! ## Configuration
//!
//! ```toml
//! [data]
//! csv_path = "ml/WELFake_Dataset.csv"
//! train_split = 0.8
//! seed = 42
//!
//! [features]
//! max_features = 5000
//! ngram_min = 1
//! ngram_max = 2
//!
//! [model]
//! c = 1.0
//! max_iter = 1000
//! tolerance = 0.0001
//!
//! [output]
//! model_path = "public/models/fake_news_model.json"
//! vocabulary_path = "public/models/vocabulary.json"
//! ```
//!
//! ## Module Structure
//!
//! - [`config`] - Configuration structures and loading
//! - [`data`] - Dataset records and CSV loading
//! - [`stopwords`] - English stop word list
//! - [`tfidf`] - TF-IDF vectorizer
//! - [`logistic`] - Logistic regression classifier
//! - [`split`] - Stratified train/holdout split
//! - [`evaluate`] - Classification metrics
//! - [`model`] - The persisted pipeline container
//! - [`save`] - Atomic artifact writes and the vocabulary manifest
//! - [`train`] - End-to-end training
//! - [`predict`] - Single text prediction with failure fallback
//! - `cli` - Command-line interface (`cli` feature)

#[cfg(feature = "cli")]
pub mod cli;
pub mod config;
pub mod data;
pub mod evaluate;
pub mod logistic;
pub mod model;
pub mod predict;
pub mod save;
pub mod split;
pub mod stopwords;
pub mod tfidf;
pub mod train;
