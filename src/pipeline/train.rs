//! Model training pipeline for the fake news classifier.

use super::config::Config;
use super::data::{class_balance, load_records, Label, NewsRecord};
use super::evaluate::ClassificationReport;
use super::logistic::{FitSummary, LogisticParams, LogisticRegression};
use super::model::FakeNewsModel;
use super::save::save_model;
use super::split::stratified_split;
use super::tfidf::TfidfVectorizer;
use crate::error::{Error, Result};
use crate::model_loader::ModelFiles;
use std::fmt;
use std::time::{Duration, Instant};
use tracing::info;

/// Summary of one training run.
#[derive(Debug, Clone)]
pub struct TrainingReport {
    pub dataset_size: usize,
    pub fake_count: usize,
    pub real_count: usize,
    pub train_size: usize,
    pub holdout_size: usize,
    pub vocabulary_size: usize,
    pub holdout: ClassificationReport,
    pub fit: FitSummary,
    pub duration: Duration,
    pub files: ModelFiles,
}

/// Fit vectorizer and classifier on the given texts.
///
/// The vectorizer only ever sees `texts`; callers pass the training
/// partition here, never the holdout.
pub fn fit_pipeline(
    texts: &[String],
    labels: &[Label],
    config: &Config,
) -> Result<(FakeNewsModel, FitSummary)> {
    if texts.is_empty() {
        return Err(Error::EmptyDataset);
    }

    let features = &config.features;
    let mut vectorizer =
        TfidfVectorizer::new(features.max_features, (features.ngram_min, features.ngram_max));
    vectorizer.fit(texts);
    info!(vocabulary = vectorizer.len(), "TF-IDF vectorizer fitted");

    let rows = vectorizer.transform_batch(texts);
    let params = LogisticParams {
        c: config.model.c,
        max_iter: config.model.max_iter,
        tolerance: config.model.tolerance,
    };
    let (classifier, summary) =
        LogisticRegression::fit(&rows, labels, vectorizer.len(), &params)?;

    Ok((FakeNewsModel::new(vectorizer, classifier)?, summary))
}

/// Score `model` against labeled texts.
pub fn evaluate(model: &FakeNewsModel, texts: &[String], labels: &[Label]) -> ClassificationReport {
    let predictions: Vec<Label> = texts.iter().map(|t| model.predict_label(t)).collect();
    ClassificationReport::compute(&predictions, labels)
}

/// Train the classifier end to end and persist the artifacts.
///
/// 1. Load the dataset (fails before anything else when it is missing)
/// 2. Stratified split into training and holdout partitions
/// 3. Fit TF-IDF + logistic regression on the training partition
/// 4. Evaluate on the holdout partition
/// 5. Save the pipeline and vocabulary manifest
///
/// The artifact is written whatever the holdout accuracy.
pub fn train_model(config: &Config) -> Result<TrainingReport> {
    config.validate()?;
    let start = Instant::now();

    let records = load_records(&config.data.csv_path)?;
    if records.is_empty() {
        return Err(Error::EmptyDataset);
    }

    let texts: Vec<String> = records.iter().map(NewsRecord::effective_text).collect();
    let labels: Vec<Label> = records.iter().map(|r| r.label).collect();
    let (fake_count, real_count) = class_balance(&labels);
    info!(rows = records.len(), real = real_count, fake = fake_count, "class balance");

    let split = stratified_split(&labels, 1.0 - config.data.train_split, config.data.seed);
    let pick = |idx: &[usize]| -> (Vec<String>, Vec<Label>) {
        idx.iter().map(|&i| (texts[i].clone(), labels[i])).unzip()
    };
    let (train_texts, train_labels) = pick(&split.train);
    let (test_texts, test_labels) = pick(&split.test);

    let (model, fit) = fit_pipeline(&train_texts, &train_labels, config)?;

    let holdout = evaluate(&model, &test_texts, &test_labels);
    info!(accuracy = holdout.accuracy, "holdout evaluation");

    let files = config.output.files();
    save_model(&model, &files)?;

    Ok(TrainingReport {
        dataset_size: records.len(),
        fake_count,
        real_count,
        train_size: train_texts.len(),
        holdout_size: test_texts.len(),
        vocabulary_size: model.vectorizer.len(),
        holdout,
        fit,
        duration: start.elapsed(),
        files,
    })
}

impl fmt::Display for TrainingReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "===================================================================")?;
        writeln!(f, "  Fake News Classifier: TF-IDF + Logistic Regression")?;
        writeln!(f, "===================================================================\n")?;
        writeln!(f, "Dataset size: {} rows", self.dataset_size)?;
        writeln!(f, "  Real: {}, Fake: {}", self.real_count, self.fake_count)?;
        writeln!(
            f,
            "Train: {} | Holdout: {}",
            self.train_size, self.holdout_size
        )?;
        writeln!(f, "Vocabulary size: {}", self.vocabulary_size)?;
        writeln!(
            f,
            "Optimizer: {} iterations ({})",
            self.fit.iterations,
            if self.fit.converged {
                "converged"
            } else {
                "max_iter reached"
            }
        )?;
        writeln!(f, "Training time: {:.1}s\n", self.duration.as_secs_f64())?;
        writeln!(f, "Holdout accuracy: {:.2}%\n", self.holdout.accuracy * 100.0)?;
        writeln!(f, "{}\n", self.holdout)?;
        writeln!(f, "Model saved to {}", self.files.model.display())?;
        write!(f, "Vocabulary saved to {}", self.files.vocabulary.display())
    }
}
