//! Configuration structures for the fake news classifier.
//!
//! Covers the dataset location and split, feature extraction, the logistic
//! regression hyperparameters and the artifact paths. Every path lives here
//! and is passed explicitly to the trainer and the predictor.

use crate::error::{Error, Result};
use crate::model_loader::ModelFiles;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::info;

/// Main configuration structure loaded from `config.toml`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Data loading configuration
    pub data: DataConfig,
    /// Feature extraction configuration
    pub features: FeaturesConfig,
    /// Classifier hyperparameters
    pub model: ModelConfig,
    /// Output paths configuration
    pub output: OutputConfig,
}

/// Data loading configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DataConfig {
    /// Path to the CSV dataset file (`title`, `text`, `label` columns)
    pub csv_path: PathBuf,
    /// Train/holdout split ratio (e.g., 0.8 = 80% train, 20% holdout)
    pub train_split: f64,
    /// Seed for the stratified shuffle
    pub seed: u64,
}

/// Feature extraction configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct FeaturesConfig {
    /// Maximum number of TF-IDF terms kept in the vocabulary
    pub max_features: usize,
    /// Smallest n-gram length
    pub ngram_min: usize,
    /// Largest n-gram length
    pub ngram_max: usize,
}

/// Logistic regression hyperparameters.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ModelConfig {
    /// Inverse regularization strength
    pub c: f64,
    /// Maximum optimizer iterations
    pub max_iter: usize,
    /// Relative gradient tolerance for convergence
    pub tolerance: f64,
}

/// Output paths configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Fitted pipeline artifact
    pub model_path: PathBuf,
    /// Vocabulary manifest
    pub vocabulary_path: PathBuf,
}

impl Default for DataConfig {
    fn default() -> Self {
        DataConfig {
            csv_path: PathBuf::from("ml/WELFake_Dataset.csv"),
            train_split: 0.8,
            seed: 42,
        }
    }
}

impl Default for FeaturesConfig {
    fn default() -> Self {
        FeaturesConfig {
            max_features: 5000,
            ngram_min: 1,
            ngram_max: 2,
        }
    }
}

impl Default for ModelConfig {
    fn default() -> Self {
        ModelConfig {
            c: 1.0,
            max_iter: 1000,
            tolerance: 1e-4,
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        let files = ModelFiles::default();
        OutputConfig {
            model_path: files.model,
            vocabulary_path: files.vocabulary,
        }
    }
}

impl OutputConfig {
    pub fn files(&self) -> ModelFiles {
        ModelFiles {
            model: self.model_path.clone(),
            vocabulary: self.vocabulary_path.clone(),
        }
    }
}

impl Config {
    /// Load configuration from a TOML file.
    ///
    /// Missing sections and keys take their default values.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration, using [`Config::default`] when the file does not
    /// exist. A file that exists but fails to parse or validate is an error.
    pub fn load_or_default(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            info!(path = %path.display(), "no config file, using defaults");
            return Ok(Config::default());
        }
        Self::load(path)
    }

    /// Reject values the trainer cannot work with.
    pub fn validate(&self) -> Result<()> {
        let split = self.data.train_split;
        if !(split > 0.0 && split < 1.0) {
            return Err(Error::Config(format!(
                "data.train_split must be in (0, 1), got {split}"
            )));
        }
        if self.features.max_features == 0 {
            return Err(Error::Config("features.max_features must be positive".into()));
        }
        let (lo, hi) = (self.features.ngram_min, self.features.ngram_max);
        if lo == 0 || lo > hi {
            return Err(Error::Config(format!(
                "invalid n-gram range ({lo}, {hi})"
            )));
        }
        if !(self.model.c > 0.0) || !self.model.c.is_finite() {
            return Err(Error::Config(format!(
                "model.c must be a positive number, got {}",
                self.model.c
            )));
        }
        if self.model.max_iter == 0 {
            return Err(Error::Config("model.max_iter must be positive".into()));
        }
        if !(self.model.tolerance >= 0.0) {
            return Err(Error::Config("model.tolerance must be non-negative".into()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_pipeline_shape() {
        let config = Config::default();
        assert_eq!(config.features.max_features, 5000);
        assert_eq!((config.features.ngram_min, config.features.ngram_max), (1, 2));
        assert!((config.data.train_split - 0.8).abs() < 1e-12);
        assert_eq!(config.data.seed, 42);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config: Config = toml::from_str(
            r#"
            [data]
            csv_path = "data/news.csv"

            [model]
            c = 0.5
            "#,
        )
        .unwrap();
        assert_eq!(config.data.csv_path, PathBuf::from("data/news.csv"));
        assert!((config.data.train_split - 0.8).abs() < 1e-12);
        assert!((config.model.c - 0.5).abs() < 1e-12);
        assert_eq!(config.model.max_iter, 1000);
        assert_eq!(config.features.max_features, 5000);
    }

    #[test]
    fn test_validate_rejects_bad_split() {
        let mut config = Config::default();
        config.data.train_split = 1.0;
        assert!(matches!(config.validate(), Err(Error::Config(_))));
    }

    #[test]
    fn test_validate_rejects_bad_ngram_range() {
        let mut config = Config::default();
        config.features.ngram_min = 3;
        config.features.ngram_max = 2;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_load_or_default_on_missing_file() {
        let config = Config::load_or_default("does/not/exist.toml").unwrap();
        assert_eq!(config.features.max_features, 5000);
    }

    #[test]
    fn test_load_or_default_rejects_invalid_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            "[data]\ntrain_split = 80\n\n[output]\nmodel_path = \"custom/model.json\"\n",
        )
        .unwrap();

        assert!(matches!(Config::load_or_default(&path), Err(Error::Config(_))));
    }

    #[test]
    fn test_load_or_default_rejects_unparsable_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[data\ncsv_path = ").unwrap();

        assert!(matches!(Config::load_or_default(&path), Err(Error::Toml(_))));
    }
}
