//! Error types shared by the trainer and the predictor.

use crate::pipeline::data::Label;
use std::path::PathBuf;

/// Crate-wide error type.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// The training dataset does not exist. Training aborts before any work.
    #[error("dataset not found at {}", .0.display())]
    DatasetNotFound(PathBuf),

    /// The persisted model artifact does not exist.
    #[error("model artifact not found at {} (train the model first)", .0.display())]
    ModelNotFound(PathBuf),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("could not parse config: {0}")]
    Toml(#[from] toml::de::Error),

    /// A configuration value is out of range.
    #[error("invalid configuration: {0}")]
    Config(String),

    /// A dataset row carries a label other than 0 or 1.
    #[error("invalid label {value:?} in data row {row} (expected 0 or 1)")]
    InvalidLabel { row: usize, value: String },

    #[error("dataset contains no rows")]
    EmptyDataset,

    /// Fitting needs both classes present in the training partition.
    #[error("training data only contains {0} examples; both fake and real are required")]
    SingleClass(Label),

    /// The artifact deserialized but its parts do not fit together.
    #[error("incompatible model artifact: {0}")]
    IncompatibleModel(String),

    #[error("unsupported model format version {found} (expected {expected})")]
    UnsupportedFormatVersion { found: u32, expected: u32 },
}

/// Convenience alias for `std::result::Result<T, Error>`.
pub type Result<T> = std::result::Result<T, Error>;
