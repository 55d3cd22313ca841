//! Artifact file locations.
//!
//! The trainer writes two files, the fitted pipeline and the vocabulary
//! manifest. Only the first is needed for prediction.
//!
//! # Examples
//!
//! ```no_run
//! use fakenews::model_loader::ModelFiles;
//!
//! let files = ModelFiles::in_dir("/srv/models");
//! if files.exists() {
//!     println!("Model is ready!");
//! }
//! ```

use crate::error::{Error, Result};
use std::path::{Path, PathBuf};

const DEFAULT_MODEL_DIR: &str = "public/models";
const MODEL_FILE: &str = "fake_news_model.json";
const VOCABULARY_FILE: &str = "vocabulary.json";

/// Paths of the files produced by a training run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelFiles {
    /// Fitted pipeline artifact (vectorizer + classifier)
    pub model: PathBuf,
    /// Human-inspectable vocabulary manifest
    pub vocabulary: PathBuf,
}

impl Default for ModelFiles {
    fn default() -> Self {
        Self::in_dir(DEFAULT_MODEL_DIR)
    }
}

impl ModelFiles {
    /// Standard file names inside `model_dir`.
    pub fn in_dir(model_dir: impl AsRef<Path>) -> Self {
        let base = model_dir.as_ref();
        Self {
            model: base.join(MODEL_FILE),
            vocabulary: base.join(VOCABULARY_FILE),
        }
    }

    /// Whether the pipeline artifact exists. The manifest is not required.
    pub fn exists(&self) -> bool {
        self.model.exists()
    }
}

/// Fail with [`Error::ModelNotFound`] unless the artifact at `path` exists.
pub fn ensure_model_file(path: &Path) -> Result<()> {
    if path.is_file() {
        Ok(())
    } else {
        Err(Error::ModelNotFound(path.to_path_buf()))
    }
}
