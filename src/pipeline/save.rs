//! Persisting the trained pipeline and its vocabulary manifest.

use super::model::FakeNewsModel;
use crate::error::Result;
use crate::model_loader::ModelFiles;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{self, Write};
use std::path::Path;
use tracing::info;

/// Inspection-only listing of the learned terms.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VocabularyManifest {
    /// Terms in feature-index order
    pub vocabulary: Vec<String>,
    pub feature_count: usize,
}

impl VocabularyManifest {
    pub fn from_model(model: &FakeNewsModel) -> Self {
        let vocabulary = model.vectorizer.vocabulary().to_vec();
        VocabularyManifest {
            feature_count: vocabulary.len(),
            vocabulary,
        }
    }

    pub fn load(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&json)?)
    }
}

/// Write `bytes` to a hidden sibling file, then rename it over `path`.
///
/// Readers see either the previous file or the complete new one.
pub fn write_atomic(path: &Path, bytes: &[u8]) -> Result<()> {
    write_atomic_with(path, |file| file.write_all(bytes))
}

/// Like [`write_atomic`], with the temp file filled by `write`.
///
/// The temp file is removed whenever writing or renaming fails.
fn write_atomic_with<F>(path: &Path, write: F) -> Result<()>
where
    F: FnOnce(&mut File) -> io::Result<()>,
{
    let parent = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    std::fs::create_dir_all(parent)?;

    let base = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "artifact".to_string());
    let tmp_path = parent.join(format!(".{}.tmp-{}", base, std::process::id()));

    let written = File::create(&tmp_path).and_then(|mut file| {
        write(&mut file)?;
        file.sync_all()
    });
    if let Err(err) = written.and_then(|()| std::fs::rename(&tmp_path, path)) {
        let _ = std::fs::remove_file(&tmp_path);
        return Err(err.into());
    }
    Ok(())
}

/// Save the fitted pipeline and the vocabulary manifest.
///
/// The pipeline is written first; the manifest is only written once the
/// artifact is in place.
pub fn save_model(model: &FakeNewsModel, files: &ModelFiles) -> Result<VocabularyManifest> {
    model.validate()?;

    write_atomic(&files.model, model.to_json()?.as_bytes())?;
    info!(path = %files.model.display(), "model artifact written");

    let manifest = VocabularyManifest::from_model(model);
    write_atomic(&files.vocabulary, serde_json::to_string(&manifest)?.as_bytes())?;
    info!(
        path = %files.vocabulary.display(),
        feature_count = manifest.feature_count,
        "vocabulary manifest written"
    );

    Ok(manifest)
}
