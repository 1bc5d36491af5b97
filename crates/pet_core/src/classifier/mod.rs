//! The classifier seam: a single-method trait between the UI flow and
//! whatever produces scores, plus the manifest describing a model directory.

pub mod fake;
#[cfg(feature = "ort")]
pub mod onnx;

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::PetError;
use crate::preprocess::{INPUT_SIZE, PixelTensor};

pub use fake::FakeClassifier;

/// A binary cat-vs-dog model: one prepared image in, one dog-likelihood out.
pub trait Classifier {
    /// Runs a forward pass and returns the dog probability in `[0, 1]`.
    fn predict(&self, tensor: &PixelTensor) -> Result<f32, PetError>;
}

/// Sidecar `manifest.json` describing the contents of a model directory.
#[derive(Debug, Clone, Deserialize)]
pub struct ModelManifest {
    /// File name of the serialized model inside the model directory.
    pub artifact: String,
    /// Version string shown in the UI footer.
    pub version: String,
    /// Edge length of the square input the artifact was exported for.
    pub input_size: u32,
}

impl ModelManifest {
    pub const FILE_NAME: &'static str = "manifest.json";

    /// Reads and validates `manifest.json` from `model_dir`.
    pub fn load(model_dir: &Path) -> Result<Self, PetError> {
        let path = model_dir.join(Self::FILE_NAME);
        let raw = fs::read_to_string(&path).map_err(|e| PetError::ModelLoad {
            path: path.clone(),
            reason: e.to_string(),
        })?;
        let manifest: Self = serde_json::from_str(&raw).map_err(|e| PetError::ModelLoad {
            path: path.clone(),
            reason: e.to_string(),
        })?;
        if manifest.input_size != INPUT_SIZE {
            return Err(PetError::ModelLoad {
                path,
                reason: format!(
                    "artifact expects {0}x{0} input, this build feeds {1}x{1}",
                    manifest.input_size, INPUT_SIZE
                ),
            });
        }
        Ok(manifest)
    }

    /// Path of the model artifact under `model_dir`.
    pub fn artifact_path(&self, model_dir: &Path) -> PathBuf {
        model_dir.join(&self.artifact)
    }
}

#[cfg(test)]
mod tests {
    use anyhow::Result;

    use super::*;

    fn write_manifest(dir: &Path, json: &str) -> Result<()> {
        fs::write(dir.join(ModelManifest::FILE_NAME), json)?;
        Ok(())
    }

    #[test]
    fn manifest_round_trip() -> Result<()> {
        let dir = tempfile::tempdir()?;
        write_manifest(
            dir.path(),
            r#"{"artifact": "pet_classifier.onnx", "version": "1.0.0", "input_size": 256}"#,
        )?;
        let manifest = ModelManifest::load(dir.path())?;
        assert_eq!(manifest.version, "1.0.0");
        assert_eq!(
            manifest.artifact_path(dir.path()),
            dir.path().join("pet_classifier.onnx")
        );
        Ok(())
    }

    #[test]
    fn missing_manifest_is_a_model_load_error() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let err = ModelManifest::load(dir.path()).unwrap_err();
        assert!(matches!(err, PetError::ModelLoad { .. }));
        Ok(())
    }

    #[test]
    fn input_size_mismatch_is_rejected() -> Result<()> {
        let dir = tempfile::tempdir()?;
        write_manifest(
            dir.path(),
            r#"{"artifact": "pet_classifier.onnx", "version": "1.0.0", "input_size": 512}"#,
        )?;
        let err = ModelManifest::load(dir.path()).unwrap_err();
        assert!(err.to_string().contains("512x512"));
        Ok(())
    }

    #[test]
    fn malformed_json_is_a_model_load_error() -> Result<()> {
        let dir = tempfile::tempdir()?;
        write_manifest(dir.path(), "{not json")?;
        let err = ModelManifest::load(dir.path()).unwrap_err();
        assert!(matches!(err, PetError::ModelLoad { .. }));
        Ok(())
    }
}
