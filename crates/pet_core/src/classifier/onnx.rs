//! ONNX Runtime backend for the trained cat-vs-dog model.

use std::path::Path;
use std::sync::Arc;

use ndarray::{Array4, CowArray};
use once_cell::sync::Lazy;
use ort::{
    GraphOptimizationLevel, SessionBuilder, environment::Environment, session::Session,
    tensor::OrtOwnedTensor, value::Value,
};

use crate::classifier::{Classifier, ModelManifest};
use crate::error::PetError;
use crate::preprocess::{CHANNELS, INPUT_SIZE, PixelTensor};

static ORT_ENV: Lazy<Arc<Environment>> = Lazy::new(|| {
    Environment::builder()
        .with_name("pet-classifier")
        .build()
        .expect("failed to initialize ONNX Runtime environment")
        .into_arc()
});

fn build_session(artifact: &Path) -> Result<Session, ort::OrtError> {
    let env = ORT_ENV.clone();
    SessionBuilder::new(&env)?
        .with_optimization_level(GraphOptimizationLevel::Level1)?
        .with_model_from_file(artifact)
}

/// Trained model loaded from a manifest-described directory.
///
/// Loading is the expensive step; callers keep the instance around for the
/// whole session and reuse it across predictions.
pub struct OnnxClassifier {
    session: Session,
    manifest: ModelManifest,
}

impl OnnxClassifier {
    /// Loads the artifact named by `manifest.json` in `model_dir`.
    pub fn load(model_dir: &Path) -> Result<Self, PetError> {
        let manifest = ModelManifest::load(model_dir)?;
        let artifact = manifest.artifact_path(model_dir);
        if !artifact.exists() {
            return Err(PetError::ModelLoad {
                path: artifact,
                reason: "artifact missing".into(),
            });
        }
        let session = build_session(&artifact).map_err(|e| PetError::ModelLoad {
            path: artifact.clone(),
            reason: e.to_string(),
        })?;
        tracing::info!(
            version = %manifest.version,
            "loaded model from {}",
            artifact.display()
        );
        Ok(Self { session, manifest })
    }

    /// Model version from the manifest, for display.
    pub fn version(&self) -> &str {
        &self.manifest.version
    }
}

impl Classifier for OnnxClassifier {
    fn predict(&self, tensor: &PixelTensor) -> Result<f32, PetError> {
        let array = Array4::from_shape_vec(
            (1, INPUT_SIZE as usize, INPUT_SIZE as usize, CHANNELS),
            tensor.as_slice().to_vec(),
        )
        .map_err(|e| PetError::Inference(e.to_string()))?;
        let input_array = array.into_dyn();
        let cow = CowArray::from(input_array.view());
        let input = Value::from_array(self.session.allocator(), &cow)
            .map_err(|e| PetError::Inference(format!("could not build input tensor: {e}")))?;
        let outputs: Vec<Value> = self
            .session
            .run(vec![input])
            .map_err(|e| PetError::Inference(e.to_string()))?;
        if outputs.is_empty() {
            return Err(PetError::Inference("model produced no output".into()));
        }
        let scores: OrtOwnedTensor<f32, _> = outputs[0]
            .try_extract()
            .map_err(|e| PetError::Inference(e.to_string()))?;
        let view = scores.view();
        // Single sigmoid output; anything else means the wrong artifact.
        let Some(&score) = view.iter().next() else {
            return Err(PetError::Inference("model produced an empty tensor".into()));
        };
        if !(0.0..=1.0).contains(&score) {
            return Err(PetError::InvalidScore { score });
        }
        Ok(score)
    }
}

#[cfg(test)]
mod tests {
    use anyhow::Result;

    use super::*;

    #[test]
    fn missing_artifact_fails_before_touching_the_runtime() -> Result<()> {
        let dir = tempfile::tempdir()?;
        std::fs::write(
            dir.path().join(ModelManifest::FILE_NAME),
            r#"{"artifact": "pet_classifier.onnx", "version": "1.0.0", "input_size": 256}"#,
        )?;
        let err = OnnxClassifier::load(dir.path()).unwrap_err();
        assert!(matches!(err, PetError::ModelLoad { .. }));
        assert!(err.to_string().contains("artifact missing"));
        Ok(())
    }
}
