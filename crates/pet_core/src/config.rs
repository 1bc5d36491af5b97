//! App configuration loaded from an optional TOML file.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::PetError;

/// Which classifier backend the app wires at startup.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Backend {
    /// Deterministic stand-in; works without a model artifact.
    #[default]
    Fake,
    /// Trained model via ONNX Runtime (needs the `ort` build feature).
    Onnx,
}

/// Runtime configuration.
///
/// The classification thresholds are deliberately not here: they are fixed
/// policy constants, not tuning knobs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Directory holding `manifest.json` and the model artifact.
    pub model_dir: PathBuf,
    pub backend: Backend,
    /// Milliseconds the app shows the thinking indicator before running
    /// inference.
    pub thinking_delay_ms: u64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            model_dir: PathBuf::from("models"),
            backend: Backend::Fake,
            thinking_delay_ms: 1000,
        }
    }
}

impl AppConfig {
    /// Config file name looked up in the working directory.
    pub const FILE_NAME: &'static str = "pet_classifier.toml";

    /// Loads `path`, falling back to defaults when the file does not exist.
    /// A file that exists but fails to parse is an error, not a fallback.
    pub fn load(path: &Path) -> Result<Self, PetError> {
        let raw = match fs::read_to_string(path) {
            Ok(raw) => raw,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                tracing::info!("no config at {}, using defaults", path.display());
                return Ok(Self::default());
            }
            Err(err) => {
                return Err(PetError::Config {
                    path: path.to_path_buf(),
                    reason: err.to_string(),
                });
            }
        };
        toml::from_str(&raw).map_err(|e| PetError::Config {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use anyhow::Result;

    use super::*;

    #[test]
    fn defaults_when_the_file_is_absent() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let config = AppConfig::load(&dir.path().join("missing.toml"))?;
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.backend, Backend::Fake);
        assert_eq!(config.thinking_delay_ms, 1000);
        Ok(())
    }

    #[test]
    fn partial_file_overrides_only_what_it_names() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join(AppConfig::FILE_NAME);
        fs::write(&path, "thinking_delay_ms = 0\n")?;
        let config = AppConfig::load(&path)?;
        assert_eq!(config.thinking_delay_ms, 0);
        assert_eq!(config.model_dir, PathBuf::from("models"));
        Ok(())
    }

    #[test]
    fn backend_names_are_lowercase() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join(AppConfig::FILE_NAME);
        fs::write(&path, "backend = \"onnx\"\nmodel_dir = \"assets/model\"\n")?;
        let config = AppConfig::load(&path)?;
        assert_eq!(config.backend, Backend::Onnx);
        assert_eq!(config.model_dir, PathBuf::from("assets/model"));
        Ok(())
    }

    #[test]
    fn malformed_file_is_an_error_not_a_fallback() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join(AppConfig::FILE_NAME);
        fs::write(&path, "backend = \"tensorflow\"\n")?;
        let err = AppConfig::load(&path).unwrap_err();
        assert!(matches!(err, PetError::Config { .. }));
        Ok(())
    }
}
