use std::path::PathBuf;

use thiserror::Error;

/// Errors surfaced by the classification pipeline.
///
/// All of these are terminal for the request that triggered them; none of
/// them tears down the session.
#[derive(Debug, Error)]
pub enum PetError {
    /// The model artifact or its manifest could not be loaded.
    #[error("model load failed at {path}: {reason}")]
    ModelLoad { path: PathBuf, reason: String },

    /// The classifier produced a score outside the closed interval [0, 1].
    #[error("classifier score {score} is outside [0, 1]")]
    InvalidScore { score: f32 },

    /// The uploaded file does not carry a supported image extension.
    #[error("unsupported image file {0:?} (expected jpg, jpeg or png)")]
    UnsupportedImage(String),

    /// The upload could not be decoded as an image.
    #[error("image decode failed: {0}")]
    Decode(#[from] image::ImageError),

    /// The model rejected the input or failed during the forward pass.
    #[error("inference failed: {0}")]
    Inference(String),

    /// The configuration file exists but could not be read or parsed.
    #[error("invalid config {path}: {reason}")]
    Config { path: PathBuf, reason: String },
}
