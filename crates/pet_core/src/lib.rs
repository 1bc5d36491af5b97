//! Core of the pet classifier demo: the confidence policy that maps one
//! model score to a display verdict, plus the image intake, classifier seam,
//! state machine and session bookkeeping around it.

pub mod classifier;
pub mod config;
pub mod error;
pub mod machine;
pub mod policy;
pub mod preprocess;
pub mod session;

#[cfg(feature = "ort")]
pub use classifier::onnx::OnnxClassifier;
pub use classifier::{Classifier, FakeClassifier, ModelManifest};
pub use config::{AppConfig, Backend};
pub use error::PetError;
pub use policy::{Label, Verdict, classify};
pub use preprocess::{INPUT_SIZE, PixelTensor, PreparedImage, prepare_bytes, prepare_file};
pub use session::{SessionContext, SessionCounters};
