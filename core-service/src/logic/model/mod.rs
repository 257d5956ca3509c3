//! Model Module - Scaling & Inference
//!
//! Fitted scaler, ONNX classifier, decision threshold, and the `Predictor`
//! handle that ties them together. `Scaler` and `Classifier` are traits so
//! the pipeline can run against stubs.

pub mod scaler;
pub mod inference;
pub mod threshold;
pub mod guard;
pub mod manifest;
pub mod predictor;

// Re-export common types
pub use scaler::{MinMaxScaler, ScaledVector, Scaler};
pub use inference::{Classifier, OnnxClassifier};
pub use threshold::DecisionPolicy;
pub use manifest::ModelManifest;
pub use predictor::{EngineStatus, PredictionResult, Predictor, Verdict};
