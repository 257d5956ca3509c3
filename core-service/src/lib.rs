//! Student Pass Predictor - Core
//!
//! Encodes the 32 student attributes collected by the form into the feature
//! vector the classifier was trained on, rescales it with the fitted min-max
//! scaler and turns the classifier output into a pass/drop-out decision.
//!
//! ```text
//! RawInput ──encode──▶ FeatureVector ──scale──▶ ScaledVector ──infer──▶ P(pass) ──decide──▶ verdict
//! ```

pub mod constants;
pub mod logic;

pub use logic::config::ArtifactConfig;
pub use logic::error::{PredictError, PredictResult};
pub use logic::features::{
    encode, FeatureVector, LayoutInfo, RawInput, FEATURE_COUNT, FEATURE_LAYOUT,
};
pub use logic::model::{
    Classifier, DecisionPolicy, EngineStatus, MinMaxScaler, OnnxClassifier, PredictionResult,
    Predictor, ScaledVector, Scaler, Verdict,
};
