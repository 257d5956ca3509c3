//! Error taxonomy for encoding, artifact loading and inference

use thiserror::Error;

pub type PredictResult<T> = Result<T, PredictError>;

#[derive(Debug, Error)]
pub enum PredictError {
    /// Label is not a key of the field's category table
    #[error("invalid value {value:?} for field '{field}'")]
    InvalidCategory { field: &'static str, value: String },

    /// Scaler or model missing, corrupt, or built for another layout. Fatal at startup.
    #[error("failed to load {artifact}: {reason}")]
    ArtifactLoad { artifact: &'static str, reason: String },

    #[error("scaler expects {expected} features, got {actual}")]
    ScalerShape { expected: usize, actual: usize },

    #[error("model inference failed: {0}")]
    ModelInference(String),

    #[error("pass threshold must be within [0, 1], got {0}")]
    InvalidThreshold(f32),

    /// Environment override is set but unusable. Fatal at startup.
    #[error("invalid value {value:?} for {key}")]
    InvalidConfig { key: &'static str, value: String },
}

impl PredictError {
    pub(crate) fn artifact(artifact: &'static str, reason: impl std::fmt::Display) -> Self {
        PredictError::ArtifactLoad {
            artifact,
            reason: reason.to_string(),
        }
    }

    pub(crate) fn inference(reason: impl std::fmt::Display) -> Self {
        PredictError::ModelInference(reason.to_string())
    }

    /// Whether the failure was caused by the caller's input rather than the artifacts
    pub fn is_client_error(&self) -> bool {
        matches!(self, PredictError::InvalidCategory { .. })
    }
}
