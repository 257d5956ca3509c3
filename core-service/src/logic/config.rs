//! Artifact Configuration
//!
//! Where the scaler and model live, optional integrity digests, and the
//! pass threshold override.

use serde::{Deserialize, Serialize};

use crate::constants;
use crate::logic::error::{PredictError, PredictResult};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArtifactConfig {
    /// ONNX classifier
    pub model_path: String,

    /// Min-max scaler JSON
    pub scaler_path: String,

    /// Optional manifest sidecar (threshold, layout fingerprint)
    pub manifest_path: Option<String>,

    /// Overrides the manifest and the built-in default when set
    pub pass_threshold: Option<f32>,

    /// Expected SHA-256 hex digest of the model file
    pub model_sha256: Option<String>,

    /// Expected SHA-256 hex digest of the scaler file
    pub scaler_sha256: Option<String>,
}

impl Default for ArtifactConfig {
    fn default() -> Self {
        Self {
            model_path: constants::DEFAULT_MODEL_PATH.to_string(),
            scaler_path: constants::DEFAULT_SCALER_PATH.to_string(),
            manifest_path: None,
            pass_threshold: None,
            model_sha256: None,
            scaler_sha256: None,
        }
    }
}

impl ArtifactConfig {
    /// Load configuration from environment variables.
    ///
    /// A `PASS_THRESHOLD` that is set but not a number is an error, never ignored.
    pub fn from_env() -> PredictResult<Self> {
        let pass_threshold = constants::get_pass_threshold()
            .map_err(|value| PredictError::InvalidConfig { key: "PASS_THRESHOLD", value })?;

        Ok(Self {
            model_path: constants::get_model_path(),
            scaler_path: constants::get_scaler_path(),
            manifest_path: constants::get_manifest_path(),
            pass_threshold,
            model_sha256: constants::get_model_sha256(),
            scaler_sha256: constants::get_scaler_sha256(),
        })
    }

    pub fn new(model_path: impl Into<String>, scaler_path: impl Into<String>) -> Self {
        Self {
            model_path: model_path.into(),
            scaler_path: scaler_path.into(),
            ..Default::default()
        }
    }

    pub fn with_manifest(mut self, path: impl Into<String>) -> Self {
        self.manifest_path = Some(path.into());
        self
    }

    pub fn with_threshold(mut self, threshold: f32) -> Self {
        self.pass_threshold = Some(threshold);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_paths() {
        let config = ArtifactConfig::default();
        assert_eq!(config.model_path, constants::DEFAULT_MODEL_PATH);
        assert_eq!(config.scaler_path, constants::DEFAULT_SCALER_PATH);
        assert!(config.manifest_path.is_none());
        assert!(config.pass_threshold.is_none());
    }

    #[test]
    fn test_builder_overrides() {
        let config = ArtifactConfig::new("m.onnx", "s.json")
            .with_manifest("m.json")
            .with_threshold(0.5);
        assert_eq!(config.model_path, "m.onnx");
        assert_eq!(config.scaler_path, "s.json");
        assert_eq!(config.manifest_path.as_deref(), Some("m.json"));
        assert_eq!(config.pass_threshold, Some(0.5));
    }
}
