//! Model Manifest - Optional JSON sidecar exported with the model
//!
//! ```json
//! { "model_type": "keras_mlp", "threshold": 0.8,
//!   "feature_version": 1, "layout_hash": 123456789,
//!   "feature_names": ["school", "sex", ...] }
//! ```
//!
//! Every key is optional. Layout keys that are present must match the
//! compiled layout.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::logic::error::{PredictError, PredictResult};
use crate::logic::features::layout::{check_feature_names, layout_hash, FEATURE_VERSION};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ModelManifest {
    #[serde(default)]
    pub model_type: Option<String>,
    #[serde(default)]
    pub threshold: Option<f32>,
    #[serde(default)]
    pub feature_version: Option<u8>,
    #[serde(default)]
    pub layout_hash: Option<u32>,
    #[serde(default)]
    pub feature_names: Option<Vec<String>>,
}

impl ModelManifest {
    pub fn from_json(json: &str) -> PredictResult<Self> {
        let manifest: Self = serde_json::from_str(json)
            .map_err(|e| PredictError::artifact("manifest", format!("invalid JSON: {}", e)))?;
        manifest.check_layout()?;
        Ok(manifest)
    }

    pub fn from_file(path: impl AsRef<Path>) -> PredictResult<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .map_err(|e| PredictError::artifact("manifest", format!("{}: {}", path.display(), e)))?;

        let manifest = Self::from_json(&content)?;
        log::info!("Model manifest loaded from: {}", path.display());
        Ok(manifest)
    }

    fn check_layout(&self) -> PredictResult<()> {
        if let Some(version) = self.feature_version {
            if version != FEATURE_VERSION {
                return Err(PredictError::artifact(
                    "manifest",
                    format!("model built for feature layout v{}, this build uses v{}", version, FEATURE_VERSION),
                ));
            }
        }

        if let Some(hash) = self.layout_hash {
            if hash != layout_hash() {
                return Err(PredictError::artifact(
                    "manifest",
                    format!("layout hash {:08x} does not match {:08x}", hash, layout_hash()),
                ));
            }
        }

        if let Some(names) = &self.feature_names {
            check_feature_names(names).map_err(|e| PredictError::artifact("manifest", e))?;
        }

        Ok(())
    }
}
