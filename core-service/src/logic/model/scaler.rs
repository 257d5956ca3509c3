//! Min-Max Scaler - Fitted normalization from training
//!
//! Reads the attributes of a fitted scikit-learn `MinMaxScaler` exported to
//! JSON and reproduces its `transform`:
//!
//! ```text
//! scale = (hi - lo) / (data_max - data_min)     // zero range → divide by 1
//! x'    = x * scale + (lo - data_min * scale)
//! ```
//!
//! Math is done in f64 like sklearn, the result is handed to the model as f32.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::logic::error::{PredictError, PredictResult};
use crate::logic::features::layout::{check_feature_names, FEATURE_COUNT};
use crate::logic::features::FeatureVector;

// ============================================================================
// TRAIT
// ============================================================================

/// Rescales an encoded vector the way the training pipeline did
pub trait Scaler: Send + Sync {
    /// Number of columns the scaler was fitted on
    fn n_features(&self) -> usize;

    fn transform(&self, features: &[f32]) -> PredictResult<Vec<f32>>;
}

/// Scaler output; same length and order as the input vector
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScaledVector {
    pub values: Vec<f32>,
}

impl ScaledVector {
    pub fn as_slice(&self) -> &[f32] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Apply `scaler` to `vector`, rejecting a scaler fitted on another column count
pub fn scale(scaler: &dyn Scaler, vector: &FeatureVector) -> PredictResult<ScaledVector> {
    let expected = scaler.n_features();
    if expected != vector.len() {
        return Err(PredictError::ScalerShape {
            expected,
            actual: vector.len(),
        });
    }

    let values = scaler.transform(vector.as_slice())?;
    if values.len() != vector.len() {
        return Err(PredictError::ScalerShape {
            expected: vector.len(),
            actual: values.len(),
        });
    }

    Ok(ScaledVector { values })
}

// ============================================================================
// ARTIFACT FORMAT
// ============================================================================

/// JSON export of a fitted `sklearn.preprocessing.MinMaxScaler`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MinMaxParams {
    #[serde(rename = "data_min_")]
    pub data_min: Vec<f64>,
    #[serde(rename = "data_max_")]
    pub data_max: Vec<f64>,
    #[serde(default = "default_feature_range")]
    pub feature_range: (f64, f64),
    #[serde(default)]
    pub clip: bool,
    #[serde(rename = "n_features_in_", default)]
    pub n_features_in: Option<usize>,
    #[serde(rename = "feature_names_in_", default)]
    pub feature_names_in: Option<Vec<String>>,
}

fn default_feature_range() -> (f64, f64) {
    (0.0, 1.0)
}

// ============================================================================
// MIN-MAX SCALER
// ============================================================================

#[derive(Debug, Clone)]
pub struct MinMaxScaler {
    scale: Vec<f64>,
    offset: Vec<f64>,
    feature_range: (f64, f64),
    clip: bool,
}

impl MinMaxScaler {
    /// Build from fitted statistics. Only checks internal consistency; the
    /// column count against the layout is checked by `from_params`.
    pub fn new(data_min: &[f64], data_max: &[f64], feature_range: (f64, f64), clip: bool) -> PredictResult<Self> {
        if data_min.len() != data_max.len() {
            return Err(PredictError::ScalerShape {
                expected: data_min.len(),
                actual: data_max.len(),
            });
        }

        let (lo, hi) = feature_range;
        if !(lo < hi) {
            return Err(PredictError::artifact(
                "scaler",
                format!("invalid feature_range ({}, {})", lo, hi),
            ));
        }

        let mut scale = Vec::with_capacity(data_min.len());
        let mut offset = Vec::with_capacity(data_min.len());

        for (i, (&min, &max)) in data_min.iter().zip(data_max).enumerate() {
            if !min.is_finite() || !max.is_finite() {
                return Err(PredictError::artifact(
                    "scaler",
                    format!("non-finite statistics in column {}", i),
                ));
            }
            let range = max - min;
            // sklearn's _handle_zeros_in_scale: constant columns keep range 1
            let range = if range == 0.0 { 1.0 } else { range };
            let s = (hi - lo) / range;
            scale.push(s);
            offset.push(lo - min * s);
        }

        Ok(Self { scale, offset, feature_range, clip })
    }

    /// Build from an exported artifact and check it against the layout
    pub fn from_params(params: &MinMaxParams) -> PredictResult<Self> {
        if let Some(n) = params.n_features_in {
            if n != params.data_min.len() {
                return Err(PredictError::artifact(
                    "scaler",
                    format!("n_features_in_ is {} but data_min_ has {} entries", n, params.data_min.len()),
                ));
            }
        }

        if let Some(names) = &params.feature_names_in {
            check_feature_names(names).map_err(|e| PredictError::artifact("scaler", e))?;
        }

        let scaler = Self::new(&params.data_min, &params.data_max, params.feature_range, params.clip)?;
        if scaler.n_features() != FEATURE_COUNT {
            return Err(PredictError::ScalerShape {
                expected: FEATURE_COUNT,
                actual: scaler.n_features(),
            });
        }

        Ok(scaler)
    }

    pub fn from_json(json: &str) -> PredictResult<Self> {
        let params: MinMaxParams = serde_json::from_str(json)
            .map_err(|e| PredictError::artifact("scaler", format!("invalid JSON: {}", e)))?;
        Self::from_params(&params)
    }

    pub fn from_file(path: impl AsRef<Path>) -> PredictResult<Self> {
        let path = path.as_ref();
        log::info!("Loading min-max scaler from: {}", path.display());

        let content = std::fs::read_to_string(path)
            .map_err(|e| PredictError::artifact("scaler", format!("{}: {}", path.display(), e)))?;

        let scaler = Self::from_json(&content)?;
        log::info!("Scaler loaded ({} features)", scaler.n_features());
        Ok(scaler)
    }

    pub fn feature_range(&self) -> (f64, f64) {
        self.feature_range
    }
}

impl Scaler for MinMaxScaler {
    fn n_features(&self) -> usize {
        self.scale.len()
    }

    fn transform(&self, features: &[f32]) -> PredictResult<Vec<f32>> {
        if features.len() != self.n_features() {
            return Err(PredictError::ScalerShape {
                expected: self.n_features(),
                actual: features.len(),
            });
        }

        let (lo, hi) = self.feature_range;
        let scaled = features
            .iter()
            .zip(self.scale.iter().zip(&self.offset))
            .map(|(&x, (&s, &o))| {
                let v = f64::from(x) * s + o;
                let v = if self.clip { v.clamp(lo, hi) } else { v };
                v as f32
            })
            .collect();

        Ok(scaled)
    }
}

// ============================================================================
// TESTS
// ============================================================================
