//! Inference Engine - ONNX Runtime Integration
//!
//! Runs the trained pass/fail classifier (Keras model exported to ONNX).
//! Input is one scaled row `(1, 32)` of float32, the first output holds the
//! sigmoid P(pass).

use std::path::Path;

use ndarray::Array2;
use parking_lot::Mutex;
use ort::session::{Session, builder::GraphOptimizationLevel};
use ort::value::Value;

use crate::logic::error::{PredictError, PredictResult};
use crate::logic::features::FEATURE_COUNT;

// ============================================================================
// CLASSIFIER TRAIT
// ============================================================================

/// Trained binary classifier. `predict` returns P(pass) in [0, 1].
pub trait Classifier: Send + Sync {
    fn predict(&self, scaled: &[f32]) -> PredictResult<f32>;

    /// Short description for status output
    fn describe(&self) -> String {
        "classifier".to_string()
    }
}

/// Reject anything that is not a usable probability
pub fn check_probability(p: f32) -> PredictResult<f32> {
    if !p.is_finite() || !(0.0..=1.0).contains(&p) {
        return Err(PredictError::inference(format!("output {} is not a probability", p)));
    }
    Ok(p)
}

// ============================================================================
// ONNX IMPLEMENTATION
// ============================================================================

pub struct OnnxClassifier {
    /// `Session::run` needs `&mut`
    session: Mutex<Session>,
    output_name: String,
    source: String,
}

impl std::fmt::Debug for OnnxClassifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OnnxClassifier")
            .field("source", &self.source)
            .field("output_name", &self.output_name)
            .finish()
    }
}

impl OnnxClassifier {
    /// Load ONNX model from file
    pub fn from_file(model_path: impl AsRef<Path>) -> PredictResult<Self> {
        let model_path = model_path.as_ref();
        log::info!("Loading ONNX model from: {}", model_path.display());

        if !model_path.exists() {
            return Err(PredictError::artifact(
                "model",
                format!("Model not found: {}", model_path.display()),
            ));
        }

        let session = Session::builder()
            .map_err(|e| PredictError::artifact("model", format!("Failed to create session builder: {}", e)))?
            .with_optimization_level(GraphOptimizationLevel::Level3)
            .map_err(|e| PredictError::artifact("model", format!("Failed to set optimization: {}", e)))?
            .commit_from_file(model_path)
            .map_err(|e| PredictError::artifact("model", format!("Failed to load model: {}", e)))?;

        log::info!("ONNX model loaded successfully");
        Self::from_session(session, model_path.display().to_string())
    }

    fn from_session(session: Session, source: String) -> PredictResult<Self> {
        let output_name = session.outputs.first()
            .map(|o| o.name.clone())
            .ok_or_else(|| PredictError::artifact("model", "No output defined"))?;

        if session.inputs.is_empty() {
            return Err(PredictError::artifact("model", "No input defined"));
        }

        Ok(Self {
            session: Mutex::new(session),
            output_name,
            source,
        })
    }
}

impl Classifier for OnnxClassifier {
    fn predict(&self, scaled: &[f32]) -> PredictResult<f32> {
        if scaled.len() != FEATURE_COUNT {
            return Err(PredictError::inference(format!(
                "model expects {} features, got {}",
                FEATURE_COUNT,
                scaled.len()
            )));
        }

        let input_array = Array2::<f32>::from_shape_vec((1, FEATURE_COUNT), scaled.to_vec())
            .map_err(|e| PredictError::inference(format!("Array error: {}", e)))?;

        let input_tensor = Value::from_array(input_array)
            .map_err(|e| PredictError::inference(format!("Tensor error: {}", e)))?;

        let mut session = self.session.lock();
        let outputs = session.run(ort::inputs![input_tensor])
            .map_err(|e| PredictError::inference(format!("Inference failed: {}", e)))?;

        let output = outputs.get(&self.output_name)
            .ok_or_else(|| PredictError::inference("No output"))?;

        let output_tensor = output.try_extract_tensor::<f32>()
            .map_err(|e| PredictError::inference(format!("Extract error: {}", e)))?;

        let probability = output_tensor.1
            .first()
            .copied()
            .ok_or_else(|| PredictError::inference("Empty output tensor"))?;

        check_probability(probability)
    }

    fn describe(&self) -> String {
        format!("ONNX Runtime (CPU): {}", self.source)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_check_probability() {
        assert_eq!(check_probability(0.0).unwrap(), 0.0);
        assert_eq!(check_probability(1.0).unwrap(), 1.0);
        assert!(check_probability(1.01).is_err());
        assert!(check_probability(-0.01).is_err());
        assert!(check_probability(f32::NAN).is_err());
        assert!(check_probability(f32::INFINITY).is_err());
    }

    #[test]
    fn test_missing_model_file() {
        let err = OnnxClassifier::from_file("/nonexistent/student_dropout_model.onnx").unwrap_err();
        match err {
            PredictError::ArtifactLoad { artifact, reason } => {
                assert_eq!(artifact, "model");
                assert!(reason.contains("not found"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_corrupt_model_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"definitely not a protobuf").unwrap();

        let err = OnnxClassifier::from_file(file.path()).unwrap_err();
        assert!(matches!(err, PredictError::ArtifactLoad { artifact: "model", .. }));
    }
}
