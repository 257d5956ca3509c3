//! Predictor - Loaded artifacts + decision policy
//!
//! Built once at startup by `Predictor::load` and shared read-only for the
//! rest of the process. Only the latency counters change after that.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Instant;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::constants::PASSING_GRADE;
use crate::logic::config::ArtifactConfig;
use crate::logic::error::PredictResult;
use crate::logic::features::{encode, FeatureVector, LayoutInfo, RawInput};
use super::guard::verify_checksum;
use super::inference::{check_probability, Classifier, OnnxClassifier};
use super::manifest::ModelManifest;
use super::scaler::{scale, MinMaxScaler, ScaledVector, Scaler};
use super::threshold::{resolve_threshold, DecisionPolicy};

// ============================================================================
// RESULT TYPES
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Verdict {
    Pass,
    DropOut,
}

impl Verdict {
    pub fn message(&self) -> &'static str {
        match self {
            Verdict::Pass => "Student is predicted to PASS and proceed to the next course.",
            Verdict::DropOut => "Student is predicted to DROP OUT or fail to graduate.",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionResult {
    /// P(final grade >= 10)
    pub probability: f32,
    /// `probability >= threshold`
    pub decision: bool,
    pub threshold: f32,
    pub inference_time_us: u64,
}

impl PredictionResult {
    pub fn verdict(&self) -> Verdict {
        if self.decision {
            Verdict::Pass
        } else {
            Verdict::DropOut
        }
    }

    pub fn probability_display(&self) -> String {
        format!("{:.2}", self.probability)
    }

    /// "Probability of Passing (G3 >= 10): 0.87"
    pub fn summary(&self) -> String {
        format!(
            "Probability of Passing (G3 >= {}): {}",
            PASSING_GRADE,
            self.probability_display()
        )
    }
}

/// Engine Status for the status endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineStatus {
    pub model: String,
    pub model_type: Option<String>,
    pub scaler_features: usize,
    pub threshold: f32,
    pub layout: LayoutInfo,
    pub loaded_at: DateTime<Utc>,
    pub inference_count: u64,
    pub avg_latency_ms: f32,
}

// ============================================================================
// PREDICTOR
// ============================================================================

pub struct Predictor {
    scaler: Box<dyn Scaler>,
    classifier: Box<dyn Classifier>,
    policy: DecisionPolicy,
    model_type: Option<String>,
    loaded_at: DateTime<Utc>,
    latency_sum_us: AtomicU64,
    inference_count: AtomicU64,
}

impl std::fmt::Debug for Predictor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Predictor")
            .field("classifier", &self.classifier.describe())
            .field("scaler_features", &self.scaler.n_features())
            .field("policy", &self.policy)
            .finish()
    }
}

impl Predictor {
    pub fn new(scaler: Box<dyn Scaler>, classifier: Box<dyn Classifier>, policy: DecisionPolicy) -> Self {
        Self {
            scaler,
            classifier,
            policy,
            model_type: None,
            loaded_at: Utc::now(),
            latency_sum_us: AtomicU64::new(0),
            inference_count: AtomicU64::new(0),
        }
    }

    /// Startup phase: verify and load every artifact, or fail with the reason.
    ///
    /// Threshold precedence: config override, then manifest, then 0.80.
    pub fn load(config: &ArtifactConfig) -> PredictResult<Self> {
        let manifest = match &config.manifest_path {
            Some(path) => ModelManifest::from_file(path)?,
            None => ModelManifest::default(),
        };

        verify_checksum("scaler", &config.scaler_path, config.scaler_sha256.as_deref())?;
        let scaler = MinMaxScaler::from_file(&config.scaler_path)?;

        verify_checksum("model", &config.model_path, config.model_sha256.as_deref())?;
        let classifier = OnnxClassifier::from_file(&config.model_path)?;

        let policy = resolve_threshold(config.pass_threshold, manifest.threshold)?;

        log::info!(
            "Predictor ready: {} features, pass threshold {:.2}",
            scaler.n_features(),
            policy.threshold
        );

        let mut predictor = Self::new(Box::new(scaler), Box::new(classifier), policy);
        predictor.model_type = manifest.model_type;
        Ok(predictor)
    }

    pub fn policy(&self) -> DecisionPolicy {
        self.policy
    }

    pub fn scale(&self, vector: &FeatureVector) -> PredictResult<ScaledVector> {
        scale(self.scaler.as_ref(), vector)
    }

    pub fn infer(&self, scaled: &ScaledVector) -> PredictResult<f32> {
        self.classifier.predict(scaled.as_slice()).and_then(check_probability)
    }

    pub fn decide(&self, probability: f32) -> bool {
        self.policy.decide(probability)
    }

    /// scale → infer → decide
    pub fn predict(&self, vector: &FeatureVector) -> PredictResult<PredictionResult> {
        let start = Instant::now();

        let scaled = self.scale(vector)?;
        let probability = self.infer(&scaled)?;
        let decision = self.decide(probability);

        let inference_time_us = start.elapsed().as_micros() as u64;
        self.latency_sum_us.fetch_add(inference_time_us, Ordering::Relaxed);
        self.inference_count.fetch_add(1, Ordering::Relaxed);

        log::debug!("P(pass)={:.4} decision={} ({}us)", probability, decision, inference_time_us);

        Ok(PredictionResult {
            probability,
            decision,
            threshold: self.policy.threshold,
            inference_time_us,
        })
    }

    /// encode → predict
    pub fn predict_raw(&self, raw: &RawInput) -> PredictResult<PredictionResult> {
        let vector = encode(raw)?;
        self.predict(&vector)
    }

    pub fn status(&self) -> EngineStatus {
        let sum = self.latency_sum_us.load(Ordering::Relaxed);
        let count = self.inference_count.load(Ordering::Relaxed);
        let avg = if count > 0 { (sum as f32 / count as f32) / 1000.0 } else { 0.0 };

        EngineStatus {
            model: self.classifier.describe(),
            model_type: self.model_type.clone(),
            scaler_features: self.scaler.n_features(),
            threshold: self.policy.threshold,
            layout: LayoutInfo::current(),
            loaded_at: self.loaded_at,
            inference_count: count,
            avg_latency_ms: avg,
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logic::error::PredictError;
    use crate::logic::features::FEATURE_COUNT;
    use std::io::Write;

    struct IdentityScaler(usize);

    impl Scaler for IdentityScaler {
        fn n_features(&self) -> usize {
            self.0
        }

        fn transform(&self, features: &[f32]) -> PredictResult<Vec<f32>> {
            Ok(features.to_vec())
        }
    }

    /// Sum of inputs mod 1
    struct FractionalSum;

    impl Classifier for FractionalSum {
        fn predict(&self, scaled: &[f32]) -> PredictResult<f32> {
            Ok(scaled.iter().sum::<f32>().rem_euclid(1.0))
        }
    }

    struct Fixed(f32);

    impl Classifier for Fixed {
        fn predict(&self, _: &[f32]) -> PredictResult<f32> {
            Ok(self.0)
        }
    }

    struct Failing;

    impl Classifier for Failing {
        fn predict(&self, _: &[f32]) -> PredictResult<f32> {
            Err(PredictError::inference("backend unavailable"))
        }
    }

    fn predictor(classifier: impl Classifier + 'static) -> Predictor {
        Predictor::new(
            Box::new(IdentityScaler(FEATURE_COUNT)),
            Box::new(classifier),
            DecisionPolicy::default(),
        )
    }

    fn vector_with(last: f32) -> FeatureVector {
        let mut values = [0.0; FEATURE_COUNT];
        values[FEATURE_COUNT - 1] = last;
        FeatureVector::from_values(values)
    }

    #[test]
    fn test_pipeline_is_deterministic() {
        let p = predictor(FractionalSum);
        let raw = RawInput::default();

        let first = p.predict_raw(&raw).unwrap();
        let second = p.predict_raw(&raw).unwrap();
        assert_eq!(first.probability, second.probability);
        assert_eq!(first.decision, second.decision);
    }

    #[test]
    fn test_decision_follows_threshold() {
        let pass = predictor(FractionalSum).predict(&vector_with(0.85)).unwrap();
        assert!(pass.decision);
        assert_eq!(pass.verdict(), Verdict::Pass);

        let fail = predictor(FractionalSum).predict(&vector_with(0.25)).unwrap();
        assert!(!fail.decision);
        assert_eq!(fail.verdict(), Verdict::DropOut);
        assert_eq!(fail.threshold, 0.80);
    }

    #[test]
    fn test_exact_threshold_passes() {
        let result = predictor(Fixed(0.80)).predict(&vector_with(0.0)).unwrap();
        assert!(result.decision);
    }

    #[test]
    fn test_custom_policy() {
        let p = Predictor::new(
            Box::new(IdentityScaler(FEATURE_COUNT)),
            Box::new(Fixed(0.6)),
            DecisionPolicy::new(0.5).unwrap(),
        );
        assert!(p.predict(&vector_with(0.0)).unwrap().decision);
    }

    #[test]
    fn test_scaler_shape_error() {
        let p = Predictor::new(Box::new(IdentityScaler(30)), Box::new(Fixed(0.9)), DecisionPolicy::default());
        let err = p.predict(&vector_with(0.0)).unwrap_err();
        assert!(matches!(err, PredictError::ScalerShape { expected: 30, actual: 32 }));
    }

    #[test]
    fn test_inference_errors_surface() {
        let err = predictor(Failing).predict(&vector_with(0.0)).unwrap_err();
        assert!(matches!(err, PredictError::ModelInference(_)));

        let err = predictor(Fixed(1.7)).predict(&vector_with(0.0)).unwrap_err();
        assert!(matches!(err, PredictError::ModelInference(_)));

        let err = predictor(Fixed(f32::NAN)).predict(&vector_with(0.0)).unwrap_err();
        assert!(matches!(err, PredictError::ModelInference(_)));
    }

    #[test]
    fn test_invalid_category_stops_before_model() {
        let p = predictor(Fixed(0.9));
        let raw = RawInput {
            school: "XX".into(),
            ..RawInput::default()
        };
        assert!(matches!(p.predict_raw(&raw), Err(PredictError::InvalidCategory { field: "school", .. })));
        assert_eq!(p.status().inference_count, 0);
    }

    #[test]
    fn test_status_counts_predictions() {
        let p = predictor(Fixed(0.5));
        for _ in 0..3 {
            p.predict(&vector_with(0.0)).unwrap();
        }
        let status = p.status();
        assert_eq!(status.inference_count, 3);
        assert_eq!(status.scaler_features, FEATURE_COUNT);
        assert_eq!(status.threshold, 0.80);
        assert_eq!(status.layout.feature_count, FEATURE_COUNT);
        assert_eq!(status.model, "classifier");
    }

    #[test]
    fn test_result_rendering() {
        let result = PredictionResult {
            probability: 0.8666,
            decision: true,
            threshold: 0.8,
            inference_time_us: 10,
        };
        assert_eq!(result.probability_display(), "0.87");
        assert_eq!(result.summary(), "Probability of Passing (G3 >= 10): 0.87");
        assert!(result.verdict().message().contains("PASS"));
        assert!(Verdict::DropOut.message().contains("DROP OUT"));
    }

    #[test]
    fn test_load_fails_on_missing_artifacts() {
        let config = ArtifactConfig::new("/nonexistent/model.onnx", "/nonexistent/scaler.json");
        let err = Predictor::load(&config).unwrap_err();
        assert!(matches!(err, PredictError::ArtifactLoad { artifact: "scaler", .. }));
    }

    #[test]
    fn test_load_fails_on_missing_model() {
        let mut scaler = tempfile::NamedTempFile::new().unwrap();
        let json = serde_json::json!({
            "data_min_": vec![0.0; FEATURE_COUNT],
            "data_max_": vec![1.0; FEATURE_COUNT],
        });
        write!(scaler, "{}", json).unwrap();

        let config = ArtifactConfig::new("/nonexistent/model.onnx", scaler.path().to_string_lossy());
        let err = Predictor::load(&config).unwrap_err();
        assert!(matches!(err, PredictError::ArtifactLoad { artifact: "model", .. }));
    }

    #[test]
    fn test_load_rejects_bad_manifest() {
        let mut manifest = tempfile::NamedTempFile::new().unwrap();
        write!(manifest, "{{\"feature_version\": 99}}").unwrap();

        let config = ArtifactConfig::new("/nonexistent/model.onnx", "/nonexistent/scaler.json")
            .with_manifest(manifest.path().to_string_lossy());
        let err = Predictor::load(&config).unwrap_err();
        assert!(matches!(err, PredictError::ArtifactLoad { artifact: "manifest", .. }));
    }
}
