//! Prediction request/response models

use passpredict_core::{FeatureVector, PredictionResult, Verdict};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Serialize, Deserialize)]
pub struct PredictResponse {
    pub prediction_id: Uuid,
    /// P(G3 >= 10)
    pub probability: f32,
    /// Probability rounded to two decimals, as shown to the user
    pub probability_display: String,
    pub pass: bool,
    pub outcome: Verdict,
    /// Verdict sentence shown under the probability
    pub verdict: String,
    /// "Probability of Passing (G3 >= 10): 0.87"
    pub message: String,
    pub threshold: f32,
    pub inference_time_us: u64,
}

impl From<PredictionResult> for PredictResponse {
    fn from(result: PredictionResult) -> Self {
        let verdict = result.verdict();
        Self {
            prediction_id: Uuid::new_v4(),
            probability: result.probability,
            probability_display: result.probability_display(),
            pass: result.decision,
            outcome: verdict,
            verdict: verdict.message().to_string(),
            message: result.summary(),
            threshold: result.threshold,
            inference_time_us: result.inference_time_us,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct EncodeResponse {
    pub feature_names: Vec<String>,
    pub features: FeatureVector,
    /// Scaled values as fed to the classifier
    pub scaled: Vec<f32>,
}
