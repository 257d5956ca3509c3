//! Central Configuration Constants
//!
//! Single source of truth for all configuration defaults.
//! Artifact locations and the pass threshold can be overridden from the environment.

/// Default ONNX export of the trained pass/fail classifier
pub const DEFAULT_MODEL_PATH: &str = "artifacts/student_dropout_model.onnx";

/// Default JSON export of the fitted min-max scaler
pub const DEFAULT_SCALER_PATH: &str = "artifacts/min_max_scaler.json";

/// Minimum P(pass) for a PASS verdict (inclusive)
pub const DEFAULT_PASS_THRESHOLD: f32 = 0.80;

/// Final grade (G3) the classifier was trained to predict reaching
pub const PASSING_GRADE: u8 = 10;

// ============================================
// Helper functions to read from env with fallback
// ============================================

/// Get model path from environment or use default
pub fn get_model_path() -> String {
    std::env::var("MODEL_PATH")
        .unwrap_or_else(|_| DEFAULT_MODEL_PATH.to_string())
}

/// Get scaler path from environment or use default
pub fn get_scaler_path() -> String {
    std::env::var("SCALER_PATH")
        .unwrap_or_else(|_| DEFAULT_SCALER_PATH.to_string())
}

/// Optional model manifest sidecar
pub fn get_manifest_path() -> Option<String> {
    non_empty_var("MODEL_MANIFEST_PATH")
}

/// Threshold override; `None` when unset, `Err(raw)` when set but not a number
pub fn get_pass_threshold() -> Result<Option<f32>, String> {
    parse_threshold(non_empty_var("PASS_THRESHOLD").as_deref())
}

fn parse_threshold(raw: Option<&str>) -> Result<Option<f32>, String> {
    match raw {
        None => Ok(None),
        Some(s) => s.parse().map(Some).map_err(|_| s.to_string()),
    }
}

/// Expected SHA-256 of the model file
pub fn get_model_sha256() -> Option<String> {
    non_empty_var("MODEL_SHA256")
}

/// Expected SHA-256 of the scaler file
pub fn get_scaler_sha256() -> Option<String> {
    non_empty_var("SCALER_SHA256")
}

fn non_empty_var(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_threshold() {
        assert_eq!(parse_threshold(None), Ok(None));
        assert_eq!(parse_threshold(Some("0.5")), Ok(Some(0.5)));
        assert_eq!(parse_threshold(Some("1")), Ok(Some(1.0)));
    }

    #[test]
    fn test_parse_threshold_malformed() {
        assert_eq!(parse_threshold(Some("0,5")), Err("0,5".to_string()));
        assert_eq!(parse_threshold(Some("50%")), Err("50%".to_string()));
    }
}
