//! Error handling

use axum::{
    extract::rejection::JsonRejection,
    response::{IntoResponse, Response},
    http::StatusCode,
    Json,
};
use passpredict_core::{PredictError, FEATURE_LAYOUT};
use serde_json::json;
use thiserror::Error;

pub type AppResult<T> = Result<T, AppError>;

#[derive(Debug, Error)]
pub enum AppError {
    /// A field is outside its allowed range
    #[error("{0}")]
    ValidationError(String),

    /// A select field carries a label the form never offers
    #[error("{0}")]
    InvalidCategory(String),

    /// Body is not JSON at all
    #[error("{0}")]
    BadRequest(String),

    /// The model or scaler rejected the request
    #[error("{0}")]
    PredictionFailed(String),

    #[error("{0}")]
    InternalError(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match &self {
            AppError::ValidationError(msg) => (StatusCode::UNPROCESSABLE_ENTITY, msg.as_str()),
            AppError::InvalidCategory(msg) => (StatusCode::BAD_REQUEST, msg.as_str()),
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg.as_str()),
            AppError::PredictionFailed(msg) => {
                tracing::error!("Prediction failed: {}", msg);
                (StatusCode::INTERNAL_SERVER_ERROR, "Prediction failed, no result was produced")
            }
            AppError::InternalError(msg) => {
                tracing::error!("Internal error: {}", msg);
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error")
            }
        };

        let body = Json(json!({
            "error": error_message,
            "status": status.as_u16()
        }));

        (status, body).into_response()
    }
}

impl From<PredictError> for AppError {
    fn from(err: PredictError) -> Self {
        match err {
            PredictError::InvalidCategory { .. } => AppError::InvalidCategory(err.to_string()),
            PredictError::ScalerShape { .. } | PredictError::ModelInference(_) => {
                AppError::PredictionFailed(err.to_string())
            }
            PredictError::ArtifactLoad { .. }
            | PredictError::InvalidThreshold(_)
            | PredictError::InvalidConfig { .. } => {
                AppError::InternalError(err.to_string())
            }
        }
    }
}

/// Missing fields and values that do not fit the field type (`"absences": 300`,
/// a negative `age`) are validation failures like any other out-of-range value.
impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        match rejection {
            JsonRejection::JsonDataError(_) => AppError::ValidationError(rejection.body_text()),
            _ => AppError::BadRequest(rejection.body_text()),
        }
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let mut fields: Vec<String> = errors
            .field_errors()
            .into_iter()
            .map(|(field, errs)| {
                let range = errs
                    .iter()
                    .find(|e| e.code == "range")
                    .map(|e| {
                        let bound = |key: &str| e.params.get(key).map(|v| v.to_string());
                        match (bound("min"), bound("max")) {
                            (Some(min), Some(max)) => format!(" (allowed {}-{})", min, max),
                            (None, Some(max)) => format!(" (allowed 0-{})", max),
                            _ => String::new(),
                        }
                    })
                    .unwrap_or_default();
                // Report the column name clients send (`G1`, not `g1`)
                let column = FEATURE_LAYOUT
                    .iter()
                    .find(|name| name.eq_ignore_ascii_case(&field))
                    .map(|name| name.to_string())
                    .unwrap_or_else(|| field.to_string());
                format!("{}{}", column, range)
            })
            .collect();
        fields.sort();

        AppError::ValidationError(format!("out of range: {}", fields.join(", ")))
    }
}
