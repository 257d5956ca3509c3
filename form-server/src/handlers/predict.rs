//! Encode and predict handlers

use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use passpredict_core::{encode, RawInput, FEATURE_LAYOUT};
use validator::Validate;

use crate::models::{EncodeResponse, PredictResponse};
use crate::{AppState, AppResult};

/// Encode and scale a submission without running the classifier
pub async fn encode_input(
    State(state): State<AppState>,
    payload: Result<Json<RawInput>, JsonRejection>,
) -> AppResult<Json<EncodeResponse>> {
    let Json(raw) = payload?;
    raw.validate()?;

    let features = encode(&raw)?;
    let scaled = state.predictor.scale(&features)?;

    Ok(Json(EncodeResponse {
        feature_names: FEATURE_LAYOUT.iter().map(|name| name.to_string()).collect(),
        features,
        scaled: scaled.values,
    }))
}

/// Full pipeline: validate → encode → scale → infer → decide
pub async fn predict(
    State(state): State<AppState>,
    payload: Result<Json<RawInput>, JsonRejection>,
) -> AppResult<Json<PredictResponse>> {
    let Json(raw) = payload?;
    raw.validate()?;

    let predictor = state.predictor.clone();
    let result = tokio::task::spawn_blocking(move || predictor.predict_raw(&raw))
        .await
        .map_err(|e| crate::AppError::InternalError(format!("prediction task failed: {}", e)))??;

    let response = PredictResponse::from(result);
    tracing::info!(
        prediction_id = %response.prediction_id,
        probability = response.probability,
        pass = response.pass,
        "Prediction served"
    );

    Ok(Json(response))
}
