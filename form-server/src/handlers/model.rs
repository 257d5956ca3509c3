//! Model status handler

use axum::{extract::State, Json};
use passpredict_core::EngineStatus;

use crate::AppState;

pub async fn status(State(state): State<AppState>) -> Json<EngineStatus> {
    Json(state.predictor.status())
}
