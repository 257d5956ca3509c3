//! Logic Module - Encoding & Inference
//!
//! - `features/` - Field layout, category tables, raw input, encoder
//! - `model/` - Scaler, classifier, decision policy, predictor handle

pub mod config;
pub mod error;

pub mod features;
pub mod model;
