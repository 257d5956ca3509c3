//! Form schema handler

use axum::Json;
use passpredict_core::logic::features::FormSchema;

/// Sections, labels, options and defaults for every field
pub async fn schema() -> Json<FormSchema> {
    Json(FormSchema::current())
}
