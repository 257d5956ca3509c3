//! Features Module - Student record → model input
//!
//! Field layout, category tables, the raw form record, the form schema and
//! the encoder that turns one into a `FeatureVector`.

pub mod layout;
pub mod categories;
pub mod input;
pub mod schema;
pub mod vector;
pub mod encoder;


// Re-export common types
pub use layout::{LayoutInfo, FEATURE_COUNT, FEATURE_LAYOUT, FEATURE_VERSION};
pub use input::RawInput;
pub use schema::FormSchema;
pub use vector::FeatureVector;
pub use encoder::encode;
