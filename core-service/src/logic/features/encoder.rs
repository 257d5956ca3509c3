//! Encoder - RawInput → FeatureVector
//!
//! Categorical labels go through their category table, numeric fields pass
//! through unchanged. The array below is written in `FEATURE_LAYOUT` order;
//! `tests.rs` cross-checks every position by name.

use crate::logic::error::PredictResult;
use super::categories::{self as cat, CategoryMap};
use super::input::RawInput;
use super::vector::FeatureVector;

fn code(map: &CategoryMap, value: &str) -> PredictResult<f32> {
    map.code(value).map(f32::from)
}

/// Encode one student's answers. Fails on the first label that is not in its
/// field's table; numeric ranges are the caller's concern (`RawInput::validate`).
pub fn encode(raw: &RawInput) -> PredictResult<FeatureVector> {
    let values = [
        code(&cat::SCHOOL, &raw.school)?,
        code(&cat::SEX, &raw.sex)?,
        f32::from(raw.age),
        code(&cat::ADDRESS, &raw.address)?,
        code(&cat::FAMSIZE, &raw.famsize)?,
        code(&cat::PSTATUS, &raw.pstatus)?,
        f32::from(raw.medu),
        f32::from(raw.fedu),
        code(&cat::MJOB, &raw.mjob)?,
        code(&cat::FJOB, &raw.fjob)?,
        code(&cat::REASON, &raw.reason)?,
        code(&cat::GUARDIAN, &raw.guardian)?,
        f32::from(raw.traveltime),
        f32::from(raw.studytime),
        f32::from(raw.failures),
        code(&cat::SCHOOLSUP, &raw.schoolsup)?,
        code(&cat::FAMSUP, &raw.famsup)?,
        code(&cat::PAID, &raw.paid)?,
        code(&cat::ACTIVITIES, &raw.activities)?,
        code(&cat::NURSERY, &raw.nursery)?,
        code(&cat::HIGHER, &raw.higher)?,
        code(&cat::INTERNET, &raw.internet)?,
        code(&cat::ROMANTIC, &raw.romantic)?,
        f32::from(raw.famrel),
        f32::from(raw.freetime),
        f32::from(raw.goout),
        f32::from(raw.dalc),
        f32::from(raw.walc),
        f32::from(raw.health),
        f32::from(raw.absences),
        f32::from(raw.g1),
        f32::from(raw.g2),
    ];

    Ok(FeatureVector::from_values(values))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logic::error::PredictError;

    #[test]
    fn test_encode_defaults() {
        let vector = encode(&RawInput::default()).unwrap();
        assert_eq!(vector.get_by_name("school"), Some(1.0));
        assert_eq!(vector.get_by_name("Mjob"), Some(0.0));
        assert_eq!(vector.get_by_name("higher"), Some(1.0));
        assert_eq!(vector.get_by_name("studytime"), Some(2.0));
    }

    #[test]
    fn test_first_bad_label_reported() {
        let raw = RawInput {
            reason: "proximity".into(),
            guardian: "aunt".into(),
            ..RawInput::default()
        };
        match encode(&raw) {
            Err(PredictError::InvalidCategory { field, value }) => {
                assert_eq!(field, "reason");
                assert_eq!(value, "proximity");
            }
            other => panic!("expected InvalidCategory, got {:?}", other),
        }
    }

    #[test]
    fn test_encode_is_deterministic() {
        let raw = RawInput::default();
        assert_eq!(encode(&raw).unwrap(), encode(&raw).unwrap());
    }
}
