//! Decision Threshold
//!
//! P(pass) at or above the threshold is a PASS. The default of 0.80 is the
//! precision-biased cut-off chosen when the model was trained, well above the
//! usual 0.5.

use serde::{Deserialize, Serialize};

use crate::constants::DEFAULT_PASS_THRESHOLD;
use crate::logic::error::{PredictError, PredictResult};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DecisionPolicy {
    /// Inclusive lower bound on P(pass) for a PASS verdict
    pub threshold: f32,
}

impl Default for DecisionPolicy {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_PASS_THRESHOLD,
        }
    }
}

impl DecisionPolicy {
    pub fn new(threshold: f32) -> PredictResult<Self> {
        if !(0.0..=1.0).contains(&threshold) {
            return Err(PredictError::InvalidThreshold(threshold));
        }
        Ok(Self { threshold })
    }

    pub fn decide(&self, probability: f32) -> bool {
        probability >= self.threshold
    }
}

/// Pick the threshold: config override, then manifest, then the default.
/// The chosen value must lie in [0, 1].
pub fn resolve_threshold(config: Option<f32>, manifest: Option<f32>) -> PredictResult<DecisionPolicy> {
    let threshold = match (config, manifest) {
        (Some(t), Some(m)) if t != m => {
            log::warn!("PASS_THRESHOLD={} overrides manifest threshold {}", t, m);
            t
        }
        (Some(t), _) => t,
        (None, Some(m)) => m,
        (None, None) => DEFAULT_PASS_THRESHOLD,
    };
    DecisionPolicy::new(threshold)
}

/// Decision under the default policy
pub fn decide(probability: f32) -> bool {
    DecisionPolicy::default().decide(probability)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_threshold() {
        assert_eq!(DecisionPolicy::default().threshold, 0.80);
    }

    #[test]
    fn test_threshold_is_inclusive() {
        assert!(decide(0.80));
        assert!(!decide(0.7999));
        assert!(decide(1.0));
        assert!(!decide(0.0));
    }

    #[test]
    fn test_monotonic() {
        let mut previous = false;
        for i in 0..=1000 {
            let current = decide(i as f32 / 1000.0);
            assert!(current >= previous, "decision flipped back at {}", i);
            previous = current;
        }
    }

    #[test]
    fn test_custom_threshold() {
        let policy = DecisionPolicy::new(0.5).unwrap();
        assert!(policy.decide(0.5));
        assert!(!policy.decide(0.49));
    }

    #[test]
    fn test_threshold_bounds() {
        assert!(DecisionPolicy::new(0.0).is_ok());
        assert!(DecisionPolicy::new(1.0).is_ok());
        assert!(matches!(DecisionPolicy::new(1.5), Err(PredictError::InvalidThreshold(_))));
        assert!(DecisionPolicy::new(-0.1).is_err());
        assert!(DecisionPolicy::new(f32::NAN).is_err());
    }

    #[test]
    fn test_resolve_precedence() {
        assert_eq!(resolve_threshold(None, None).unwrap().threshold, 0.80);
        assert_eq!(resolve_threshold(None, Some(0.7)).unwrap().threshold, 0.7);
        assert_eq!(resolve_threshold(Some(0.6), None).unwrap().threshold, 0.6);
        assert_eq!(resolve_threshold(Some(0.6), Some(0.7)).unwrap().threshold, 0.6);
        assert_eq!(resolve_threshold(Some(0.7), Some(0.7)).unwrap().threshold, 0.7);
    }

    #[test]
    fn test_resolve_rejects_out_of_range() {
        assert!(matches!(resolve_threshold(None, Some(1.5)), Err(PredictError::InvalidThreshold(_))));
        assert!(matches!(resolve_threshold(Some(-0.2), Some(0.8)), Err(PredictError::InvalidThreshold(_))));
    }
}
