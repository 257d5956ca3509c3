//! Feature Layout - Centralized Feature Definition
//!
//! **CRITICAL: This file controls the column order the classifier was trained on**
//!
//! ## Rules (NEVER break these):
//! 1. Add feature → increment FEATURE_VERSION
//! 2. Change order → increment FEATURE_VERSION
//! 3. Remove feature → increment FEATURE_VERSION
//!
//! A reordered vector still has 32 numbers in it, so nothing downstream
//! fails. The predictions are just wrong.

use crc32fast::Hasher;
use serde::{Deserialize, Serialize};

// ============================================================================
// FEATURE VERSION
// ============================================================================

/// Current feature layout version
/// MUST be incremented when layout changes
pub const FEATURE_VERSION: u8 = 1;

// ============================================================================
// FEATURE LAYOUT (Authoritative source)
// ============================================================================

/// Feature names in exact order they appear in the vector
pub const FEATURE_LAYOUT: &[&str] = &[
    // === Personal & family (0-11) ===
    "school",      // 0: GP / MS
    "sex",         // 1
    "age",         // 2: 15-22
    "address",     // 3: urban / rural
    "famsize",     // 4: GT3 / LE3
    "Pstatus",     // 5: parents together / apart
    "Medu",        // 6: 0-4
    "Fedu",        // 7: 0-4
    "Mjob",        // 8
    "Fjob",        // 9
    "reason",      // 10: reason to choose school
    "guardian",    // 11

    // === School & study habits (12-22) ===
    "traveltime",  // 12: 1-4
    "studytime",   // 13: 1-4
    "failures",    // 14: 0-4
    "schoolsup",   // 15
    "famsup",      // 16
    "paid",        // 17
    "activities",  // 18
    "nursery",     // 19
    "higher",      // 20
    "internet",    // 21
    "romantic",    // 22

    // === Social & health (23-29) ===
    "famrel",      // 23: 1-5
    "freetime",    // 24: 1-5
    "goout",       // 25: 1-5
    "Dalc",        // 26: 1-5
    "Walc",        // 27: 1-5
    "health",      // 28: 1-5
    "absences",    // 29: 0-75

    // === Grades (30-31) ===
    "G1",          // 30: 0-20
    "G2",          // 31: 0-20
];

/// Total number of features
/// IMPORTANT: Must match FEATURE_LAYOUT.len()!
pub const FEATURE_COUNT: usize = 32;

// ============================================================================
// LAYOUT HASH
// ============================================================================

/// CRC32 over version and names, used to detect artifacts built for another layout
pub fn compute_layout_hash() -> u32 {
    let mut hasher = Hasher::new();

    hasher.update(&[FEATURE_VERSION]);

    for name in FEATURE_LAYOUT {
        hasher.update(name.as_bytes());
        hasher.update(&[0]); // Separator
    }

    hasher.finalize()
}

pub fn layout_hash() -> u32 {
    compute_layout_hash()
}

// ============================================================================
// LAYOUT INFO
// ============================================================================

/// Complete layout information for serialization/logging
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LayoutInfo {
    pub version: u8,
    pub hash: u32,
    pub feature_count: usize,
    pub feature_names: Vec<String>,
}

impl LayoutInfo {
    pub fn current() -> Self {
        Self {
            version: FEATURE_VERSION,
            hash: layout_hash(),
            feature_count: FEATURE_COUNT,
            feature_names: FEATURE_LAYOUT.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl Default for LayoutInfo {
    fn default() -> Self {
        Self::current()
    }
}

// ============================================================================
// LAYOUT VALIDATION
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LayoutMismatchError {
    pub expected_version: u8,
    pub expected_hash: u32,
    pub actual_version: u8,
    pub actual_hash: u32,
}

impl std::fmt::Display for LayoutMismatchError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Feature layout mismatch: expected v{} (hash: {:08x}), got v{} (hash: {:08x})",
            self.expected_version,
            self.expected_hash,
            self.actual_version,
            self.actual_hash
        )
    }
}

impl std::error::Error for LayoutMismatchError {}

pub fn validate_layout(incoming_version: u8, incoming_hash: u32) -> Result<(), LayoutMismatchError> {
    let current_hash = layout_hash();

    if incoming_version != FEATURE_VERSION || incoming_hash != current_hash {
        return Err(LayoutMismatchError {
            expected_version: FEATURE_VERSION,
            expected_hash: current_hash,
            actual_version: incoming_version,
            actual_hash: incoming_hash,
        });
    }

    Ok(())
}

/// Check a column list exported alongside an artifact against the layout.
/// Returns the first position that differs.
pub fn check_feature_names<S: AsRef<str>>(names: &[S]) -> Result<(), String> {
    if names.len() != FEATURE_COUNT {
        return Err(format!(
            "expected {} feature names, got {}",
            FEATURE_COUNT,
            names.len()
        ));
    }

    for (i, (got, want)) in names.iter().zip(FEATURE_LAYOUT).enumerate() {
        if got.as_ref() != *want {
            return Err(format!(
                "column {} is '{}', layout expects '{}'",
                i,
                got.as_ref(),
                want
            ));
        }
    }

    Ok(())
}

// ============================================================================
// FEATURE INDEX LOOKUP
// ============================================================================

/// Get feature index by name (O(n) but features are few)
pub fn feature_index(name: &str) -> Option<usize> {
    FEATURE_LAYOUT.iter().position(|&n| n == name)
}

pub fn feature_name(index: usize) -> Option<&'static str> {
    FEATURE_LAYOUT.get(index).copied()
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_feature_count() {
        assert_eq!(FEATURE_COUNT, 32);
        assert_eq!(FEATURE_LAYOUT.len(), FEATURE_COUNT);
    }

    #[test]
    fn test_feature_names_unique() {
        for (i, name) in FEATURE_LAYOUT.iter().enumerate() {
            assert_eq!(feature_index(name), Some(i), "duplicate name {}", name);
        }
    }

    #[test]
    fn test_layout_hash_consistency() {
        assert_eq!(compute_layout_hash(), compute_layout_hash());
        assert_ne!(layout_hash(), 0);
    }

    #[test]
    fn test_validate_layout() {
        assert!(validate_layout(FEATURE_VERSION, layout_hash()).is_ok());
        assert!(validate_layout(FEATURE_VERSION + 1, layout_hash()).is_err());

        let err = validate_layout(FEATURE_VERSION, layout_hash().wrapping_add(1)).unwrap_err();
        assert_eq!(err.expected_hash, layout_hash());
        assert!(err.to_string().contains("mismatch"));
    }

    #[test]
    fn test_feature_index() {
        assert_eq!(feature_index("school"), Some(0));
        assert_eq!(feature_index("Pstatus"), Some(5));
        assert_eq!(feature_index("Mjob"), Some(8));
        assert_eq!(feature_index("romantic"), Some(22));
        assert_eq!(feature_index("absences"), Some(29));
        assert_eq!(feature_index("G2"), Some(31));
        assert_eq!(feature_index("pstatus"), None);
    }

    #[test]
    fn test_feature_name() {
        assert_eq!(feature_name(0), Some("school"));
        assert_eq!(feature_name(31), Some("G2"));
        assert_eq!(feature_name(32), None);
    }

    #[test]
    fn test_check_feature_names() {
        assert!(check_feature_names(FEATURE_LAYOUT).is_ok());

        let mut swapped: Vec<&str> = FEATURE_LAYOUT.to_vec();
        swapped.swap(30, 31);
        let err = check_feature_names(&swapped).unwrap_err();
        assert!(err.contains("column 30"));

        assert!(check_feature_names(&FEATURE_LAYOUT[..31]).is_err());
    }

    #[test]
    fn test_layout_info() {
        let info = LayoutInfo::current();
        assert_eq!(info.version, FEATURE_VERSION);
        assert_eq!(info.feature_count, FEATURE_COUNT);
        assert_eq!(info.feature_names.len(), FEATURE_COUNT);
        assert_eq!(info.feature_names[2], "age");
    }
}
