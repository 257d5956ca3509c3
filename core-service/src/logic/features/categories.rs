//! Category Tables - Label → code maps for the categorical fields
//!
//! Codes are the ones the classifier was trained against. The canonical
//! label of each entry is the exact option text the form shows; aliases
//! accept the short forms API clients tend to send.
//!
//! NOTE: `Mjob`/`Fjob` map both `at_home` and `services` to 0. The trained
//! model expects this, so changing it requires retraining.

use crate::logic::error::{PredictError, PredictResult};

// ============================================================================
// TYPES
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CategoryEntry {
    /// Option text shown in the form
    pub label: &'static str,
    pub aliases: &'static [&'static str],
    pub code: u8,
}

impl CategoryEntry {
    fn matches(&self, value: &str) -> bool {
        self.label == value || self.aliases.contains(&value)
    }
}

/// Immutable lookup table for one categorical field
#[derive(Debug, Clone, Copy)]
pub struct CategoryMap {
    /// Column name in the feature layout
    pub field: &'static str,
    pub entries: &'static [CategoryEntry],
}

impl CategoryMap {
    /// Encoded value for `value`, or `InvalidCategory`
    pub fn code(&self, value: &str) -> PredictResult<u8> {
        self.entries
            .iter()
            .find(|e| e.matches(value))
            .map(|e| e.code)
            .ok_or_else(|| PredictError::InvalidCategory {
                field: self.field,
                value: value.to_string(),
            })
    }

    pub fn contains(&self, value: &str) -> bool {
        self.entries.iter().any(|e| e.matches(value))
    }

    /// Canonical labels in form order. The first one is the form default.
    pub fn labels(&self) -> impl Iterator<Item = &'static str> {
        self.entries.iter().map(|e| e.label)
    }

    pub fn default_label(&self) -> &'static str {
        self.entries.first().map(|e| e.label).unwrap_or_default()
    }
}

const fn entry(label: &'static str, aliases: &'static [&'static str], code: u8) -> CategoryEntry {
    CategoryEntry { label, aliases, code }
}

// ============================================================================
// TABLES
// ============================================================================

pub const SCHOOL: CategoryMap = CategoryMap {
    field: "school",
    entries: &[
        entry("GP", &[], 1),
        entry("MS", &[], 0),
    ],
};

pub const SEX: CategoryMap = CategoryMap {
    field: "sex",
    entries: &[
        entry("Male (M)", &["Male", "M"], 1),
        entry("Female (F)", &["Female", "F"], 0),
    ],
};

pub const ADDRESS: CategoryMap = CategoryMap {
    field: "address",
    entries: &[
        entry("Urban (U)", &["Urban", "U"], 1),
        entry("Rural (R)", &["Rural", "R"], 0),
    ],
};

pub const FAMSIZE: CategoryMap = CategoryMap {
    field: "famsize",
    entries: &[
        entry("Greater than 3 (GT3)", &["GT3"], 1),
        entry("Less or equal to 3 (LE3)", &["LE3"], 0),
    ],
};

pub const PSTATUS: CategoryMap = CategoryMap {
    field: "Pstatus",
    entries: &[
        entry("Living Together (T)", &["Together", "T"], 1),
        entry("Living Apart (A)", &["Apart", "A"], 0),
    ],
};

const JOB: &[CategoryEntry] = &[
    entry("at_home", &[], 0),
    entry("teacher", &[], 1),
    entry("health", &[], 2),
    entry("services", &[], 0),
    entry("other", &[], 4),
];

pub const MJOB: CategoryMap = CategoryMap { field: "Mjob", entries: JOB };
pub const FJOB: CategoryMap = CategoryMap { field: "Fjob", entries: JOB };

pub const REASON: CategoryMap = CategoryMap {
    field: "reason",
    entries: &[
        entry("other", &[], 0),
        entry("home", &[], 1),
        entry("reputation", &[], 2),
        entry("course", &[], 3),
    ],
};

pub const GUARDIAN: CategoryMap = CategoryMap {
    field: "guardian",
    entries: &[
        entry("other", &[], 0),
        entry("father", &[], 1),
        entry("mother", &[], 2),
    ],
};

const YES_NO: &[CategoryEntry] = &[
    entry("Yes", &["yes"], 1),
    entry("No", &["no"], 0),
];

pub const SCHOOLSUP: CategoryMap = CategoryMap { field: "schoolsup", entries: YES_NO };
pub const FAMSUP: CategoryMap = CategoryMap { field: "famsup", entries: YES_NO };
pub const PAID: CategoryMap = CategoryMap { field: "paid", entries: YES_NO };
pub const ACTIVITIES: CategoryMap = CategoryMap { field: "activities", entries: YES_NO };
pub const NURSERY: CategoryMap = CategoryMap { field: "nursery", entries: YES_NO };
pub const HIGHER: CategoryMap = CategoryMap { field: "higher", entries: YES_NO };
pub const INTERNET: CategoryMap = CategoryMap { field: "internet", entries: YES_NO };
pub const ROMANTIC: CategoryMap = CategoryMap { field: "romantic", entries: YES_NO };

/// Every categorical field, in layout order
pub const ALL: &[CategoryMap] = &[
    SCHOOL, SEX, ADDRESS, FAMSIZE, PSTATUS, MJOB, FJOB, REASON, GUARDIAN,
    SCHOOLSUP, FAMSUP, PAID, ACTIVITIES, NURSERY, HIGHER, INTERNET, ROMANTIC,
];

/// Table for a layout column, `None` for numeric columns
pub fn for_field(field: &str) -> Option<&'static CategoryMap> {
    ALL.iter().find(|m| m.field == field)
}

// ============================================================================
// TESTS
// ============================================================================
