//! Form Schema - What the form collaborator has to render
//!
//! Sections, human labels, select options and slider bounds for every field.
//! Option lists come straight from the category tables so the form can only
//! offer labels the encoder accepts.

use serde::Serialize;

use super::categories::{self as cat, CategoryMap};
use super::input::RawInput;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Widget {
    Select,
    Slider,
    Number,
}

#[derive(Debug, Clone, Copy)]
pub enum FieldKind {
    Categorical(&'static CategoryMap),
    /// Select box over a small integer scale (Medu, Fedu)
    Scale { min: u8, max: u8, default: u8 },
    Slider { min: u8, max: u8, default: u8 },
    Number { min: u8, max: u8, default: u8 },
}

#[derive(Debug, Clone, Copy)]
pub struct FieldSpec {
    /// Layout column name
    pub name: &'static str,
    pub label: &'static str,
    pub kind: FieldKind,
}

#[derive(Debug, Clone, Copy)]
pub struct Section {
    pub title: &'static str,
    pub fields: &'static [FieldSpec],
}

const fn select(name: &'static str, label: &'static str, map: &'static CategoryMap) -> FieldSpec {
    FieldSpec { name, label, kind: FieldKind::Categorical(map) }
}

const fn slider(name: &'static str, label: &'static str, min: u8, max: u8, default: u8) -> FieldSpec {
    FieldSpec { name, label, kind: FieldKind::Slider { min, max, default } }
}

pub const SECTIONS: &[Section] = &[
    Section {
        title: "1. Personal & Family Data",
        fields: &[
            select("school", "School", &cat::SCHOOL),
            select("sex", "Sex", &cat::SEX),
            slider("age", "Age", 15, 22, 17),
            select("address", "Residential Address", &cat::ADDRESS),
            select("famsize", "Family Size", &cat::FAMSIZE),
            select("Pstatus", "Parents' Cohabitation Status", &cat::PSTATUS),
            FieldSpec {
                name: "Medu",
                label: "Mother's Education (0: None, 4: Higher)",
                kind: FieldKind::Scale { min: 0, max: 4, default: 4 },
            },
            FieldSpec {
                name: "Fedu",
                label: "Father's Education (0: None, 4: Higher)",
                kind: FieldKind::Scale { min: 0, max: 4, default: 4 },
            },
            select("Mjob", "Mother's Job", &cat::MJOB),
            select("Fjob", "Father's Job", &cat::FJOB),
            select("reason", "Reason to choose school", &cat::REASON),
            select("guardian", "Student's Guardian", &cat::GUARDIAN),
        ],
    },
    Section {
        title: "2. School & Study Habits",
        fields: &[
            slider("traveltime", "Travel Time to School (1: <15m, 4: >1h)", 1, 4, 1),
            slider("studytime", "Weekly Study Time (1: <2h, 4: >10h)", 1, 4, 2),
            slider("failures", "Past Class Failures (0-4)", 0, 4, 0),
            select("schoolsup", "Extra Educational Support", &cat::SCHOOLSUP),
            select("famsup", "Family Educational Support", &cat::FAMSUP),
            select("paid", "Extra Paid Classes", &cat::PAID),
            select("activities", "Extra-Curricular Activities", &cat::ACTIVITIES),
            select("nursery", "Attended Nursery School", &cat::NURSERY),
            select("higher", "Wants to take Higher Education", &cat::HIGHER),
            select("internet", "Internet Access at Home", &cat::INTERNET),
            select("romantic", "In a Romantic Relationship", &cat::ROMANTIC),
        ],
    },
    Section {
        title: "3. Social & Health Factors",
        fields: &[
            slider("famrel", "Family Relationship Quality (1: Very Bad, 5: Excellent)", 1, 5, 4),
            slider("freetime", "Free Time After School (1: Very Low, 5: Very High)", 1, 5, 3),
            slider("goout", "Going Out with Friends (1: Very Low, 5: Very High)", 1, 5, 3),
            slider("Dalc", "Workday Alcohol Consumption (1: Very Low, 5: Very High)", 1, 5, 1),
            slider("Walc", "Weekend Alcohol Consumption (1: Very Low, 5: Very High)", 1, 5, 1),
            slider("health", "Current Health Status (1: Very Bad, 5: Very Good)", 1, 5, 3),
            FieldSpec {
                name: "absences",
                label: "Number of School Absences",
                kind: FieldKind::Number { min: 0, max: 75, default: 2 },
            },
        ],
    },
    Section {
        title: "4. Academic Grades (0-20)",
        fields: &[
            slider("G1", "G1 Grade (First Period)", 0, 20, 10),
            slider("G2", "G2 Grade (Second Period)", 0, 20, 10),
        ],
    },
];

impl FieldKind {
    /// `(min, max)` for numeric fields
    pub fn bounds(&self) -> Option<(u8, u8)> {
        match *self {
            FieldKind::Categorical(_) => None,
            FieldKind::Scale { min, max, .. }
            | FieldKind::Slider { min, max, .. }
            | FieldKind::Number { min, max, .. } => Some((min, max)),
        }
    }

    pub fn widget(&self) -> Widget {
        match self {
            FieldKind::Categorical(_) | FieldKind::Scale { .. } => Widget::Select,
            FieldKind::Slider { .. } => Widget::Slider,
            FieldKind::Number { .. } => Widget::Number,
        }
    }
}

/// All fields in form order
pub fn fields() -> impl Iterator<Item = &'static FieldSpec> {
    SECTIONS.iter().flat_map(|s| s.fields.iter())
}

pub fn field(name: &str) -> Option<&'static FieldSpec> {
    fields().find(|f| f.name == name)
}

// ============================================================================
// SERIALIZABLE VIEW
// ============================================================================

#[derive(Debug, Clone, Serialize)]
pub struct FieldView {
    pub name: &'static str,
    pub label: &'static str,
    pub widget: Widget,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<serde_json::Value>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max: Option<u8>,
    pub default: serde_json::Value,
}

#[derive(Debug, Clone, Serialize)]
pub struct SectionView {
    pub title: &'static str,
    pub fields: Vec<FieldView>,
}

#[derive(Debug, Clone, Serialize)]
pub struct FormSchema {
    pub sections: Vec<SectionView>,
    pub defaults: RawInput,
}

impl From<&FieldSpec> for FieldView {
    fn from(spec: &FieldSpec) -> Self {
        let (options, default) = match spec.kind {
            FieldKind::Categorical(map) => (
                Some(map.labels().map(serde_json::Value::from).collect()),
                serde_json::Value::from(map.default_label()),
            ),
            FieldKind::Scale { min, max, default } => (
                Some((min..=max).map(serde_json::Value::from).collect()),
                serde_json::Value::from(default),
            ),
            FieldKind::Slider { default, .. } | FieldKind::Number { default, .. } => {
                (None, serde_json::Value::from(default))
            }
        };
        let bounds = spec.kind.bounds();

        Self {
            name: spec.name,
            label: spec.label,
            widget: spec.kind.widget(),
            options,
            min: bounds.map(|(min, _)| min),
            max: bounds.map(|(_, max)| max),
            default,
        }
    }
}

impl FormSchema {
    pub fn current() -> Self {
        Self {
            sections: SECTIONS
                .iter()
                .map(|s| SectionView {
                    title: s.title,
                    fields: s.fields.iter().map(FieldView::from).collect(),
                })
                .collect(),
            defaults: RawInput::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logic::features::layout::FEATURE_LAYOUT;

    #[test]
    fn test_form_order_matches_layout() {
        let names: Vec<_> = fields().map(|f| f.name).collect();
        assert_eq!(names, FEATURE_LAYOUT);
    }

    #[test]
    fn test_section_sizes() {
        let sizes: Vec<_> = SECTIONS.iter().map(|s| s.fields.len()).collect();
        assert_eq!(sizes, [12, 11, 7, 2]);
    }

    #[test]
    fn test_defaults_agree_with_raw_input() {
        let raw = RawInput::default();
        for spec in fields() {
            match spec.kind {
                FieldKind::Categorical(map) => {
                    assert_eq!(raw.categorical(spec.name), Some(map.default_label()), "{}", spec.name);
                }
                FieldKind::Scale { default, .. }
                | FieldKind::Slider { default, .. }
                | FieldKind::Number { default, .. } => {
                    assert_eq!(raw.numeric(spec.name), Some(default), "{}", spec.name);
                }
            }
        }
    }

    #[test]
    fn test_categorical_fields_use_their_table() {
        for spec in fields() {
            if let FieldKind::Categorical(map) = spec.kind {
                assert_eq!(map.field, spec.name);
            }
        }
    }

    #[test]
    fn test_field_view() {
        let medu = FieldView::from(field("Medu").unwrap());
        assert_eq!(medu.widget, Widget::Select);
        assert_eq!(medu.options.as_ref().map(|o| o.len()), Some(5));
        assert_eq!(medu.default, 4);

        let absences = FieldView::from(field("absences").unwrap());
        assert_eq!(absences.widget, Widget::Number);
        assert_eq!(absences.max, Some(75));
        assert!(absences.options.is_none());

        let sex = FieldView::from(field("sex").unwrap());
        assert_eq!(sex.options.unwrap()[0], "Male (M)");
    }

    #[test]
    fn test_schema_serializes() {
        let json = serde_json::to_value(FormSchema::current()).unwrap();
        assert_eq!(json["sections"].as_array().map(|s| s.len()), Some(4));
        assert_eq!(json["defaults"]["G1"], 10);
    }
}
