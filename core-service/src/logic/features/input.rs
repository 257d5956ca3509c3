//! Raw Input - One student's answers as the form submits them
//!
//! Serialized with the dataset's column names (`Pstatus`, `Medu`, `G1`, ...).
//! Numeric ranges are checked by `Validate`; categorical labels are checked
//! by the encoder against the category tables.

use serde::{Deserialize, Serialize};
use validator::Validate;

use super::categories;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct RawInput {
    // === Personal & family ===
    pub school: String,
    pub sex: String,
    #[validate(range(min = 15, max = 22))]
    pub age: u8,
    pub address: String,
    pub famsize: String,
    #[serde(rename = "Pstatus")]
    pub pstatus: String,
    #[serde(rename = "Medu")]
    #[validate(range(max = 4))]
    pub medu: u8,
    #[serde(rename = "Fedu")]
    #[validate(range(max = 4))]
    pub fedu: u8,
    #[serde(rename = "Mjob")]
    pub mjob: String,
    #[serde(rename = "Fjob")]
    pub fjob: String,
    pub reason: String,
    pub guardian: String,

    // === School & study habits ===
    #[validate(range(min = 1, max = 4))]
    pub traveltime: u8,
    #[validate(range(min = 1, max = 4))]
    pub studytime: u8,
    #[validate(range(max = 4))]
    pub failures: u8,
    pub schoolsup: String,
    pub famsup: String,
    pub paid: String,
    pub activities: String,
    pub nursery: String,
    pub higher: String,
    pub internet: String,
    pub romantic: String,

    // === Social & health ===
    #[validate(range(min = 1, max = 5))]
    pub famrel: u8,
    #[validate(range(min = 1, max = 5))]
    pub freetime: u8,
    #[validate(range(min = 1, max = 5))]
    pub goout: u8,
    #[serde(rename = "Dalc")]
    #[validate(range(min = 1, max = 5))]
    pub dalc: u8,
    #[serde(rename = "Walc")]
    #[validate(range(min = 1, max = 5))]
    pub walc: u8,
    #[validate(range(min = 1, max = 5))]
    pub health: u8,
    #[validate(range(max = 75))]
    pub absences: u8,

    // === Grades ===
    #[serde(rename = "G1")]
    #[validate(range(max = 20))]
    pub g1: u8,
    #[serde(rename = "G2")]
    #[validate(range(max = 20))]
    pub g2: u8,
}

impl Default for RawInput {
    /// What the form shows before the user touches anything: first option of
    /// every select box, slider defaults otherwise.
    fn default() -> Self {
        let yes_no = categories::SCHOOLSUP.default_label().to_string();
        Self {
            school: categories::SCHOOL.default_label().to_string(),
            sex: categories::SEX.default_label().to_string(),
            age: 17,
            address: categories::ADDRESS.default_label().to_string(),
            famsize: categories::FAMSIZE.default_label().to_string(),
            pstatus: categories::PSTATUS.default_label().to_string(),
            medu: 4,
            fedu: 4,
            mjob: categories::MJOB.default_label().to_string(),
            fjob: categories::FJOB.default_label().to_string(),
            reason: categories::REASON.default_label().to_string(),
            guardian: categories::GUARDIAN.default_label().to_string(),
            traveltime: 1,
            studytime: 2,
            failures: 0,
            schoolsup: yes_no.clone(),
            famsup: yes_no.clone(),
            paid: yes_no.clone(),
            activities: yes_no.clone(),
            nursery: yes_no.clone(),
            higher: yes_no.clone(),
            internet: yes_no.clone(),
            romantic: yes_no,
            famrel: 4,
            freetime: 3,
            goout: 3,
            dalc: 1,
            walc: 1,
            health: 3,
            absences: 2,
            g1: 10,
            g2: 10,
        }
    }
}

impl RawInput {
    /// Numeric field by layout column name
    pub fn numeric(&self, field: &str) -> Option<u8> {
        let value = match field {
            "age" => self.age,
            "Medu" => self.medu,
            "Fedu" => self.fedu,
            "traveltime" => self.traveltime,
            "studytime" => self.studytime,
            "failures" => self.failures,
            "famrel" => self.famrel,
            "freetime" => self.freetime,
            "goout" => self.goout,
            "Dalc" => self.dalc,
            "Walc" => self.walc,
            "health" => self.health,
            "absences" => self.absences,
            "G1" => self.g1,
            "G2" => self.g2,
            _ => return None,
        };
        Some(value)
    }

    pub fn set_numeric(&mut self, field: &str, value: u8) -> bool {
        let slot = match field {
            "age" => &mut self.age,
            "Medu" => &mut self.medu,
            "Fedu" => &mut self.fedu,
            "traveltime" => &mut self.traveltime,
            "studytime" => &mut self.studytime,
            "failures" => &mut self.failures,
            "famrel" => &mut self.famrel,
            "freetime" => &mut self.freetime,
            "goout" => &mut self.goout,
            "Dalc" => &mut self.dalc,
            "Walc" => &mut self.walc,
            "health" => &mut self.health,
            "absences" => &mut self.absences,
            "G1" => &mut self.g1,
            "G2" => &mut self.g2,
            _ => return false,
        };
        *slot = value;
        true
    }

    /// Categorical field by layout column name
    pub fn categorical(&self, field: &str) -> Option<&str> {
        let value = match field {
            "school" => &self.school,
            "sex" => &self.sex,
            "address" => &self.address,
            "famsize" => &self.famsize,
            "Pstatus" => &self.pstatus,
            "Mjob" => &self.mjob,
            "Fjob" => &self.fjob,
            "reason" => &self.reason,
            "guardian" => &self.guardian,
            "schoolsup" => &self.schoolsup,
            "famsup" => &self.famsup,
            "paid" => &self.paid,
            "activities" => &self.activities,
            "nursery" => &self.nursery,
            "higher" => &self.higher,
            "internet" => &self.internet,
            "romantic" => &self.romantic,
            _ => return None,
        };
        Some(value.as_str())
    }

    /// Overwrite a categorical field by column name. Labels are not checked here.
    pub fn set_categorical(&mut self, field: &str, value: impl Into<String>) -> bool {
        let slot = match field {
            "school" => &mut self.school,
            "sex" => &mut self.sex,
            "address" => &mut self.address,
            "famsize" => &mut self.famsize,
            "Pstatus" => &mut self.pstatus,
            "Mjob" => &mut self.mjob,
            "Fjob" => &mut self.fjob,
            "reason" => &mut self.reason,
            "guardian" => &mut self.guardian,
            "schoolsup" => &mut self.schoolsup,
            "famsup" => &mut self.famsup,
            "paid" => &mut self.paid,
            "activities" => &mut self.activities,
            "nursery" => &mut self.nursery,
            "higher" => &mut self.higher,
            "internet" => &mut self.internet,
            "romantic" => &mut self.romantic,
            _ => return false,
        };
        *slot = value.into();
        true
    }
}
