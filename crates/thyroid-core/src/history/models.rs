use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// The single local user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub name: String,
    /// Kilograms.
    pub weight: f64,
    /// Daily levothyroxine dose in micrograms.
    pub current_dose: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub age: Option<u32>,
}

impl Default for UserProfile {
    fn default() -> Self {
        Self {
            name: "Invitado".into(),
            weight: 70.0,
            current_dose: 100.0,
            age: None,
        }
    }
}

impl UserProfile {
    /// # Errors
    /// Blank name, non-positive weight or dose, or an age of zero.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.name.trim().is_empty() {
            return Err(ValidationError::Blank { field: "name" });
        }
        ensure_positive("weight", self.weight)?;
        ensure_positive("currentDose", self.current_dose)?;
        if self.age == Some(0) {
            return Err(ValidationError::NotPositive {
                field: "age",
                value: 0.0,
            });
        }
        Ok(())
    }
}

/// One diary submission. Immutable once stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SymptomEntry {
    pub id: String,
    pub date: NaiveDate,
    pub symptoms: Vec<String>,
    #[serde(default)]
    pub notes: String,
}

/// One weight measurement, stamped with the dose in effect at the time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeightEntry {
    pub date: NaiveDate,
    pub weight: f64,
    pub dose: f64,
}

pub(crate) fn ensure_positive(field: &'static str, value: f64) -> Result<(), ValidationError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ValidationError::NotPositive { field, value })
    }
}
