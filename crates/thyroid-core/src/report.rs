//! Printable summary for a medical appointment.

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::history::{
    suggested_dose_mcg, symptom_frequency, weight_trend, SymptomCount, SymptomEntry, UserProfile,
    WeightEntry, WeightTrend,
};

const TOP_SYMPTOMS: usize = 3;
const RECENT_ENTRIES: usize = 10;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MedicalReport {
    pub generated_on: NaiveDate,
    pub profile: UserProfile,
    pub suggested_dose_mcg: u32,
    pub latest_weight: Option<WeightEntry>,
    pub weight_trend: WeightTrend,
    pub top_symptoms: Vec<SymptomCount>,
    pub recent_entries: Vec<SymptomEntry>,
    pub total_entries: usize,
}

impl MedicalReport {
    pub fn build(
        profile: &UserProfile,
        symptoms: &[SymptomEntry],
        weights: &[WeightEntry],
        generated_on: NaiveDate,
    ) -> Self {
        let mut top_symptoms = symptom_frequency(symptoms);
        top_symptoms.truncate(TOP_SYMPTOMS);

        Self {
            generated_on,
            profile: profile.clone(),
            suggested_dose_mcg: suggested_dose_mcg(profile.weight),
            latest_weight: weights.last().cloned(),
            weight_trend: weight_trend(weights),
            top_symptoms,
            recent_entries: symptoms.iter().take(RECENT_ENTRIES).cloned().collect(),
            total_entries: symptoms.len(),
        }
    }
}

impl fmt::Display for MedicalReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "REPORTE MÉDICO  ({})", self.generated_on)?;
        writeln!(f, "Paciente: {}", self.profile.name)?;
        if let Some(age) = self.profile.age {
            writeln!(f, "Edad: {age}")?;
        }
        writeln!(f, "Peso actual: {} kg", self.profile.weight)?;
        writeln!(f, "Dosis actual: {} mcg/día", self.profile.current_dose)?;
        writeln!(
            f,
            "Dosis orientativa (1.6 mcg/kg): {} mcg",
            self.suggested_dose_mcg
        )?;

        writeln!(f)?;
        writeln!(
            f,
            "Tendencia de peso ({} registros): {:+.1} kg{}",
            self.weight_trend.entries,
            self.weight_trend.change_kg,
            if self.weight_trend.drastic {
                "  [cambio significativo]"
            } else {
                ""
            }
        )?;

        writeln!(f)?;
        writeln!(f, "Síntomas más frecuentes:")?;
        if self.top_symptoms.is_empty() {
            writeln!(f, "  (sin registros)")?;
        }
        for c in &self.top_symptoms {
            writeln!(f, "  - {} ({}x)", c.symptom, c.count)?;
        }

        writeln!(f)?;
        writeln!(
            f,
            "Últimos registros ({} de {}):",
            self.recent_entries.len(),
            self.total_entries
        )?;
        for e in &self.recent_entries {
            write!(f, "  {}  {}", e.date, e.symptoms.join(", "))?;
            if !e.notes.is_empty() {
                write!(f, "  -- {}", e.notes)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
