//! Derived views over the history logs: dose guidance, weight trend,
//! symptom frequency.

use serde::{Deserialize, Serialize};

use super::models::{SymptomEntry, WeightEntry};

/// Standard full-replacement levothyroxine dose per kilogram.
pub const MCG_PER_KG: f64 = 1.6;

/// Number of most recent weight entries the trend looks at.
pub const TREND_WINDOW: usize = 5;

/// A change at least this large (kg) over the window is flagged.
pub const DRASTIC_CHANGE_KG: f64 = 3.0;

/// Symptoms offered by the diary, in display order.
pub const SYMPTOMS: [&str; 8] = [
    "Caída de pelo",
    "Piel seca",
    "Niebla mental",
    "Fatiga",
    "Estreñimiento",
    "Frío excesivo",
    "Aumento de peso",
    "Bajo ánimo",
];

/// Weight-based dose guidance in whole micrograms.
pub fn suggested_dose_mcg(weight_kg: f64) -> u32 {
    (weight_kg * MCG_PER_KG).round().max(0.0) as u32
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeightTrend {
    /// Entries actually considered (at most [`TREND_WINDOW`]).
    pub entries: usize,
    /// Last minus first weight in the window; 0 with fewer than two entries.
    pub change_kg: f64,
    /// `|change_kg| >= DRASTIC_CHANGE_KG`; worth raising with the doctor.
    pub drastic: bool,
}

pub fn weight_trend(weights: &[WeightEntry]) -> WeightTrend {
    let window = &weights[weights.len().saturating_sub(TREND_WINDOW)..];
    let change_kg = match (window.first(), window.last()) {
        (Some(first), Some(last)) if window.len() > 1 => last.weight - first.weight,
        _ => 0.0,
    };
    WeightTrend {
        entries: window.len(),
        change_kg,
        drastic: change_kg.abs() >= DRASTIC_CHANGE_KG,
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SymptomCount {
    pub symptom: String,
    pub count: usize,
}

/// Occurrences per label, most frequent first. Ties keep the order in which
/// labels first appear in `entries` (newest entry first).
pub fn symptom_frequency(entries: &[SymptomEntry]) -> Vec<SymptomCount> {
    let mut counts: Vec<SymptomCount> = Vec::new();
    for label in entries.iter().flat_map(|e| e.symptoms.iter()) {
        match counts.iter_mut().find(|c| &c.symptom == label) {
            Some(c) => c.count += 1,
            None => counts.push(SymptomCount {
                symptom: label.clone(),
                count: 1,
            }),
        }
    }
    // Stable sort keeps first-appearance order among ties.
    counts.sort_by(|a, b| b.count.cmp(&a.count));
    counts
}
