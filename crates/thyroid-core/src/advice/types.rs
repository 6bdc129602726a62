//! Wire contract shared by the advice client and the proxy.

use serde::{Deserialize, Serialize};

use crate::history::SymptomEntry;
use crate::ritual::DEFAULT_WAIT_MINUTES;

/// How many of the most recent diary entries are sent for tips.
pub const TIPS_SYMPTOM_WINDOW: usize = 5;

pub const FALLBACK_BREAKFAST_REASON: &str =
    "No pude analizarlo, 30 minutos es el estándar seguro.";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BreakfastRequest {
    #[serde(default)]
    pub food_input: String,
}

/// Suggested wait before breakfast.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BreakfastAdvice {
    /// May arrive fractional from the model; see [`BreakfastAdvice::wait_minutes`].
    pub minutes: f64,
    pub reason: String,
}

impl BreakfastAdvice {
    pub fn fallback() -> Self {
        Self {
            minutes: f64::from(DEFAULT_WAIT_MINUTES),
            reason: FALLBACK_BREAKFAST_REASON.into(),
        }
    }

    pub fn is_valid(&self) -> bool {
        self.minutes.is_finite() && self.minutes > 0.0
    }

    /// Whole minutes for the timer, rounded up so the window is never
    /// shorter than advised.
    pub fn wait_minutes(&self) -> u32 {
        if !self.is_valid() {
            return DEFAULT_WAIT_MINUTES;
        }
        self.minutes.ceil().min(f64::from(u32::MAX)) as u32
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TipsRequest {
    /// One label list per diary entry, newest first.
    #[serde(default)]
    pub symptoms: Vec<Vec<String>>,
}

impl TipsRequest {
    pub fn from_history(history: &[SymptomEntry]) -> Self {
        Self {
            symptoms: history
                .iter()
                .take(TIPS_SYMPTOM_WINDOW)
                .map(|e| e.symptoms.clone())
                .collect(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TipCategory {
    #[serde(
        rename = "Alimentación",
        alias = "Alimentacion",
        alias = "alimentación",
        alias = "alimentacion"
    )]
    Nutrition,
    #[serde(rename = "Mente", alias = "mente")]
    Mind,
    #[serde(
        rename = "Información",
        alias = "Informacion",
        alias = "información",
        alias = "informacion"
    )]
    Information,
}

impl TipCategory {
    pub fn label(self) -> &'static str {
        match self {
            TipCategory::Nutrition => "Alimentación",
            TipCategory::Mind => "Mente",
            TipCategory::Information => "Información",
        }
    }
}

impl std::fmt::Display for TipCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tip {
    pub category: TipCategory,
    pub content: String,
}

impl Tip {
    pub fn new(category: TipCategory, content: impl Into<String>) -> Self {
        Self {
            category,
            content: content.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn breakfast_request_uses_food_input_key() {
        let req = BreakfastRequest {
            food_input: "papaya".into(),
        };
        assert_eq!(
            serde_json::to_string(&req).unwrap(),
            r#"{"foodInput":"papaya"}"#
        );
        let empty: BreakfastRequest = serde_json::from_str("{}").unwrap();
        assert_eq!(empty.food_input, "");
    }

    #[test]
    fn wait_minutes_rounds_up() {
        let advice = BreakfastAdvice {
            minutes: 45.2,
            reason: "Café".into(),
        };
        assert_eq!(advice.wait_minutes(), 46);
        assert_eq!(BreakfastAdvice::fallback().wait_minutes(), 30);
        let bad = BreakfastAdvice {
            minutes: -5.0,
            reason: String::new(),
        };
        assert!(!bad.is_valid());
        assert_eq!(bad.wait_minutes(), 30);
    }

    #[test]
    fn tip_categories_accept_unaccented_labels() {
        let tips: Vec<Tip> = serde_json::from_str(
            r#"[{"category":"Alimentacion","content":"a"},{"category":"Mente","content":"b"},{"category":"informacion","content":"c"}]"#,
        )
        .unwrap();
        assert_eq!(tips[0].category, TipCategory::Nutrition);
        assert_eq!(tips[2].category, TipCategory::Information);
        assert_eq!(
            serde_json::to_value(&tips[0]).unwrap()["category"],
            "Alimentación"
        );
    }

    #[test]
    fn tips_request_keeps_five_newest() {
        let history: Vec<SymptomEntry> = (0..7)
            .map(|i| SymptomEntry {
                id: i.to_string(),
                date: chrono::NaiveDate::from_ymd_opt(2024, 5, 1).unwrap(),
                symptoms: vec![format!("s{i}")],
                notes: String::new(),
            })
            .collect();
        let req = TipsRequest::from_history(&history);
        assert_eq!(req.symptoms.len(), 5);
        assert_eq!(req.symptoms[0], vec!["s0"]);
    }
}
