//! Prompt text and response schemas sent to the model.

use indoc::formatdoc;
use serde_json::{json, Value};

pub fn breakfast_prompt(food_input: &str) -> String {
    formatdoc! {r#"
        Como experto médico endocrinólogo, analiza este desayuno: "{food_input}".
        Calcula el tiempo de espera óptimo tras tomar LEVOTIROXINA.
        Criterios:
        - 60 min si incluye: Café, Té, Leche, Queso, Calcio, Hierro, Soja, Fibra alta, Papaya o Comida muy pesada.
        - 30 min si es: Ligero, sin inhibidores conocidos (ej. solo fruta ligera como manzana, tostada sencilla, agua).
        Responde con un JSON que tenga 'minutes' (number) y 'reason' (string, una explicación breve, experta y amable).
    "#, food_input = food_input}
}

/// `symptoms` is one label list per diary entry, newest first.
pub fn tips_prompt(symptoms: &[Vec<String>]) -> String {
    let recent = symptoms
        .iter()
        .take(thyroid_core::advice::TIPS_SYMPTOM_WINDOW)
        .map(|labels| labels.join(", "))
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join("; ");
    let recent = if recent.is_empty() { "ninguno".to_string() } else { recent };
    formatdoc! {r#"
        Actúa como un experto en salud tiroidea. Basado en síntomas: "{recent}".
        Proporciona 3 consejos breves y empáticos sobre Alimentación, Mente e Información.
        Usa exactamente esas categorías. Responde solo en JSON.
    "#, recent = recent}
}

pub fn breakfast_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "minutes": { "type": "NUMBER" },
            "reason": { "type": "STRING" }
        },
        "required": ["minutes", "reason"]
    })
}

pub fn tips_schema() -> Value {
    json!({
        "type": "ARRAY",
        "items": {
            "type": "OBJECT",
            "properties": {
                "category": {
                    "type": "STRING",
                    "enum": ["Alimentación", "Mente", "Información"]
                },
                "content": { "type": "STRING" }
            },
            "required": ["category", "content"]
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn breakfast_prompt_embeds_input() {
        let prompt = breakfast_prompt("avena con café");
        assert!(prompt.contains("\"avena con café\""));
        assert!(prompt.contains("LEVOTIROXINA"));
    }

    #[test]
    fn tips_prompt_joins_recent_entries() {
        let symptoms = vec![
            vec!["Fatiga".to_string(), "Piel seca".to_string()],
            vec!["Frío excesivo".to_string()],
        ];
        assert!(tips_prompt(&symptoms).contains("\"Fatiga, Piel seca; Frío excesivo\""));
        assert!(tips_prompt(&[]).contains("\"ninguno\""));
    }
}
