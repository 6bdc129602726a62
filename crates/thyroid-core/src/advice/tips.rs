use super::types::{Tip, TipCategory};

/// Used whenever generated tips are unavailable.
pub fn fallback_tips() -> Vec<Tip> {
    vec![
        Tip::new(
            TipCategory::Nutrition,
            "Prioriza alimentos con selenio para apoyar tu tiroides.",
        ),
        Tip::new(
            TipCategory::Mind,
            "Dedica 5 minutos hoy a la respiración consciente.",
        ),
        Tip::new(
            TipCategory::Information,
            "La consistencia en la hora de tu dosis es clave.",
        ),
    ]
}

/// Curated tips shown regardless of history.
pub fn static_tips() -> Vec<Tip> {
    vec![
        Tip::new(
            TipCategory::Nutrition,
            "Prioriza alimentos ricos en selenio como las nueces de Brasil para apoyar la función tiroidea.",
        ),
        Tip::new(
            TipCategory::Mind,
            "El estrés bloquea la conversión de T4 a T3. Dedica 5 minutos a meditación consciente hoy.",
        ),
        Tip::new(
            TipCategory::Information,
            "Recuerda esperar al menos 30-60 minutos después de tu dosis para ingerir café o alimentos.",
        ),
        Tip::new(
            TipCategory::Nutrition,
            "El exceso de soja cruda o crucíferas en grandes cantidades puede interferir con la absorción de yodo.",
        ),
    ]
}
