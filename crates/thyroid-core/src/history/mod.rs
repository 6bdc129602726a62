mod analysis;
mod models;
mod store;

pub use analysis::{
    suggested_dose_mcg, symptom_frequency, weight_trend, SymptomCount, WeightTrend,
    DRASTIC_CHANGE_KG, MCG_PER_KG, SYMPTOMS, TREND_WINDOW,
};
pub use models::{SymptomEntry, UserProfile, WeightEntry};
pub use store::HistoryStore;
