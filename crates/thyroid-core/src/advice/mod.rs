mod client;
mod suggestion;
mod tips;
mod types;

pub use client::{Advisor, HttpAdvisor, OfflineAdvisor};
pub use suggestion::Suggestion;
pub use tips::{fallback_tips, static_tips};
pub use types::{
    BreakfastAdvice, BreakfastRequest, Tip, TipCategory, TipsRequest, FALLBACK_BREAKFAST_REASON,
    TIPS_SYMPTOM_WINDOW,
};
