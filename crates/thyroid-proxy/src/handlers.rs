use axum::{extract::rejection::JsonRejection, extract::State, Json};
use serde_json::{json, Value};
use thyroid_core::advice::{fallback_tips, BreakfastAdvice, BreakfastRequest, Tip, TipsRequest};
use tracing::{error, info, warn};

use crate::error::ProxyError;
use crate::prompts;
use crate::state::ProxyState;

pub async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

/// Always answers 200: any failure becomes the safe 30-minute fallback.
pub async fn breakfast(
    State(state): State<ProxyState>,
    payload: Result<Json<BreakfastRequest>, JsonRejection>,
) -> Json<BreakfastAdvice> {
    let food_input = match payload {
        Ok(Json(req)) => req.food_input,
        Err(rejection) => {
            warn!("unreadable breakfast request: {rejection}");
            return Json(BreakfastAdvice::fallback());
        }
    };
    let food_input = food_input.trim();
    if food_input.is_empty() {
        warn!("empty breakfast description");
        return Json(BreakfastAdvice::fallback());
    }

    match ask_breakfast(&state, food_input).await {
        Ok(advice) => {
            info!(minutes = advice.minutes, "breakfast advice");
            Json(advice)
        }
        Err(err) => {
            error!("breakfast advice failed: {err}");
            Json(BreakfastAdvice::fallback())
        }
    }
}

/// Always answers 200 with a non-empty list.
pub async fn tips(
    State(state): State<ProxyState>,
    payload: Result<Json<TipsRequest>, JsonRejection>,
) -> Json<Vec<Tip>> {
    let symptoms = match payload {
        Ok(Json(req)) => req.symptoms,
        Err(rejection) => {
            warn!("unreadable tips request: {rejection}");
            Vec::new()
        }
    };

    match ask_tips(&state, &symptoms).await {
        Ok(tips) => Json(tips),
        Err(err) => {
            error!("tips failed: {err}");
            Json(fallback_tips())
        }
    }
}

async fn ask_breakfast(state: &ProxyState, food_input: &str) -> Result<BreakfastAdvice, ProxyError> {
    let advice: BreakfastAdvice = state
        .gemini
        .generate_json(&prompts::breakfast_prompt(food_input), prompts::breakfast_schema())
        .await?;
    if !advice.is_valid() {
        return Err(ProxyError::Invalid(format!("minutes = {}", advice.minutes)));
    }
    Ok(advice)
}

async fn ask_tips(state: &ProxyState, symptoms: &[Vec<String>]) -> Result<Vec<Tip>, ProxyError> {
    let tips: Vec<Tip> = state
        .gemini
        .generate_json(&prompts::tips_prompt(symptoms), prompts::tips_schema())
        .await?;
    if tips.is_empty() {
        return Err(ProxyError::Invalid("no tips".into()));
    }
    Ok(tips)
}
