use crate::handlers;
use crate::state::ProxyState;
use axum::{
    routing::{get, post},
    Router,
};

pub fn router(state: ProxyState) -> Router {
    Router::new()
        .route("/health", get(handlers::health))
        .route("/api/breakfast", post(handlers::breakfast))
        .route("/api/tips", post(handlers::tips))
        .with_state(state)
}
