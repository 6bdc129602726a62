use thiserror::Error;

/// Upstream call failures. Handlers turn every one of these into a fallback
/// response; they never reach the client as an error status.
#[derive(Error, Debug)]
pub enum ProxyError {
    #[error("No API key configured (set GEMINI_API_KEY)")]
    MissingApiKey,

    #[error("Upstream transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Upstream returned HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Upstream response had no text candidate")]
    EmptyResponse,

    #[error("Model output is not valid JSON for this contract: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Model output failed validation: {0}")]
    Invalid(String),
}
