use std::sync::Arc;

use crate::config::ProxyConfig;
use crate::error::ProxyError;
use crate::gemini::GeminiClient;

/// Shared, immutable handler state.
#[derive(Clone)]
pub struct ProxyState {
    pub gemini: Arc<GeminiClient>,
}

impl ProxyState {
    pub fn new(config: &ProxyConfig) -> Result<Self, ProxyError> {
        Ok(Self {
            gemini: Arc::new(GeminiClient::new(config)?),
        })
    }
}
