//! Recommendation service client.
//!
//! Every call resolves to a [`Suggestion`]: transport errors, non-2xx
//! responses and contract violations are logged and replaced by the fixed
//! fallback. No retries.

use std::future::Future;
use std::time::Duration;

use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, warn};
use url::Url;

use super::suggestion::Suggestion;
use super::tips::fallback_tips;
use super::types::{BreakfastAdvice, BreakfastRequest, Tip, TipsRequest};
use crate::error::AdviceError;
use crate::history::SymptomEntry;
use crate::storage::AdviceConfig;

/// Source of breakfast-wait suggestions and personalized tips.
pub trait Advisor {
    fn breakfast(
        &self,
        food_input: &str,
    ) -> impl Future<Output = Suggestion<BreakfastAdvice>> + Send;

    fn tips(&self, history: &[SymptomEntry]) -> impl Future<Output = Suggestion<Vec<Tip>>> + Send;
}

/// Advisor that never leaves the device: always the fallback.
#[derive(Debug, Clone, Copy, Default)]
pub struct OfflineAdvisor;

impl Advisor for OfflineAdvisor {
    async fn breakfast(&self, _food_input: &str) -> Suggestion<BreakfastAdvice> {
        Suggestion::Fallback(BreakfastAdvice::fallback())
    }

    async fn tips(&self, _history: &[SymptomEntry]) -> Suggestion<Vec<Tip>> {
        Suggestion::Fallback(fallback_tips())
    }
}

/// Talks JSON over HTTP to the advice proxy.
#[derive(Debug, Clone)]
pub struct HttpAdvisor {
    client: Client,
    base_url: Url,
}

impl HttpAdvisor {
    /// # Errors
    /// Returns an error if `base_url` is not an absolute URL or the HTTP
    /// client cannot be built.
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, AdviceError> {
        let mut base_url = Url::parse(base_url)?;
        // `join` replaces the last segment unless the path ends in '/'.
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self { client, base_url })
    }

    pub fn from_config(config: &AdviceConfig) -> Result<Self, AdviceError> {
        Self::new(&config.base_url, Duration::from_secs(config.timeout_secs))
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Raw breakfast call. Empty input is rejected without a request.
    pub async fn request_breakfast(&self, food_input: &str) -> Result<BreakfastAdvice, AdviceError> {
        let food_input = food_input.trim();
        if food_input.is_empty() {
            return Err(AdviceError::EmptyInput);
        }
        let advice: BreakfastAdvice = self
            .post_json(
                "api/breakfast",
                &BreakfastRequest {
                    food_input: food_input.to_string(),
                },
            )
            .await?;
        if !advice.is_valid() {
            return Err(AdviceError::Malformed(format!(
                "minutes must be positive, got {}",
                advice.minutes
            )));
        }
        Ok(advice)
    }

    /// Raw tips call over the most recent diary entries.
    pub async fn request_tips(&self, history: &[SymptomEntry]) -> Result<Vec<Tip>, AdviceError> {
        let tips: Vec<Tip> = self
            .post_json("api/tips", &TipsRequest::from_history(history))
            .await?;
        if tips.is_empty() {
            return Err(AdviceError::Malformed("empty tips array".into()));
        }
        Ok(tips)
    }

    async fn post_json<Req, Resp>(&self, path: &str, body: &Req) -> Result<Resp, AdviceError>
    where
        Req: Serialize + ?Sized,
        Resp: DeserializeOwned,
    {
        let url = self.base_url.join(path)?;
        debug!(%url, "advice request");

        let resp = self.client.post(url).json(body).send().await?;
        let status = resp.status();
        let text = resp.text().await?;

        if !status.is_success() {
            return Err(AdviceError::Status {
                status: status.as_u16(),
                body: text,
            });
        }
        serde_json::from_str(&text).map_err(|e| AdviceError::Malformed(e.to_string()))
    }
}

impl Advisor for HttpAdvisor {
    async fn breakfast(&self, food_input: &str) -> Suggestion<BreakfastAdvice> {
        match self.request_breakfast(food_input).await {
            Ok(advice) => Suggestion::Suggested(advice),
            Err(AdviceError::EmptyInput) => {
                debug!("empty breakfast description; using default wait");
                Suggestion::Fallback(BreakfastAdvice::fallback())
            }
            Err(e) => {
                warn!(error = %e, "breakfast advice unavailable; using default wait");
                Suggestion::Fallback(BreakfastAdvice::fallback())
            }
        }
    }

    async fn tips(&self, history: &[SymptomEntry]) -> Suggestion<Vec<Tip>> {
        match self.request_tips(history).await {
            Ok(tips) => Suggestion::Suggested(tips),
            Err(e) => {
                warn!(error = %e, "personalized tips unavailable; using defaults");
                Suggestion::Fallback(fallback_tips())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_url_gets_trailing_slash() {
        let advisor = HttpAdvisor::new("http://localhost:4000/proxy", Duration::from_secs(1)).unwrap();
        assert_eq!(
            advisor.base_url().join("api/tips").unwrap().as_str(),
            "http://localhost:4000/proxy/api/tips"
        );
    }

    #[test]
    fn relative_base_url_is_rejected() {
        assert!(matches!(
            HttpAdvisor::new("localhost", Duration::from_secs(1)),
            Err(AdviceError::InvalidUrl(_))
        ));
    }
}
