//! Gemini `generateContent` client
//!
//! Builds the request payload for a [`DerivedPrompt`] and sends it through the
//! retrying transport. Search grounding is always enabled so the answer comes
//! back with web citations.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tracing::{debug, info, warn};

use super::retry::{RetryPolicy, Sleeper, TokioSleeper, send_with_retry};
use super::transport::{HttpTransport, Transport};
use super::{LlmClient, RequestError};
use crate::config::{Config, LlmConfig};
use crate::prompts::DerivedPrompt;

/// Gemini API client
pub struct GeminiClient {
    endpoint: String,
    api_key: String,
    transport: Arc<dyn Transport>,
    sleeper: Arc<dyn Sleeper>,
    policy: RetryPolicy,
}

impl GeminiClient {
    /// Create a client from configuration
    ///
    /// A missing API key is passed through as an empty string; the service
    /// will reject the call, which surfaces as a request error.
    pub fn from_config(config: &Config) -> Result<Self, RequestError> {
        debug!(model = %config.llm.model, "GeminiClient::from_config: called");
        let api_key = config.llm.api_key();
        if api_key.is_empty() {
            warn!(env = %config.llm.api_key_env, "API key not set, sending requests without one");
        }

        let transport = HttpTransport::new(Duration::from_millis(config.llm.timeout_ms))?;
        let policy = RetryPolicy::from(&config.retry);
        debug!(schedule = ?policy.schedule(), "GeminiClient::from_config: backoff schedule");

        Ok(Self::new(
            &config.llm,
            api_key,
            Arc::new(transport),
            Arc::new(TokioSleeper),
            policy,
        ))
    }

    /// Create a client with explicit transport and sleeper
    pub fn new(
        llm: &LlmConfig,
        api_key: String,
        transport: Arc<dyn Transport>,
        sleeper: Arc<dyn Sleeper>,
        policy: RetryPolicy,
    ) -> Self {
        Self {
            endpoint: llm.endpoint(),
            api_key,
            transport,
            sleeper,
            policy,
        }
    }

    /// Full request URL, key included
    pub fn request_url(&self) -> String {
        format!("{}?key={}", self.endpoint, self.api_key)
    }

    /// Build the request body for the Gemini API
    pub fn build_request_body(prompt: &DerivedPrompt) -> serde_json::Value {
        debug!(
            system_len = prompt.system_prompt.len(),
            query_len = prompt.user_query.len(),
            "build_request_body: called"
        );
        serde_json::json!({
            "contents": [{ "parts": [{ "text": prompt.user_query }] }],
            "tools": [{ "google_search": {} }],
            "systemInstruction": { "parts": [{ "text": prompt.system_prompt }] },
        })
    }
}

#[async_trait]
impl LlmClient for GeminiClient {
    async fn generate(&self, prompt: &DerivedPrompt) -> Result<String, RequestError> {
        debug!(endpoint = %self.endpoint, "generate: called");
        let body = Self::build_request_body(prompt);
        let response = send_with_retry(
            self.transport.as_ref(),
            self.sleeper.as_ref(),
            &self.policy,
            &self.request_url(),
            &body,
        )
        .await?;

        info!(status = %response.status, body_len = response.body.len(), "Plan request completed");
        Ok(response.body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::retry::mock::RecordingSleeper;
    use crate::llm::transport::mock::{MockTransport, Scripted};

    fn prompt() -> DerivedPrompt {
        DerivedPrompt {
            system_prompt: "You are a planner".to_string(),
            user_query: "Plan Paris".to_string(),
            requested_days: 4,
        }
    }

    fn client(transport: Arc<MockTransport>, key: &str) -> GeminiClient {
        GeminiClient::new(
            &LlmConfig::default(),
            key.to_string(),
            transport,
            Arc::new(RecordingSleeper::default()),
            RetryPolicy::default(),
        )
    }

    #[test]
    fn test_build_request_body() {
        let body = GeminiClient::build_request_body(&prompt());

        assert_eq!(body["contents"][0]["parts"][0]["text"], "Plan Paris");
        assert_eq!(body["systemInstruction"]["parts"][0]["text"], "You are a planner");
        assert_eq!(body["tools"][0]["google_search"], serde_json::json!({}));
    }

    #[test]
    fn test_request_url_includes_key() {
        let client = client(Arc::new(MockTransport::always(200, "{}")), "secret");
        let url = client.request_url();

        assert!(url.starts_with("https://generativelanguage.googleapis.com/v1beta/models/"));
        assert!(url.contains(":generateContent?key=secret"));
    }

    #[test]
    fn test_missing_key_passes_through_empty() {
        let client = client(Arc::new(MockTransport::always(200, "{}")), "");
        assert!(client.request_url().ends_with("?key="));
    }

    #[tokio::test]
    async fn test_generate_returns_body_after_retry() {
        let transport = Arc::new(MockTransport::new(vec![
            Scripted::Respond(429, String::new()),
            Scripted::Respond(200, "{\"candidates\":[]}".to_string()),
        ]));
        let client = client(transport.clone(), "k");

        let body = client.generate(&prompt()).await.unwrap();

        assert_eq!(body, "{\"candidates\":[]}");
        assert_eq!(transport.call_count(), 2);
        let requests = transport.requests();
        assert_eq!(requests[0].1["contents"][0]["parts"][0]["text"], "Plan Paris");
    }
}
