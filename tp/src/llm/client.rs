//! LlmClient trait definition

use async_trait::async_trait;

use super::RequestError;
use crate::prompts::DerivedPrompt;

/// Stateless client - each call is independent
///
/// Returns the raw response body; [`super::interpret`] turns it into a plan.
#[async_trait]
pub trait LlmClient: Send + Sync {
    /// Send one prompt, retrying transient failures internally
    async fn generate(&self, prompt: &DerivedPrompt) -> Result<String, RequestError>;
}

#[cfg(test)]
pub mod mock {
    use super::*;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tracing::debug;

    /// Mock LLM client for unit tests
    pub struct MockLlmClient {
        responses: Mutex<Vec<Result<String, RequestError>>>,
        prompts: Mutex<Vec<DerivedPrompt>>,
        call_count: AtomicUsize,
    }

    impl MockLlmClient {
        /// Responses are handed out in order
        pub fn new(responses: Vec<Result<String, RequestError>>) -> Self {
            debug!(response_count = %responses.len(), "MockLlmClient::new: called");
            let mut responses = responses;
            responses.reverse();
            Self {
                responses: Mutex::new(responses),
                prompts: Mutex::new(Vec::new()),
                call_count: AtomicUsize::new(0),
            }
        }

        pub fn call_count(&self) -> usize {
            self.call_count.load(Ordering::SeqCst)
        }

        /// Prompts received so far
        pub fn prompts(&self) -> Vec<DerivedPrompt> {
            self.prompts.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl LlmClient for MockLlmClient {
        async fn generate(&self, prompt: &DerivedPrompt) -> Result<String, RequestError> {
            debug!("MockLlmClient::generate: called");
            self.call_count.fetch_add(1, Ordering::SeqCst);
            self.prompts.lock().unwrap().push(prompt.clone());
            self.responses.lock().unwrap().pop().unwrap_or_else(|| {
                debug!("MockLlmClient::generate: no more mock responses");
                Err(RequestError::InvalidResponse("No more mock responses".to_string()))
            })
        }
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        fn prompt() -> DerivedPrompt {
            DerivedPrompt {
                system_prompt: "Test".to_string(),
                user_query: "Query".to_string(),
                requested_days: 3,
            }
        }

        #[tokio::test]
        async fn test_mock_client_returns_responses() {
            let client = MockLlmClient::new(vec![Ok("Response 1".to_string()), Ok("Response 2".to_string())]);

            assert_eq!(client.generate(&prompt()).await.unwrap(), "Response 1");
            assert_eq!(client.generate(&prompt()).await.unwrap(), "Response 2");
            assert_eq!(client.call_count(), 2);
            assert_eq!(client.prompts().len(), 2);
        }

        #[tokio::test]
        async fn test_mock_client_errors_when_exhausted() {
            let client = MockLlmClient::new(vec![]);
            assert!(client.generate(&prompt()).await.is_err());
        }
    }
}
