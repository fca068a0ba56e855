//! HTTP transport seam
//!
//! The retry loop talks to a [`Transport`] instead of reqwest directly so it
//! can be driven by scripted responses in tests.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use tracing::debug;

use super::RequestError;

/// Status and body of one HTTP exchange
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// 2xx status
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Sends a JSON POST and returns whatever the server answered
///
/// Non-2xx statuses are not errors at this level; only failures to get any
/// answer at all are.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn post_json(&self, url: &str, body: &serde_json::Value) -> Result<HttpResponse, RequestError>;
}

/// reqwest-backed transport
pub struct HttpTransport {
    http: Client,
    timeout: Duration,
}

impl HttpTransport {
    pub fn new(timeout: Duration) -> Result<Self, RequestError> {
        debug!(?timeout, "HttpTransport::new: called");
        let http = Client::builder().timeout(timeout).build().map_err(RequestError::Network)?;
        Ok(Self { http, timeout })
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn post_json(&self, url: &str, body: &serde_json::Value) -> Result<HttpResponse, RequestError> {
        debug!("HttpTransport::post_json: called");
        let response = self
            .http
            .post(url)
            .header("Content-Type", "application/json")
            .json(body)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    debug!("HttpTransport::post_json: timed out");
                    RequestError::Timeout(self.timeout)
                } else {
                    debug!(error = %e, "HttpTransport::post_json: network error");
                    RequestError::Network(e)
                }
            })?;

        let status = response.status().as_u16();
        let body = response.text().await?;
        debug!(%status, body_len = body.len(), "HttpTransport::post_json: received");
        Ok(HttpResponse { status, body })
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_http_response_is_success() {
        assert!(HttpResponse::new(200, "").is_success());
        assert!(HttpResponse::new(204, "").is_success());
        assert!(!HttpResponse::new(429, "").is_success());
        assert!(!HttpResponse::new(500, "").is_success());
        assert!(!HttpResponse::new(302, "").is_success());
    }

    #[test]
    fn test_http_transport_builds() {
        assert!(HttpTransport::new(Duration::from_secs(5)).is_ok());
    }
}
