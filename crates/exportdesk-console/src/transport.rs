//! How the console reaches the reply endpoint.

use async_trait::async_trait;

use exportdesk_core::request::{AgentRequest, AgentResponse};

use crate::error::TransportError;

/// Delivers one request to the reply endpoint and returns its answer.
#[async_trait]
pub trait ReplyTransport: Send + Sync {
    async fn request_reply(&self, request: &AgentRequest) -> Result<AgentResponse, TransportError>;
}

/// JSON-over-HTTP transport for `POST /api/agent`.
///
/// No timeout is set; the client's own connection handling applies.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
    endpoint: String,
}

impl HttpTransport {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint: endpoint.into(),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl ReplyTransport for HttpTransport {
    async fn request_reply(&self, request: &AgentRequest) -> Result<AgentResponse, TransportError> {
        let response = self
            .client
            .post(&self.endpoint)
            .json(request)
            .send()
            .await
            .map_err(|e| TransportError::Http(e.to_string()))?;

        // Failures carry the same body shape with a 500, so the body is read
        // regardless of status. Only an unreadable body falls back to the status.
        let status = response.status();
        let body = response.json::<AgentResponse>().await.map_err(|e| {
            if status.is_success() {
                TransportError::Decode(e.to_string())
            } else {
                TransportError::Status(status.as_u16())
            }
        })?;

        tracing::debug!(status = %status, success = body.success, "Reply endpoint answered");
        Ok(body)
    }
}
