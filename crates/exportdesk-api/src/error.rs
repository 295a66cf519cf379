//! API error type and its JSON response.
//!
//! Every failure of the reply endpoint answers with the same body shape as a
//! success, `{ "success": false, "message": <apology> }`. The cause is
//! logged and never sent to the caller.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;

use exportdesk_agent::AgentError;
use exportdesk_core::request::{AgentResponse, DecodeError};

/// Fixed message returned to callers on any internal failure.
pub const APOLOGY_MESSAGE: &str =
    "Unable to generate a response right now. Please retry in a moment.";

/// Failures of the reply endpoint.
#[derive(Debug)]
pub enum ApiError {
    /// The body was not JSON.
    MalformedBody(String),
    /// The reply engine failed.
    Generation(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match &self {
            ApiError::MalformedBody(cause) => {
                tracing::error!(error = %cause, "Agent API error: malformed body")
            }
            ApiError::Generation(cause) => {
                tracing::error!(error = %cause, "Agent API error: generation failed")
            }
        }

        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(AgentResponse::failure(APOLOGY_MESSAGE)),
        )
            .into_response()
    }
}

impl From<DecodeError> for ApiError {
    fn from(err: DecodeError) -> Self {
        ApiError::MalformedBody(err.to_string())
    }
}

impl From<AgentError> for ApiError {
    fn from(err: AgentError) -> Self {
        ApiError::Generation(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn body_json(resp: Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(resp.into_body(), 64 * 1024)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_generation_error_hides_cause() {
        let resp = ApiError::Generation("secret stack detail".to_string()).into_response();
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let json = body_json(resp).await;
        assert_eq!(json["success"], false);
        assert_eq!(json["message"], APOLOGY_MESSAGE);
        assert!(!json.to_string().contains("secret"));
    }

    #[tokio::test]
    async fn test_malformed_body_maps_to_500() {
        let err: ApiError = exportdesk_core::AgentRequest::decode(b"{oops")
            .unwrap_err()
            .into();
        assert!(matches!(err, ApiError::MalformedBody(_)));
        let resp = err.into_response();
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_from_agent_error() {
        let err: ApiError = AgentError::Unavailable("cold start".to_string()).into();
        match err {
            ApiError::Generation(msg) => assert!(msg.contains("cold start")),
            other => panic!("unexpected {:?}", other),
        }
    }
}
