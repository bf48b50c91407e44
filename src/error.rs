use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;

// Request failure taxonomy. The cache and limiter never produce one of
// these; only the HTTP boundary and the upstream call do.
#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("prompt must not be empty")]
    EmptyPrompt,

    #[error("rate limit exceeded, try again later")]
    RateLimited,

    #[error("upstream returned status {status}: {detail}")]
    UpstreamStatus { status: u16, detail: String },

    #[error("upstream request timed out")]
    UpstreamTimeout,

    #[error("upstream request failed: {0}")]
    UpstreamTransport(String),

    #[error("unexpected response format: {0}")]
    UnexpectedPayload(String),

    #[error("request queue is closed")]
    QueueClosed,
}

impl GatewayError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::EmptyPrompt => StatusCode::BAD_REQUEST,
            Self::RateLimited => StatusCode::TOO_MANY_REQUESTS,
            Self::UpstreamStatus { .. } | Self::UpstreamTransport(_) => StatusCode::BAD_GATEWAY,
            Self::UnexpectedPayload(_) => StatusCode::BAD_GATEWAY,
            Self::UpstreamTimeout => StatusCode::GATEWAY_TIMEOUT,
            Self::QueueClosed => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for GatewayError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        (status, Json(serde_json::json!({ "error": self.to_string() }))).into_response()
    }
}

impl From<reqwest::Error> for GatewayError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::UpstreamTimeout
        } else {
            Self::UpstreamTransport(err.without_url().to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn statuses_follow_the_failure_class() {
        assert_eq!(GatewayError::EmptyPrompt.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(
            GatewayError::RateLimited.status_code(),
            StatusCode::TOO_MANY_REQUESTS
        );
        assert_eq!(
            GatewayError::UpstreamStatus {
                status: 503,
                detail: "overloaded".to_string()
            }
            .status_code(),
            StatusCode::BAD_GATEWAY
        );
        assert_eq!(
            GatewayError::UpstreamTimeout.status_code(),
            StatusCode::GATEWAY_TIMEOUT
        );
        assert_eq!(
            GatewayError::UnexpectedPayload("no choices".to_string()).status_code(),
            StatusCode::BAD_GATEWAY
        );
    }
}
