use serde::Deserialize;
use thiserror::Error;

/// Failures from either endpoint.
///
/// Transport-level problems are `Network`, a non-2xx status is
/// `RequestFailed`, and a 2xx body that does not parse is `InvalidResponse`.
#[derive(Debug, Clone, Error)]
pub enum ApiError {
    #[error("HTTP {status}: {detail}")]
    RequestFailed { status: u16, detail: String },

    #[error("network error: {0}")]
    Network(String),

    #[error("invalid response: {0}")]
    InvalidResponse(String),
}

/// Groq's error envelope: `{"error": {"message": ..., "type": ...}}`.
#[derive(Deserialize)]
struct ErrorResponse {
    error: ErrorBody,
}

#[derive(Deserialize)]
struct ErrorBody {
    message: String,
    #[serde(rename = "type", default)]
    kind: String,
}

impl ApiError {
    /// Classify a non-2xx response, folding the Groq error envelope into the
    /// detail when the body carries one.
    pub fn from_status(status: u16, body: &str) -> Self {
        let detail = match serde_json::from_str::<ErrorResponse>(body) {
            Ok(resp) if !resp.error.kind.is_empty() => {
                format!("{} ({})", resp.error.message, resp.error.kind)
            }
            Ok(resp) => resp.error.message,
            Err(_) => body.trim().to_string(),
        };
        ApiError::RequestFailed { status, detail }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn folds_groq_error_envelope() {
        let body = r#"{"error": {"message": "Invalid API Key", "type": "invalid_request_error"}}"#;
        let err = ApiError::from_status(401, body);
        assert_eq!(
            err.to_string(),
            "HTTP 401: Invalid API Key (invalid_request_error)"
        );
    }

    #[test]
    fn envelope_without_type_keeps_message_only() {
        let body = r#"{"error": {"message": "boom"}}"#;
        let err = ApiError::from_status(500, body);
        assert_eq!(err.to_string(), "HTTP 500: boom");
    }

    #[test]
    fn unparseable_body_is_passed_through() {
        let err = ApiError::from_status(502, "Bad Gateway\n");
        match err {
            ApiError::RequestFailed { status, detail } => {
                assert_eq!(status, 502);
                assert_eq!(detail, "Bad Gateway");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn network_error_display() {
        let err = ApiError::Network("fetch aborted".into());
        assert_eq!(err.to_string(), "network error: fetch aborted");
    }
}
