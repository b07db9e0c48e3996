use axum::http::StatusCode;

/// Unified error type for every failure inside a relay invocation.
///
/// Every variant is reported to the caller the same way (status 500 with an
/// `{"error": ...}` body); the variants exist for logging and tests.
#[derive(Debug, thiserror::Error)]
pub enum RelayError {
    #[error("invalid request: {0}")]
    Request(String),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("network error: {0}")]
    Network(String),

    #[error("upstream error (status {status}): {body}")]
    Upstream { status: u16, body: String },

    #[error("unexpected provider response: {0}")]
    Extraction(String),

    #[error("internal error: {0}")]
    Internal(String),
}

impl RelayError {
    /// Status code reported to the caller. The relay does not distinguish
    /// failure kinds on the wire.
    pub fn status_code(&self) -> StatusCode {
        StatusCode::INTERNAL_SERVER_ERROR
    }

    /// Short machine-readable kind, used as a structured log field.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Request(_) => "request",
            Self::Config(_) | Self::Network(_) | Self::Upstream { .. } => "provider",
            Self::Extraction(_) => "extraction",
            Self::Internal(_) => "internal",
        }
    }
}

impl From<reqwest::Error> for RelayError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            Self::Network(format!("request timed out: {e}"))
        } else if e.is_connect() {
            Self::Network(format!("connection failed: {e}"))
        } else {
            Self::Network(e.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_kind_is_internal_server_error() {
        let errors = [
            RelayError::Request("bad".into()),
            RelayError::Config("no key".into()),
            RelayError::Network("refused".into()),
            RelayError::Upstream {
                status: 403,
                body: "denied".into(),
            },
            RelayError::Extraction("missing".into()),
            RelayError::Internal("oops".into()),
        ];
        for err in errors {
            assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        }
    }

    #[test]
    fn test_kind_groups_provider_failures() {
        assert_eq!(RelayError::Request("x".into()).kind(), "request");
        assert_eq!(RelayError::Config("x".into()).kind(), "provider");
        assert_eq!(RelayError::Network("x".into()).kind(), "provider");
        assert_eq!(
            RelayError::Upstream {
                status: 500,
                body: String::new()
            }
            .kind(),
            "provider"
        );
        assert_eq!(RelayError::Extraction("x".into()).kind(), "extraction");
    }

    #[test]
    fn test_upstream_display_includes_status_and_body() {
        let err = RelayError::Upstream {
            status: 429,
            body: "{\"message\":\"Too many requests\"}".into(),
        };
        assert_eq!(
            err.to_string(),
            "upstream error (status 429): {\"message\":\"Too many requests\"}"
        );
    }
}
