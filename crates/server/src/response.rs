use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use relay_core::error::RelayError;
use relay_core::types::chat::{ChatReply, ErrorBody};
use serde::Serialize;

/// Headers sent on every relay response: success, preflight and error alike.
pub const RESPONSE_HEADERS: [(&str, &str); 4] = [
    ("Content-Type", "application/json"),
    ("Access-Control-Allow-Origin", "*"),
    (
        "Access-Control-Allow-Headers",
        "Content-Type, X-Amz-Date, Authorization, X-Api-Key",
    ),
    ("Access-Control-Allow-Methods", "OPTIONS,POST,GET"),
];

/// JSON string literal returned to a CORS preflight.
pub const PREFLIGHT_BODY: &str = "\"Preflight OK\"";

/// A fully rendered relay response, independent of the delivery surface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelayResponse {
    pub status: StatusCode,
    pub body: String,
}

impl RelayResponse {
    pub fn preflight() -> Self {
        Self {
            status: StatusCode::OK,
            body: PREFLIGHT_BODY.to_string(),
        }
    }

    pub fn reply(text: String) -> Self {
        Self {
            status: StatusCode::OK,
            body: to_json(&ChatReply { response: text }),
        }
    }

    pub fn error(err: &RelayError) -> Self {
        Self {
            status: err.status_code(),
            body: to_json(&ErrorBody {
                error: err.to_string(),
            }),
        }
    }

    pub fn headers() -> impl Iterator<Item = (&'static str, &'static str)> {
        RESPONSE_HEADERS.into_iter()
    }
}

// Serializing a struct of strings cannot fail; keep a JSON body regardless.
fn to_json<T: Serialize>(value: &T) -> String {
    serde_json::to_string(value)
        .unwrap_or_else(|e| format!("{{\"error\":\"failed to encode response: {e}\"}}"))
}

impl IntoResponse for RelayResponse {
    fn into_response(self) -> Response {
        (self.status, RESPONSE_HEADERS, self.body).into_response()
    }
}
