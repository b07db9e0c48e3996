use crate::AppState;
use crate::response::RelayResponse;
use axum::extract::State;
use axum::extract::rejection::BytesRejection;
use axum::http::Method;
use bytes::Bytes;
use relay_core::error::RelayError;

/// Relay endpoint for every method. An empty body counts as missing.
pub async fn chat(
    State(state): State<AppState>,
    method: Method,
    body: Result<Bytes, BytesRejection>,
) -> RelayResponse {
    let body = match body {
        Ok(body) => body,
        Err(rejection) if method != Method::OPTIONS => {
            let err = RelayError::Request(rejection.body_text());
            tracing::warn!(kind = err.kind(), error = %err, "Rejected request body");
            return RelayResponse::error(&err);
        }
        Err(_) => Bytes::new(),
    };

    let body = (!body.is_empty()).then_some(&body[..]);
    state.relay.handle(method.as_str(), body).await
}
