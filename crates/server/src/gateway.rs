//! API Gateway proxy-integration events in, proxy responses out.

use crate::relay::{ChatRelay, is_preflight};
use crate::response::RelayResponse;
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use relay_core::error::RelayError;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// The fields of a proxy event the relay reads. Everything else is ignored.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GatewayEvent {
    /// REST API (payload v1) method.
    #[serde(default)]
    pub http_method: Option<String>,
    #[serde(default)]
    pub request_context: Option<EventRequestContext>,
    /// Normally a string; any other JSON type is rejected when the body is read.
    #[serde(default)]
    pub body: Option<Value>,
    #[serde(default)]
    pub is_base64_encoded: bool,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct EventRequestContext {
    #[serde(default)]
    pub http: Option<EventHttp>,
}

/// HTTP API (payload v2) request description.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct EventHttp {
    #[serde(default)]
    pub method: Option<String>,
}

impl GatewayEvent {
    /// v1 `httpMethod`, else v2 `requestContext.http.method`, else empty.
    pub fn method(&self) -> &str {
        self.http_method
            .as_deref()
            .or_else(|| {
                self.request_context
                    .as_ref()
                    .and_then(|c| c.http.as_ref())
                    .and_then(|h| h.method.as_deref())
            })
            .unwrap_or_default()
    }

    fn decoded_body(&self) -> Result<Option<Vec<u8>>, RelayError> {
        match self.body {
            None | Some(Value::Null) => Ok(None),
            Some(Value::String(ref body)) if self.is_base64_encoded => STANDARD
                .decode(body)
                .map(Some)
                .map_err(|e| RelayError::Request(format!("body is not valid base64: {e}"))),
            Some(Value::String(ref body)) => Ok(Some(body.clone().into_bytes())),
            Some(_) => Err(RelayError::Request("event body must be a string".into())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GatewayResponse {
    pub status_code: u16,
    pub headers: BTreeMap<String, String>,
    pub body: String,
}

impl From<RelayResponse> for GatewayResponse {
    fn from(resp: RelayResponse) -> Self {
        Self {
            status_code: resp.status.as_u16(),
            headers: RelayResponse::headers()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
            body: resp.body,
        }
    }
}

/// Run one gateway event through the relay.
pub async fn handle_event(relay: &ChatRelay, event: &GatewayEvent) -> GatewayResponse {
    let method = event.method();
    if is_preflight(method) {
        return relay.preflight().into();
    }

    match event.decoded_body() {
        Ok(body) => relay.handle(method, body.as_deref()).await.into(),
        Err(e) => {
            tracing::warn!(kind = e.kind(), error = %e, "Rejected gateway event");
            RelayResponse::error(&e).into()
        }
    }
}
