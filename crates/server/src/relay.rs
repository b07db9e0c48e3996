//! The chat relay: one handler shared by every delivery surface.

use crate::response::RelayResponse;
use relay_core::error::RelayError;
use relay_core::provider::{InferenceClient, InferenceRequest, ModelReply, ModelSchema, Variant};
use relay_core::types::chat::ChatRequest;
use std::sync::Arc;

/// HTTP method of a CORS preflight.
pub const PREFLIGHT_METHOD: &str = "OPTIONS";

pub fn is_preflight(method: &str) -> bool {
    method == PREFLIGHT_METHOD
}

/// Forwards chat messages to the inference client through one model schema.
pub struct ChatRelay {
    client: Arc<dyn InferenceClient>,
    schema: Arc<dyn ModelSchema>,
}

impl ChatRelay {
    pub fn new(client: Arc<dyn InferenceClient>, schema: Arc<dyn ModelSchema>) -> Self {
        Self { client, schema }
    }

    pub fn for_variant(client: Arc<dyn InferenceClient>, variant: Variant) -> Self {
        Self::new(client, relay_provider::schema_for(variant))
    }

    pub fn variant(&self) -> Variant {
        self.schema.variant()
    }

    pub fn model_id(&self) -> &str {
        self.schema.model_id()
    }

    /// `OPTIONS` answers the preflight; any other method is a chat request.
    pub async fn handle(&self, method: &str, body: Option<&[u8]>) -> RelayResponse {
        if is_preflight(method) {
            return self.preflight();
        }
        self.chat(body).await
    }

    pub fn preflight(&self) -> RelayResponse {
        RelayResponse::preflight()
    }

    /// Never fails: every error becomes a 500 envelope.
    pub async fn chat(&self, body: Option<&[u8]>) -> RelayResponse {
        match self.try_chat(body).await {
            Ok(reply) => RelayResponse::reply(reply.text),
            Err(e) => {
                tracing::warn!(
                    variant = %self.variant(),
                    kind = e.kind(),
                    error = %e,
                    "Chat relay failed"
                );
                RelayResponse::error(&e)
            }
        }
    }

    async fn try_chat(&self, body: Option<&[u8]>) -> Result<ModelReply, RelayError> {
        let request = ChatRequest::parse(body, self.schema.uses_history())?;
        let payload = self.schema.build_request(&request)?;

        let response = self
            .client
            .invoke(InferenceRequest::json(self.schema.model_id(), payload))
            .await?;
        let reply = self.schema.extract_reply(&response.body)?;

        tracing::info!(
            client = self.client.identifier(),
            model = self.schema.model_id(),
            history_turns = request.history.len(),
            input_tokens = ?reply.input_tokens,
            output_tokens = ?reply.output_tokens,
            stop_reason = ?reply.stop_reason,
            upstream_request_id = ?response.headers.get("x-amzn-requestid"),
            "Model replied"
        );
        Ok(reply)
    }
}
