use crate::error::RelayError;
use crate::types::chat::ChatRequest;
use async_trait::async_trait;
use bytes::Bytes;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Request/response schema family used to talk to the backing model.
/// Fixed per deployment.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Variant {
    /// Structured single-turn messages (Amazon Nova).
    #[default]
    Nova,
    /// Flattened multi-turn prompt (Amazon Titan Text).
    Titan,
}

impl Variant {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Nova => "nova",
            Self::Titan => "titan",
        }
    }
}

impl std::fmt::Display for Variant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Variant {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "nova" | "structured" => Ok(Self::Nova),
            "titan" | "prompt" => Ok(Self::Titan),
            _ => Err(format!("unknown variant: {s} (expected nova or titan)")),
        }
    }
}

/// A single `InvokeModel` call.
#[derive(Debug, Clone)]
pub struct InferenceRequest {
    pub model_id: String,
    pub body: Bytes,
    pub content_type: String,
    pub accept: String,
}

impl InferenceRequest {
    /// JSON in, JSON out.
    pub fn json(model_id: impl Into<String>, body: Bytes) -> Self {
        Self {
            model_id: model_id.into(),
            body,
            content_type: "application/json".to_string(),
            accept: "application/json".to_string(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct InferenceResponse {
    pub body: Bytes,
    pub headers: HashMap<String, String>,
}

/// Generated text plus whatever usage metadata the provider reported.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ModelReply {
    pub text: String,
    pub input_tokens: Option<u64>,
    pub output_tokens: Option<u64>,
    pub stop_reason: Option<String>,
}

impl ModelReply {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Self::default()
        }
    }
}

/// Maps a [`ChatRequest`] onto one model's request body and pulls the reply
/// back out of its response body.
pub trait ModelSchema: Send + Sync {
    fn variant(&self) -> Variant;

    /// Bedrock model identifier this schema targets.
    fn model_id(&self) -> &str;

    /// Whether the schema reads `history` from the request body.
    fn uses_history(&self) -> bool;

    fn build_request(&self, request: &ChatRequest) -> Result<Bytes, RelayError>;

    fn extract_reply(&self, body: &[u8]) -> Result<ModelReply, RelayError>;
}

/// Executes a model invocation against the inference endpoint.
#[async_trait]
pub trait InferenceClient: Send + Sync {
    /// Short identifier for logging (e.g. "bedrock").
    fn identifier(&self) -> &str;

    async fn invoke(&self, request: InferenceRequest) -> Result<InferenceResponse, RelayError>;
}
