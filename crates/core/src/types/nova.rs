//! Amazon Nova `InvokeModel` body shapes (messages API).

use serde::{Deserialize, Serialize};

// ─── Request ───────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NovaRequest {
    pub messages: Vec<NovaMessage>,
    pub inference_config: NovaInferenceConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NovaMessage {
    pub role: String,
    pub content: Vec<NovaContent>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NovaContent {
    pub text: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NovaInferenceConfig {
    pub max_tokens: u32,
    pub temperature: f64,
    pub top_p: f64,
}

// ─── Response ──────────────────────────────────────────────────────────────

/// Every level is optional so that a missing path can be reported precisely
/// instead of as a generic deserialization failure.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NovaResponse {
    #[serde(default)]
    pub output: Option<NovaOutput>,
    #[serde(default)]
    pub stop_reason: Option<String>,
    #[serde(default)]
    pub usage: Option<NovaUsage>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct NovaOutput {
    #[serde(default)]
    pub message: Option<NovaOutputMessage>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct NovaOutputMessage {
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default)]
    pub content: Vec<NovaOutputContent>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct NovaOutputContent {
    #[serde(default)]
    pub text: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NovaUsage {
    #[serde(default)]
    pub input_tokens: Option<u64>,
    #[serde(default)]
    pub output_tokens: Option<u64>,
    #[serde(default)]
    pub total_tokens: Option<u64>,
}
