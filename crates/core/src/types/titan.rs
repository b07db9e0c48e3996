//! Amazon Titan Text `InvokeModel` body shapes.

use serde::{Deserialize, Serialize};

// ─── Request ───────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TitanRequest {
    pub input_text: String,
    pub text_generation_config: TitanGenerationConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TitanGenerationConfig {
    pub max_token_count: u32,
    pub temperature: f64,
    pub top_p: f64,
    pub stop_sequences: Vec<String>,
}

// ─── Response ──────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TitanResponse {
    #[serde(default)]
    pub input_text_token_count: Option<u64>,
    #[serde(default)]
    pub results: Vec<TitanResult>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TitanResult {
    #[serde(default)]
    pub token_count: Option<u64>,
    #[serde(default)]
    pub output_text: Option<String>,
    #[serde(default)]
    pub completion_reason: Option<String>,
}
