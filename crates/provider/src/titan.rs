use bytes::Bytes;
use relay_core::error::RelayError;
use relay_core::provider::{ModelReply, ModelSchema, Variant};
use relay_core::types::chat::ChatRequest;
use relay_core::types::titan::*;

pub const MODEL_ID: &str = "amazon.titan-text-express-v1";
const MAX_TOKEN_COUNT: u32 = 300;
const TEMPERATURE: f64 = 0.7;
const TOP_P: f64 = 0.9;

/// Multi-turn conversation flattened into a single prompt.
pub struct TitanSchema;

/// Render prior turns followed by the open turn for `message`.
pub fn render_prompt(request: &ChatRequest) -> String {
    let mut prompt = String::new();
    for turn in &request.history {
        prompt.push_str("User: ");
        prompt.push_str(&turn.user);
        prompt.push_str("\nAssistant: ");
        prompt.push_str(&turn.assistant);
        prompt.push('\n');
    }
    prompt.push_str("User: ");
    prompt.push_str(&request.message);
    prompt.push_str("\nAssistant:");
    prompt
}

impl ModelSchema for TitanSchema {
    fn variant(&self) -> Variant {
        Variant::Titan
    }

    fn model_id(&self) -> &str {
        MODEL_ID
    }

    fn uses_history(&self) -> bool {
        true
    }

    fn build_request(&self, request: &ChatRequest) -> Result<Bytes, RelayError> {
        let body = TitanRequest {
            input_text: render_prompt(request),
            text_generation_config: TitanGenerationConfig {
                max_token_count: MAX_TOKEN_COUNT,
                temperature: TEMPERATURE,
                top_p: TOP_P,
                stop_sequences: Vec::new(),
            },
        };
        serde_json::to_vec(&body)
            .map(Bytes::from)
            .map_err(|e| RelayError::Internal(e.to_string()))
    }

    /// `results[0].outputText`, or an empty reply when absent.
    fn extract_reply(&self, body: &[u8]) -> Result<ModelReply, RelayError> {
        let resp: TitanResponse = serde_json::from_slice(body).map_err(|e| {
            RelayError::Extraction(format!("response is not a Titan envelope: {e}"))
        })?;

        let first = resp.results.into_iter().next().unwrap_or_default();
        Ok(ModelReply {
            text: first.output_text.unwrap_or_default(),
            input_tokens: resp.input_text_token_count,
            output_tokens: first.token_count,
            stop_reason: first.completion_reason,
        })
    }
}
