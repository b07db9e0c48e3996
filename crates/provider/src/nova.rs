use bytes::Bytes;
use relay_core::error::RelayError;
use relay_core::provider::{ModelReply, ModelSchema, Variant};
use relay_core::types::chat::ChatRequest;
use relay_core::types::nova::*;

pub const MODEL_ID: &str = "amazon.nova-lite-v1:0";
const MAX_TOKENS: u32 = 300;
const TEMPERATURE: f64 = 0.7;
const TOP_P: f64 = 0.9;

/// Single-turn structured messages. History is not sent.
pub struct NovaSchema;

impl NovaSchema {
    fn to_request(request: &ChatRequest) -> NovaRequest {
        NovaRequest {
            messages: vec![NovaMessage {
                role: "user".to_string(),
                content: vec![NovaContent {
                    text: request.message.clone(),
                }],
            }],
            inference_config: NovaInferenceConfig {
                max_tokens: MAX_TOKENS,
                temperature: TEMPERATURE,
                top_p: TOP_P,
            },
        }
    }
}

impl ModelSchema for NovaSchema {
    fn variant(&self) -> Variant {
        Variant::Nova
    }

    fn model_id(&self) -> &str {
        MODEL_ID
    }

    fn uses_history(&self) -> bool {
        false
    }

    fn build_request(&self, request: &ChatRequest) -> Result<Bytes, RelayError> {
        serde_json::to_vec(&Self::to_request(request))
            .map(Bytes::from)
            .map_err(|e| RelayError::Internal(e.to_string()))
    }

    /// No fallback: the reply must be at `output.message.content[0].text`.
    fn extract_reply(&self, body: &[u8]) -> Result<ModelReply, RelayError> {
        let resp: NovaResponse = serde_json::from_slice(body)
            .map_err(|e| RelayError::Extraction(format!("response is not a Nova envelope: {e}")))?;

        let message = resp
            .output
            .and_then(|o| o.message)
            .ok_or_else(|| RelayError::Extraction("missing output.message".into()))?;
        let first = message
            .content
            .into_iter()
            .next()
            .ok_or_else(|| RelayError::Extraction("output.message.content is empty".into()))?;
        let text = first.text.ok_or_else(|| {
            RelayError::Extraction("missing output.message.content[0].text".into())
        })?;

        let usage = resp.usage.unwrap_or_default();
        Ok(ModelReply {
            text,
            input_tokens: usage.input_tokens,
            output_tokens: usage.output_tokens,
            stop_reason: resp.stop_reason,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_json_diff::assert_json_eq;
    use relay_core::types::chat::HistoryTurn;
    use serde_json::json;

    #[test]
    fn test_build_request_shape() {
        let req = ChatRequest {
            message: "Hello".into(),
            history: vec![],
        };
        let body = NovaSchema.build_request(&req).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_json_eq!(
            value,
            json!({
                "messages": [{"role": "user", "content": [{"text": "Hello"}]}],
                "inferenceConfig": {"maxTokens": 300, "temperature": 0.7, "topP": 0.9}
            })
        );
    }

    #[test]
    fn test_build_request_drops_history() {
        let req = ChatRequest {
            message: "second".into(),
            history: vec![HistoryTurn {
                user: "first".into(),
                assistant: "ok".into(),
            }],
        };
        let body = NovaSchema.build_request(&req).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(value["messages"].as_array().unwrap().len(), 1);
        assert_eq!(value["messages"][0]["content"][0]["text"], "second");
    }

    #[test]
    fn test_extract_reply() {
        let body = br#"{"output":{"message":{"content":[{"text":"hi"}]}}}"#;
        let reply = NovaSchema.extract_reply(body).unwrap();
        assert_eq!(reply, ModelReply::text("hi"));
    }

    #[test]
    fn test_extract_reply_with_usage() {
        let body = json!({
            "output": {
                "message": {"role": "assistant", "content": [{"text": "hey"}, {"text": "ignored"}]}
            },
            "stopReason": "end_turn",
            "usage": {"inputTokens": 5, "outputTokens": 2, "totalTokens": 7}
        });
        let reply = NovaSchema
            .extract_reply(body.to_string().as_bytes())
            .unwrap();
        assert_eq!(reply.text, "hey");
        assert_eq!(reply.input_tokens, Some(5));
        assert_eq!(reply.output_tokens, Some(2));
        assert_eq!(reply.stop_reason.as_deref(), Some("end_turn"));
    }

    #[test]
    fn test_extract_reply_missing_path_is_error() {
        let cases: [&[u8]; 5] = [
            br#"{}"#,
            br#"{"output":{}}"#,
            br#"{"output":{"message":{"content":[]}}}"#,
            br#"{"output":{"message":{"content":[{"image":{}}]}}}"#,
            b"not json",
        ];
        for body in cases {
            let err = NovaSchema.extract_reply(body).unwrap_err();
            assert!(
                matches!(err, RelayError::Extraction(_)),
                "expected extraction error for {}",
                String::from_utf8_lossy(body)
            );
        }
    }
}
