use crate::error::RelayError;
use serde::{Deserialize, Serialize};
use serde_json::Value;

// ─── Request ───────────────────────────────────────────────────────────────

/// A chat message posted by the client, optionally with prior turns.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatRequest {
    #[serde(default)]
    pub message: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub history: Vec<HistoryTurn>,
}

/// One completed exchange, oldest first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryTurn {
    pub user: String,
    pub assistant: String,
}

#[derive(Deserialize)]
struct SingleTurn {
    #[serde(default)]
    message: String,
}

impl ChatRequest {
    /// Parse a raw request body.
    ///
    /// A missing body or one that is not a JSON object is rejected. When
    /// `with_history` is false the `history` key is never inspected.
    pub fn parse(body: Option<&[u8]>, with_history: bool) -> Result<Self, RelayError> {
        let body = body.ok_or_else(|| RelayError::Request("missing request body".into()))?;
        let value: Value = serde_json::from_slice(body)
            .map_err(|e| RelayError::Request(format!("body is not valid JSON: {e}")))?;
        if !value.is_object() {
            return Err(RelayError::Request("body must be a JSON object".into()));
        }

        if with_history {
            serde_json::from_value(value).map_err(|e| RelayError::Request(e.to_string()))
        } else {
            let single: SingleTurn =
                serde_json::from_value(value).map_err(|e| RelayError::Request(e.to_string()))?;
            Ok(Self {
                message: single.message,
                history: Vec::new(),
            })
        }
    }
}

// ─── Response ──────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatReply {
    pub response: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_message_and_history() {
        let body = br#"{"message":"and now?","history":[{"user":"hi","assistant":"hello"}]}"#;
        let req = ChatRequest::parse(Some(body), true).unwrap();
        assert_eq!(req.message, "and now?");
        assert_eq!(
            req.history,
            vec![HistoryTurn {
                user: "hi".into(),
                assistant: "hello".into()
            }]
        );
    }

    #[test]
    fn test_parse_defaults_missing_keys() {
        let req = ChatRequest::parse(Some(b"{}"), true).unwrap();
        assert_eq!(req, ChatRequest::default());
    }

    #[test]
    fn test_parse_missing_body_is_error() {
        let err = ChatRequest::parse(None, false).unwrap_err();
        assert!(matches!(err, RelayError::Request(_)));
    }

    #[test]
    fn test_parse_malformed_json_is_error() {
        let err = ChatRequest::parse(Some(b"{not json"), true).unwrap_err();
        assert!(matches!(err, RelayError::Request(_)));
    }

    #[test]
    fn test_parse_rejects_non_object() {
        for body in [&b"[]"[..], b"\"hi\"", b"null", b"42"] {
            let err = ChatRequest::parse(Some(body), true).unwrap_err();
            assert!(matches!(err, RelayError::Request(_)), "body {body:?}");
        }
    }

    #[test]
    fn test_parse_history_turn_missing_assistant() {
        let body = br#"{"message":"x","history":[{"user":"only"}]}"#;
        let err = ChatRequest::parse(Some(body), true).unwrap_err();
        assert!(err.to_string().contains("assistant"), "{err}");
    }

    #[test]
    fn test_parse_single_turn_ignores_history() {
        let body = br#"{"message":"x","history":"not a list"}"#;
        let req = ChatRequest::parse(Some(body), false).unwrap();
        assert_eq!(req.message, "x");
        assert!(req.history.is_empty());
    }

    #[test]
    fn test_reply_serialization() {
        let reply = ChatReply {
            response: "hi".into(),
        };
        assert_eq!(serde_json::to_string(&reply).unwrap(), r#"{"response":"hi"}"#);
        let err = ErrorBody {
            error: "boom".into(),
        };
        assert_eq!(serde_json::to_string(&err).unwrap(), r#"{"error":"boom"}"#);
    }
}
