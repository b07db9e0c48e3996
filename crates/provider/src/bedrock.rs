use crate::common;
use async_trait::async_trait;
use relay_core::config::Config;
use relay_core::error::RelayError;
use relay_core::provider::{InferenceClient, InferenceRequest, InferenceResponse};
use tokio::sync::OnceCell;

const DEFAULT_REGION: &str = "us-east-1";
const API_KEY_ENV: &str = "AWS_BEARER_TOKEN_BEDROCK";
const REGION_ENVS: [&str; 2] = ["AWS_REGION", "AWS_DEFAULT_REGION"];

/// Everything needed to reach Bedrock, before environment resolution.
#[derive(Debug, Clone)]
pub struct BedrockSettings {
    pub region: Option<String>,
    pub endpoint: Option<String>,
    pub api_key: Option<String>,
    pub proxy_url: Option<String>,
    pub connect_timeout: u64,
    pub request_timeout: u64,
}

impl BedrockSettings {
    pub fn from_config(config: &Config) -> Self {
        Self {
            region: config.bedrock.region.clone(),
            endpoint: config.bedrock.endpoint.clone(),
            api_key: config.bedrock.api_key.clone(),
            proxy_url: config.proxy_url.clone(),
            connect_timeout: config.connect_timeout,
            request_timeout: config.request_timeout,
        }
    }
}

/// Resolved connection state, built once and never mutated.
struct Session {
    http: reqwest::Client,
    endpoint: String,
    api_key: String,
}

impl Session {
    fn resolve(
        settings: &BedrockSettings,
        env: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, RelayError> {
        let api_key = settings
            .api_key
            .clone()
            .or_else(|| env(API_KEY_ENV))
            .filter(|k| !k.is_empty())
            .ok_or_else(|| {
                RelayError::Config(format!(
                    "no Bedrock API key configured; set bedrock.api-key or {API_KEY_ENV}"
                ))
            })?;

        let endpoint = match settings.endpoint {
            Some(ref endpoint) => endpoint.trim_end_matches('/').to_string(),
            None => regional_endpoint(&resolve_region(settings.region.as_deref(), &env)),
        };

        let http = relay_core::proxy::build_http_client(
            settings.proxy_url.as_deref(),
            settings.connect_timeout,
            settings.request_timeout,
        )
        .map_err(|e| RelayError::Config(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            http,
            endpoint,
            api_key,
        })
    }
}

/// Configured region, then `AWS_REGION`, then `AWS_DEFAULT_REGION`, then us-east-1.
pub fn resolve_region(configured: Option<&str>, env: impl Fn(&str) -> Option<String>) -> String {
    configured
        .map(str::to_string)
        .or_else(|| REGION_ENVS.iter().find_map(|&key| env(key)))
        .filter(|r| !r.is_empty())
        .unwrap_or_else(|| DEFAULT_REGION.to_string())
}

pub fn regional_endpoint(region: &str) -> String {
    format!("https://bedrock-runtime.{region}.amazonaws.com")
}

/// `InvokeModel` URL; the model id is percent-encoded (`:` becomes `%3A`).
pub fn invoke_url(endpoint: &str, model_id: &str) -> String {
    format!("{endpoint}/model/{}/invoke", urlencoding::encode(model_id))
}

/// Bedrock runtime `InvokeModel` over HTTPS with a bearer API key.
///
/// Credentials and the HTTP client are resolved on the first call and shared
/// by every later call from any task.
pub struct BedrockExecutor {
    settings: BedrockSettings,
    session: OnceCell<Session>,
}

impl BedrockExecutor {
    pub fn new(settings: BedrockSettings) -> Self {
        Self {
            settings,
            session: OnceCell::new(),
        }
    }

    async fn session(&self) -> Result<&Session, RelayError> {
        self.session
            .get_or_try_init(|| async {
                let session = Session::resolve(&self.settings, |key| std::env::var(key).ok())?;
                tracing::info!(endpoint = %session.endpoint, "Bedrock client initialized");
                Ok::<_, RelayError>(session)
            })
            .await
    }
}

#[async_trait]
impl InferenceClient for BedrockExecutor {
    fn identifier(&self) -> &str {
        "bedrock"
    }

    async fn invoke(&self, request: InferenceRequest) -> Result<InferenceResponse, RelayError> {
        let session = self.session().await?;
        let url = invoke_url(&session.endpoint, &request.model_id);

        tracing::debug!(model = %request.model_id, bytes = request.body.len(), "Invoking model");

        let resp = session
            .http
            .post(&url)
            .header("content-type", request.content_type.as_str())
            .header("accept", request.accept.as_str())
            .header("authorization", format!("Bearer {}", session.api_key))
            .body(request.body)
            .send()
            .await?;

        let (body, headers) = common::handle_response(resp).await?;
        Ok(InferenceResponse { body, headers })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn settings() -> BedrockSettings {
        BedrockSettings {
            region: None,
            endpoint: None,
            api_key: None,
            proxy_url: None,
            connect_timeout: 5,
            request_timeout: 30,
        }
    }

    fn env_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_resolve_region_precedence() {
        let env = env_from(&[("AWS_REGION", "eu-west-1"), ("AWS_DEFAULT_REGION", "ap-south-1")]);
        assert_eq!(resolve_region(Some("us-west-2"), &env), "us-west-2");
        assert_eq!(resolve_region(None, &env), "eu-west-1");

        let env = env_from(&[("AWS_DEFAULT_REGION", "ap-south-1")]);
        assert_eq!(resolve_region(None, &env), "ap-south-1");

        assert_eq!(resolve_region(None, env_from(&[])), "us-east-1");
    }

    #[test]
    fn test_invoke_url_encodes_model_id() {
        assert_eq!(
            invoke_url(&regional_endpoint("us-east-1"), "amazon.nova-lite-v1:0"),
            "https://bedrock-runtime.us-east-1.amazonaws.com/model/amazon.nova-lite-v1%3A0/invoke"
        );
        assert_eq!(
            invoke_url("http://localhost:4566", "amazon.titan-text-express-v1"),
            "http://localhost:4566/model/amazon.titan-text-express-v1/invoke"
        );
    }

    #[test]
    fn test_session_requires_api_key() {
        let err = Session::resolve(&settings(), env_from(&[])).err().unwrap();
        assert!(matches!(err, RelayError::Config(_)));
        assert!(err.to_string().contains(API_KEY_ENV));
    }

    #[test]
    fn test_session_reads_key_and_region_from_env() {
        let env = env_from(&[(API_KEY_ENV, "abc"), ("AWS_REGION", "eu-central-1")]);
        let session = Session::resolve(&settings(), env).unwrap();
        assert_eq!(session.api_key, "abc");
        assert_eq!(
            session.endpoint,
            "https://bedrock-runtime.eu-central-1.amazonaws.com"
        );
    }

    #[test]
    fn test_session_prefers_configured_values() {
        let settings = BedrockSettings {
            endpoint: Some("http://localhost:4566/".into()),
            api_key: Some("configured".into()),
            ..settings()
        };
        let session = Session::resolve(&settings, env_from(&[(API_KEY_ENV, "env")])).unwrap();
        assert_eq!(session.api_key, "configured");
        assert_eq!(session.endpoint, "http://localhost:4566");
    }
}
