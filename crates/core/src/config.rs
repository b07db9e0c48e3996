use crate::provider::Variant;
use serde::{Deserialize, Serialize};

// ─── Config ────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct Config {
    // Server
    pub host: String,
    pub port: u16,

    // Provider variant, fixed for the lifetime of the process
    pub variant: Variant,
    pub bedrock: BedrockConfig,

    // Outbound proxy for the inference endpoint
    pub proxy_url: Option<String>,

    // Timeouts (seconds)
    pub connect_timeout: u64,
    pub request_timeout: u64,
    pub shutdown_timeout: u64,

    // Request body size limit (MB)
    pub body_limit_mb: usize,

    // Logging
    pub logging_to_file: bool,
    pub log_dir: Option<String>,
    pub log_format: LogFormat,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            variant: Variant::default(),
            bedrock: BedrockConfig::default(),
            proxy_url: None,
            connect_timeout: 30,
            request_timeout: 300,
            shutdown_timeout: 5,
            body_limit_mb: 1,
            logging_to_file: false,
            log_dir: None,
            log_format: LogFormat::default(),
        }
    }
}

impl Config {
    /// Load config from a YAML file, sanitize, and validate.
    pub fn load(path: &str) -> Result<Self, anyhow::Error> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_yaml(&contents)
    }

    pub fn from_yaml(contents: &str) -> Result<Self, anyhow::Error> {
        let mut config: Config = serde_yaml_ng::from_str(contents)?;
        config.sanitize();
        config.validate()?;
        Ok(config)
    }

    /// Validate configuration.
    pub fn validate(&self) -> Result<(), anyhow::Error> {
        anyhow::ensure!(self.port != 0, "port must be non-zero");
        anyhow::ensure!(self.body_limit_mb > 0, "body-limit-mb must be at least 1");
        anyhow::ensure!(
            self.body_limit_bytes().is_some(),
            "body-limit-mb {} is too large",
            self.body_limit_mb
        );
        if let Some(ref proxy) = self.proxy_url {
            crate::proxy::validate_proxy_url(proxy)?;
        }
        if let Some(ref endpoint) = self.bedrock.endpoint {
            let parsed = url::Url::parse(endpoint)
                .map_err(|e| anyhow::anyhow!("invalid bedrock endpoint '{endpoint}': {e}"))?;
            anyhow::ensure!(
                matches!(parsed.scheme(), "http" | "https"),
                "bedrock endpoint '{endpoint}' must use http or https"
            );
        }
        Ok(())
    }

    /// Request body limit in bytes; `None` when `body-limit-mb` overflows.
    pub fn body_limit_bytes(&self) -> Option<usize> {
        self.body_limit_mb.checked_mul(1024 * 1024)
    }

    /// Trim whitespace, drop empty optionals, strip trailing slashes.
    fn sanitize(&mut self) {
        self.bedrock.region = non_empty(self.bedrock.region.take());
        self.bedrock.api_key = non_empty(self.bedrock.api_key.take());
        self.bedrock.endpoint = non_empty(self.bedrock.endpoint.take()).map(|mut url| {
            while url.ends_with('/') {
                url.pop();
            }
            url
        });
        self.log_dir = non_empty(self.log_dir.take());
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

// ─── Sub-configs ───────────────────────────────────────────────────────────

/// Bedrock runtime settings. Unset fields are resolved from the process
/// environment when the client is first used.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case", default)]
pub struct BedrockConfig {
    pub region: Option<String>,
    /// Overrides the regional `bedrock-runtime` endpoint.
    pub endpoint: Option<String>,
    /// Bedrock API key, sent as a bearer token.
    pub api_key: Option<String>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}
