use reqwest::{Client, Proxy};
use std::time::Duration;

const USER_AGENT: &str = concat!("chat-relay/", env!("CARGO_PKG_VERSION"));

/// Build the HTTP client used for inference calls.
///
/// `proxy_url` of `None` or `Some("")` means a direct connection; system
/// proxy environment variables are never consulted.
pub fn build_http_client(
    proxy_url: Option<&str>,
    connect_timeout_secs: u64,
    request_timeout_secs: u64,
) -> Result<Client, anyhow::Error> {
    let mut builder = Client::builder()
        .user_agent(USER_AGENT)
        .connect_timeout(Duration::from_secs(connect_timeout_secs))
        .timeout(Duration::from_secs(request_timeout_secs));

    match proxy_url.filter(|url| !url.is_empty()) {
        // reqwest auto-detects http/https/socks5
        Some(url) => builder = builder.proxy(Proxy::all(url)?),
        None => builder = builder.no_proxy(),
    }

    Ok(builder.build()?)
}

/// Validate that a proxy URL is well-formed.
pub fn validate_proxy_url(url: &str) -> Result<(), anyhow::Error> {
    if url.is_empty() {
        return Ok(());
    }
    let parsed =
        url::Url::parse(url).map_err(|e| anyhow::anyhow!("invalid proxy URL '{url}': {e}"))?;
    match parsed.scheme() {
        "http" | "https" | "socks5" => Ok(()),
        scheme => Err(anyhow::anyhow!(
            "unsupported proxy scheme '{scheme}' in URL '{url}', expected http/https/socks5"
        )),
    }
}
