use relay_core::error::RelayError;
use std::collections::HashMap;

/// Extract response headers into a map, skipping non-UTF-8 values.
pub fn extract_headers(resp: &reqwest::Response) -> HashMap<String, String> {
    resp.headers()
        .iter()
        .filter_map(|(key, value)| {
            value
                .to_str()
                .ok()
                .map(|v| (key.as_str().to_string(), v.to_string()))
        })
        .collect()
}

/// Check the status and read the whole body.
pub async fn handle_response(
    resp: reqwest::Response,
) -> Result<(bytes::Bytes, HashMap<String, String>), RelayError> {
    let status = resp.status().as_u16();
    let headers = extract_headers(&resp);
    let body = resp.bytes().await?;

    if status >= 400 {
        return Err(RelayError::Upstream {
            status,
            body: String::from_utf8_lossy(&body).to_string(),
        });
    }

    Ok((body, headers))
}
