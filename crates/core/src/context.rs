use std::time::Instant;

/// Per-request metadata carried through the HTTP surface for logging.
/// Injected as an axum `Extension` by the request-context middleware.
#[derive(Debug, Clone)]
pub struct RequestContext {
    /// UUID v4 assigned on receipt.
    pub request_id: String,
    pub start_time: Instant,
    /// First `x-forwarded-for` hop, else `x-real-ip`.
    pub client_ip: Option<String>,
    /// Browser origin of a cross-origin call, if any.
    pub origin: Option<String>,
}

impl RequestContext {
    pub fn new(client_ip: Option<String>, origin: Option<String>) -> Self {
        Self {
            request_id: uuid::Uuid::new_v4().to_string(),
            start_time: Instant::now(),
            client_ip,
            origin,
        }
    }

    pub fn elapsed_ms(&self) -> u128 {
        self.start_time.elapsed().as_millis()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_ids_are_unique() {
        let a = RequestContext::new(None, None);
        let b = RequestContext::new(Some("10.0.0.1".into()), Some("https://app.example".into()));
        assert_ne!(a.request_id, b.request_id);
        assert_eq!(b.client_ip.as_deref(), Some("10.0.0.1"));
        assert!(a.elapsed_ms() < 60_000);
    }
}
