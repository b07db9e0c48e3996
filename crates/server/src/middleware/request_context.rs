use axum::{extract::Request, middleware::Next, response::Response};
use relay_core::context::RequestContext;

fn header(request: &Request, name: &str) -> Option<String> {
    request
        .headers()
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(|s| s.to_string())
}

/// Injects a `RequestContext` as an axum Extension.
pub async fn request_context_middleware(mut request: Request, next: Next) -> Response {
    let client_ip = header(&request, "x-forwarded-for")
        .map(|v| v.split(',').next().unwrap_or("").trim().to_string())
        .or_else(|| header(&request, "x-real-ip"));
    let origin = header(&request, "origin");

    let ctx = RequestContext::new(client_ip, origin);
    request.extensions_mut().insert(ctx);
    next.run(request).await
}
