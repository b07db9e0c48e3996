use axum::{extract::Request, middleware::Next, response::Response};
use relay_core::context::RequestContext;

/// Logs receipt and completion of every request with its context.
pub async fn request_logging_middleware(request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let path = request.uri().path().to_string();

    let ctx = request.extensions().get::<RequestContext>().cloned();
    let request_id = ctx
        .as_ref()
        .map(|c| c.request_id.clone())
        .unwrap_or_default();
    let client_ip = ctx
        .as_ref()
        .and_then(|c| c.client_ip.clone())
        .unwrap_or_else(|| "-".to_string());
    let origin = ctx
        .as_ref()
        .and_then(|c| c.origin.clone())
        .unwrap_or_else(|| "-".to_string());

    tracing::info!(
        request_id = %request_id,
        client_ip = %client_ip,
        origin = %origin,
        method = %method,
        path = %path,
        "Request received"
    );

    let response = next.run(request).await;

    let elapsed = ctx.as_ref().map(|c| c.elapsed_ms()).unwrap_or(0);
    tracing::info!(
        request_id = %request_id,
        status = response.status().as_u16(),
        elapsed_ms = elapsed,
        "Request completed"
    );

    response
}
