use crate::AppState;
use axum::Json;
use axum::extract::State;
use axum::response::IntoResponse;

pub async fn health(State(state): State<AppState>) -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
        "variant": state.relay.variant(),
        "model": state.relay.model_id(),
    }))
}
