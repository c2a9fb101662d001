//! Axum router for the webhook run mode.

use axum::body::Body;
use axum::http::Request;
use axum::routing::{get, post};
use axum::Router;
use tower_http::trace::TraceLayer;
use tracing::Span;

use super::handlers::{handle_update, healthz, WebhookAppState};

/// Path the Bot API posts updates to.
pub fn webhook_path(secret: &str) -> String {
    format!("/webhook/{}", secret)
}

/// Create the webhook router.
///
/// # Routes
/// - `POST /webhook/<secret>` - Receive an update (secret header verified)
/// - `GET /healthz` - Liveness probe
pub fn webhook_router(state: WebhookAppState) -> Router {
    let path = webhook_path(state.secret());

    Router::new()
        .route(&path, post(handle_update))
        .route("/healthz", get(healthz))
        .layer(TraceLayer::new_for_http().make_span_with(request_span))
        .with_state(state)
}

/// Request span without the secret path segment.
fn request_span(request: &Request<Body>) -> Span {
    let path = request.uri().path();
    let route = if path.starts_with("/webhook/") {
        "/webhook/{secret}"
    } else {
        path
    };
    tracing::info_span!("http_request", method = %request.method(), route = %route)
}
