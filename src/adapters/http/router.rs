//! Application router.
//!
//! Combines the webhook endpoint, the customer API and the health probe, and
//! applies the request-wide layers.

use std::time::Duration;

use axum::{routing::get, Json, Router};
use serde_json::{json, Value};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use super::customer::{customer_router, CustomerAppState};
use super::webhook::{webhook_router, WebhookAppState};

/// GET /health - Liveness probe
pub async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

/// Builds the full service.
///
/// # Routes
/// - `GET /health`
/// - `POST /stripe/webhooks`
/// - `/api/customers/...` (see `customer_routes`)
pub fn app_router(
    customers: CustomerAppState,
    webhooks: WebhookAppState,
    request_timeout: Duration,
) -> Router {
    Router::new()
        .route("/health", get(health))
        .merge(webhook_router().with_state(webhooks))
        .nest("/api", customer_router().with_state(customers))
        .layer(TimeoutLayer::new(request_timeout))
        .layer(TraceLayer::new_for_http())
}
