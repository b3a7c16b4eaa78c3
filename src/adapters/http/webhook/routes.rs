//! Axum router configuration for the Stripe webhook endpoint.

use axum::{routing::post, Router};

use super::handlers::{handle_stripe_webhook, WebhookAppState};

/// Create the Stripe webhook router.
///
/// Webhooks carry no user identity; they are authenticated by signature.
///
/// # Routes
/// - `POST /webhooks` - Handle Stripe webhooks
pub fn webhook_routes() -> Router<WebhookAppState> {
    Router::new().route("/webhooks", post(handle_stripe_webhook))
}

/// Webhook router mounted at `/stripe`.
pub fn webhook_router() -> Router<WebhookAppState> {
    Router::new().nest("/stripe", webhook_routes())
}
