//! HTTP adapter for Stripe webhooks.
//!
//! - `POST /stripe/webhooks` - signed Stripe event deliveries

pub mod handlers;
pub mod routes;

pub use handlers::{
    WebhookAck, WebhookApiError, WebhookAppState, WebhookErrorResponse, STRIPE_SIGNATURE_HEADER,
};
pub use routes::{webhook_router, webhook_routes};
