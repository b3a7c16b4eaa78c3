//! HTTP handler for Stripe webhook deliveries.
//!
//! The body is taken as raw bytes: the signature covers the exact bytes
//! Stripe sent, so it must be verified before any JSON parsing.

use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::{Json, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::IntoResponse;
use serde::{Deserialize, Serialize};

use crate::application::{HandleStripeWebhookCommand, HandleStripeWebhookHandler};
use crate::domain::membership::{StripeWebhookVerifier, WebhookError};
use crate::ports::{MembershipSync, PaymentProvider};

/// Header carrying Stripe's signature.
pub const STRIPE_SIGNATURE_HEADER: &str = "Stripe-Signature";

// ════════════════════════════════════════════════════════════════════════════════
// Application State
// ════════════════════════════════════════════════════════════════════════════════

/// Shared state for the webhook endpoint.
#[derive(Clone)]
pub struct WebhookAppState {
    pub verifier: StripeWebhookVerifier,
    pub payment_provider: Arc<dyn PaymentProvider>,
    pub membership_sync: Arc<dyn MembershipSync>,
}

impl WebhookAppState {
    pub fn webhook_handler(&self) -> HandleStripeWebhookHandler {
        HandleStripeWebhookHandler::new(
            self.verifier.clone(),
            self.payment_provider.clone(),
            self.membership_sync.clone(),
        )
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Response DTOs
// ════════════════════════════════════════════════════════════════════════════════

/// Acknowledgement returned to Stripe.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WebhookAck {
    pub received: bool,
}

/// Failure body returned to Stripe.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WebhookErrorResponse {
    pub error: String,
}

// ════════════════════════════════════════════════════════════════════════════════
// Handler
// ════════════════════════════════════════════════════════════════════════════════

/// POST /stripe/webhooks - Handle Stripe webhook events
pub async fn handle_stripe_webhook(
    State(state): State<WebhookAppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<impl IntoResponse, WebhookApiError> {
    let signature = headers
        .get(STRIPE_SIGNATURE_HEADER)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);

    let cmd = HandleStripeWebhookCommand {
        payload: body.to_vec(),
        signature,
    };

    state.webhook_handler().handle(cmd).await?;

    Ok((StatusCode::OK, Json(WebhookAck { received: true })))
}

// ════════════════════════════════════════════════════════════════════════════════
// Error Handling
// ════════════════════════════════════════════════════════════════════════════════

/// API error type that converts webhook errors to HTTP responses.
///
/// Detail is only echoed for verification failures; the handler has already
/// logged everything else.
#[derive(Debug)]
pub struct WebhookApiError(WebhookError);

impl From<WebhookError> for WebhookApiError {
    fn from(err: WebhookError) -> Self {
        Self(err)
    }
}

impl IntoResponse for WebhookApiError {
    fn into_response(self) -> axum::response::Response {
        let body = WebhookErrorResponse {
            error: self.0.public_message(),
        };
        (self.0.status_code(), Json(body)).into_response()
    }
}
