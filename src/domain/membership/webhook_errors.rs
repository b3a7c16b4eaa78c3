//! Webhook error types for Stripe webhook handling.
//!
//! Every failure is answered at the request boundary with 400. The kind of
//! failure decides the log level and what the response body may reveal:
//! authentication failures echo their detail, everything that happens after
//! verification is hidden behind a fixed message.

use axum::http::StatusCode;
use thiserror::Error;

/// Message returned for any failure after the event was verified.
pub const HANDLER_FAILED_MESSAGE: &str = "Webhook handler failed. View your function logs.";

/// Broad classification of webhook failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WebhookErrorKind {
    /// The request could not be proven to come from Stripe.
    Authentication,
    /// Stripe catalog data is set up wrong (bad product metadata).
    Configuration,
    /// The event payload is missing data this service needs.
    Integration,
    /// Local state disagrees with the event.
    Consistency,
    /// A collaborator (Stripe API, customer store) failed.
    Upstream,
}

/// Errors that occur during webhook processing.
#[derive(Debug, Error)]
pub enum WebhookError {
    /// Request carried no `Stripe-Signature` header.
    #[error("Webhook secret or signature missing")]
    MissingSignature,

    /// No webhook signing secret is configured.
    #[error("Webhook secret or signature missing")]
    MissingSecret,

    /// No `v1` signature matched the payload.
    #[error("No signatures found matching the expected signature for payload")]
    InvalidSignature,

    /// Webhook timestamp is older than the tolerance window.
    #[error("Timestamp outside the tolerance zone")]
    TimestampOutOfRange,

    /// Event timestamp is in the future beyond clock skew tolerance.
    #[error("Timestamp is in the future")]
    InvalidTimestamp,

    /// Signature header could not be parsed.
    #[error("Unable to extract timestamp and signatures from header: {0}")]
    MalformedSignature(String),

    /// Verified body is not a Stripe event.
    #[error("Invalid event payload: {0}")]
    InvalidPayload(String),

    /// Product metadata does not declare `free` or `pro`.
    #[error("Invalid or missing membership type in product metadata: {}", .0.as_deref().unwrap_or("undefined"))]
    InvalidDeclaredTier(Option<String>),

    /// Subscription checkout without `client_reference_id`.
    #[error("client_reference_id is required for subscription checkout")]
    MissingReferenceId,

    /// Required field missing from webhook payload.
    #[error("Missing field: {0}")]
    MissingField(&'static str),

    /// Event object could not be read as the expected Stripe object.
    #[error("Malformed event object: {0}")]
    MalformedObject(String),

    /// Subscription has no line items to read a product from.
    #[error("Subscription {0} has no line items")]
    NoLineItems(String),

    /// No customer is linked to the Stripe customer on the event.
    #[error("Customer not found for provider customer {0}")]
    CustomerNotFound(String),

    /// Stripe API lookup failed.
    #[error("Payment provider error: {0}")]
    Provider(String),

    /// Customer store operation failed.
    #[error("Customer store error: {0}")]
    Store(String),
}

impl WebhookError {
    /// Classifies the error.
    pub fn kind(&self) -> WebhookErrorKind {
        match self {
            WebhookError::MissingSignature
            | WebhookError::MissingSecret
            | WebhookError::InvalidSignature
            | WebhookError::TimestampOutOfRange
            | WebhookError::InvalidTimestamp
            | WebhookError::MalformedSignature(_)
            | WebhookError::InvalidPayload(_) => WebhookErrorKind::Authentication,

            WebhookError::InvalidDeclaredTier(_) => WebhookErrorKind::Configuration,

            WebhookError::MissingReferenceId
            | WebhookError::MissingField(_)
            | WebhookError::MalformedObject(_)
            | WebhookError::NoLineItems(_) => WebhookErrorKind::Integration,

            WebhookError::CustomerNotFound(_) => WebhookErrorKind::Consistency,

            WebhookError::Provider(_) | WebhookError::Store(_) => WebhookErrorKind::Upstream,
        }
    }

    /// True when the request never got past verification.
    pub fn is_authentication_failure(&self) -> bool {
        self.kind() == WebhookErrorKind::Authentication
    }

    /// Maps the error to an HTTP status code.
    ///
    /// Stripe redelivers on any non-2xx, so every failure is a 400.
    pub fn status_code(&self) -> StatusCode {
        StatusCode::BAD_REQUEST
    }

    /// Text safe to put in the response body.
    pub fn public_message(&self) -> String {
        if self.is_authentication_failure() {
            self.to_string()
        } else {
            HANDLER_FAILED_MESSAGE.to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ══════════════════════════════════════════════════════════════
    // Error Display Tests
    // ══════════════════════════════════════════════════════════════

    #[test]
    fn missing_signature_and_secret_share_message() {
        assert_eq!(
            WebhookError::MissingSignature.to_string(),
            WebhookError::MissingSecret.to_string()
        );
    }

    #[test]
    fn invalid_declared_tier_shows_value() {
        let err = WebhookError::InvalidDeclaredTier(Some("gold".to_string()));
        assert_eq!(
            err.to_string(),
            "Invalid or missing membership type in product metadata: gold"
        );
    }

    #[test]
    fn missing_declared_tier_shows_undefined() {
        let err = WebhookError::InvalidDeclaredTier(None);
        assert_eq!(
            err.to_string(),
            "Invalid or missing membership type in product metadata: undefined"
        );
    }

    #[test]
    fn missing_reference_id_displays_correctly() {
        assert_eq!(
            WebhookError::MissingReferenceId.to_string(),
            "client_reference_id is required for subscription checkout"
        );
    }

    // ══════════════════════════════════════════════════════════════
    // Kind Tests
    // ══════════════════════════════════════════════════════════════

    #[test]
    fn verification_failures_are_authentication() {
        for err in [
            WebhookError::MissingSignature,
            WebhookError::MissingSecret,
            WebhookError::InvalidSignature,
            WebhookError::TimestampOutOfRange,
            WebhookError::InvalidTimestamp,
            WebhookError::MalformedSignature("no t".to_string()),
        ] {
            assert_eq!(err.kind(), WebhookErrorKind::Authentication);
        }
    }

    #[test]
    fn bad_tier_is_configuration() {
        assert_eq!(
            WebhookError::InvalidDeclaredTier(None).kind(),
            WebhookErrorKind::Configuration
        );
    }

    #[test]
    fn payload_gaps_are_integration() {
        assert_eq!(WebhookError::MissingReferenceId.kind(), WebhookErrorKind::Integration);
        assert_eq!(WebhookError::MissingField("customer").kind(), WebhookErrorKind::Integration);
        assert_eq!(
            WebhookError::NoLineItems("sub_1".to_string()).kind(),
            WebhookErrorKind::Integration
        );
    }

    #[test]
    fn unknown_customer_is_consistency() {
        assert_eq!(
            WebhookError::CustomerNotFound("cus_1".to_string()).kind(),
            WebhookErrorKind::Consistency
        );
    }

    #[test]
    fn collaborator_failures_are_upstream() {
        assert_eq!(WebhookError::Provider("timeout".to_string()).kind(), WebhookErrorKind::Upstream);
        assert_eq!(WebhookError::Store("pool closed".to_string()).kind(), WebhookErrorKind::Upstream);
    }

    // ══════════════════════════════════════════════════════════════
    // Response Tests
    // ══════════════════════════════════════════════════════════════

    #[test]
    fn every_error_returns_bad_request() {
        assert_eq!(WebhookError::InvalidSignature.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(
            WebhookError::CustomerNotFound("cus_1".to_string()).status_code(),
            StatusCode::BAD_REQUEST
        );
    }

    #[test]
    fn authentication_failures_expose_detail() {
        assert_eq!(
            WebhookError::MissingSecret.public_message(),
            "Webhook secret or signature missing"
        );
    }

    #[test]
    fn handler_failures_hide_detail() {
        let err = WebhookError::CustomerNotFound("cus_secret".to_string());
        assert_eq!(err.public_message(), HANDLER_FAILED_MESSAGE);
        assert!(!err.public_message().contains("cus_secret"));
    }
}
