//! Webhook handlers.
//!
//! Stripe deliveries that drive customer membership.

mod handle_stripe_webhook;

pub use handle_stripe_webhook::{
    HandleStripeWebhookCommand, HandleStripeWebhookHandler, HandleStripeWebhookResult,
};
