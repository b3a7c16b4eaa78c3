//! Stripe payment provider adapter.
//!
//! Implements the `PaymentProvider` port for Stripe:
//! - Subscription lookup (`GET /v1/subscriptions/{id}`)
//! - Product lookup (`GET /v1/products/{id}`)
//!
//! The API key is held as `secrecy::SecretString` and never logged.

mod mock_payment_provider;
mod stripe_adapter;
mod webhook_types;

pub use mock_payment_provider::{Lookup, MockPaymentProvider, ProviderCall};
pub use stripe_adapter::{StripeConfig, StripePaymentAdapter, DEFAULT_API_BASE_URL};
pub use webhook_types::StripeProduct;
