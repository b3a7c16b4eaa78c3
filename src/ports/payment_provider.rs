//! Payment provider port for catalog and subscription lookups.
//!
//! The webhook handler never trusts the event alone for membership: it reads
//! the product behind a subscription to learn which tier was purchased, and
//! during checkout it fetches the subscription itself.

use std::collections::HashMap;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::membership::{SubscriptionStatus, MEMBERSHIP_METADATA_KEY};

/// Read-only lookups against the payment provider.
#[async_trait]
pub trait PaymentProvider: Send + Sync {
    /// `None` when the provider does not know the subscription.
    async fn get_subscription(
        &self,
        subscription_id: &str,
    ) -> Result<Option<Subscription>, PaymentError>;

    /// `None` when the provider does not know the product.
    async fn get_product(&self, product_id: &str) -> Result<Option<Product>, PaymentError>;
}

/// Subscription as seen by this service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subscription {
    pub id: String,
    pub customer_id: String,
    pub status: SubscriptionStatus,
    /// Product of each line item, in line item order.
    pub product_ids: Vec<String>,
}

/// Catalog product. Only the metadata matters here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: String,
    #[serde(default)]
    pub metadata: HashMap<String, String>,
}

impl Product {
    /// Raw value of the `membership` metadata key, if set.
    pub fn declared_membership(&self) -> Option<&str> {
        self.metadata.get(MEMBERSHIP_METADATA_KEY).map(String::as_str)
    }
}

/// Failed lookup.
#[derive(Debug, Clone, Error)]
#[error("{code}: {message}")]
pub struct PaymentError {
    pub code: PaymentErrorCode,
    pub message: String,
    /// Provider's own error code, e.g. `resource_missing`.
    pub provider_code: Option<String>,
    /// Stripe redelivers the webhook either way; this only shapes the log.
    pub retryable: bool,
}

impl PaymentError {
    pub fn new(code: PaymentErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            provider_code: None,
            retryable: code.is_retryable(),
        }
    }

    pub fn with_provider_code(mut self, code: impl Into<String>) -> Self {
        self.provider_code = Some(code.into());
        self
    }

    pub fn network(message: impl Into<String>) -> Self {
        Self::new(PaymentErrorCode::NetworkError, message)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentErrorCode {
    /// Connection failure or timeout.
    NetworkError,
    /// The API key was rejected.
    AuthenticationError,
    RateLimitExceeded,
    /// Any other non-2xx answer, or a body that did not parse.
    ProviderError,
    /// The HTTP client could not be built.
    ClientError,
}

impl PaymentErrorCode {
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::NetworkError | Self::RateLimitExceeded)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::NetworkError => "network_error",
            Self::AuthenticationError => "authentication_error",
            Self::RateLimitExceeded => "rate_limit_exceeded",
            Self::ProviderError => "provider_error",
            Self::ClientError => "client_error",
        }
    }
}

impl std::fmt::Display for PaymentErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
