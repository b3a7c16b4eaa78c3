//! Stripe API response types.
//!
//! Subscription objects share their shape with webhook payloads and are
//! parsed with the domain's Stripe types; products and error bodies only
//! appear in API responses.

use std::collections::HashMap;

use serde::Deserialize;

use crate::domain::membership::StripeSubscription;
use crate::ports::{Product, Subscription};

impl From<StripeSubscription> for Subscription {
    fn from(sub: StripeSubscription) -> Self {
        Subscription {
            customer_id: sub.customer.id().to_string(),
            product_ids: sub.product_ids(),
            id: sub.id,
            status: sub.status,
        }
    }
}

/// Stripe Product object.
#[derive(Debug, Clone, Deserialize)]
pub struct StripeProduct {
    /// Unique product identifier (prod_...).
    pub id: String,

    /// Custom metadata.
    #[serde(default)]
    pub metadata: HashMap<String, String>,
}

impl From<StripeProduct> for Product {
    fn from(product: StripeProduct) -> Self {
        Product {
            id: product.id,
            metadata: product.metadata,
        }
    }
}

/// Error body returned by the Stripe API.
#[derive(Debug, Clone, Deserialize)]
pub struct StripeErrorBody {
    pub error: StripeApiError,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StripeApiError {
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(rename = "type", default)]
    pub error_type: Option<String>,
}
