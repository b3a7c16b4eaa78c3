//! Stripe objects carried in webhook events.
//!
//! Only the fields membership sync reads are captured. References Stripe may
//! render either as an id or as an expanded object are parsed as
//! [`Expandable`].

use serde::{Deserialize, Serialize};

use super::SubscriptionStatus;

/// A reference Stripe renders either as a bare id or as the expanded object.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(untagged)]
pub enum Expandable {
    Id(String),
    Object(ExpandedObject),
}

/// The only part of an expanded object this service reads.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ExpandedObject {
    pub id: String,
}

impl Expandable {
    /// Id of the referenced object, expanded or not.
    pub fn id(&self) -> &str {
        match self {
            Expandable::Id(id) => id,
            Expandable::Object(obj) => &obj.id,
        }
    }
}

/// Stripe Checkout Session object.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StripeCheckoutSession {
    /// Unique session identifier (cs_...).
    pub id: String,

    /// Payment mode (payment, setup, subscription).
    pub mode: String,

    /// Local user id passed when the session was created.
    #[serde(default)]
    pub client_reference_id: Option<String>,

    /// Customer created or attached by checkout.
    #[serde(default)]
    pub customer: Option<Expandable>,

    /// Subscription created by checkout (subscription mode only).
    #[serde(default)]
    pub subscription: Option<Expandable>,
}

impl StripeCheckoutSession {
    /// True when the session created a subscription.
    pub fn is_subscription(&self) -> bool {
        self.mode == "subscription"
    }

    pub fn customer_id(&self) -> Option<&str> {
        self.customer.as_ref().map(Expandable::id)
    }

    pub fn subscription_id(&self) -> Option<&str> {
        self.subscription.as_ref().map(Expandable::id)
    }

    /// `client_reference_id`, treating an empty string as absent.
    pub fn reference_id(&self) -> Option<&str> {
        self.client_reference_id
            .as_deref()
            .filter(|id| !id.trim().is_empty())
    }
}

/// Stripe Subscription object.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StripeSubscription {
    /// Unique subscription identifier (sub_...).
    pub id: String,

    /// Customer owning this subscription.
    pub customer: Expandable,

    /// Subscription status.
    pub status: SubscriptionStatus,

    /// Subscription items (price/quantity pairs).
    #[serde(default)]
    pub items: StripeSubscriptionItems,
}

impl StripeSubscription {
    /// Product of each line item, in line item order.
    pub fn product_ids(&self) -> Vec<String> {
        self.items
            .data
            .iter()
            .map(|item| item.price.product.id().to_string())
            .collect()
    }
}

/// Subscription items container.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct StripeSubscriptionItems {
    /// List of subscription items.
    #[serde(default)]
    pub data: Vec<StripeSubscriptionItem>,
}

/// Single subscription item.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StripeSubscriptionItem {
    /// Item ID.
    pub id: String,

    /// Price object.
    pub price: StripePrice,
}

/// Stripe Price object (embedded in subscription items).
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StripePrice {
    /// Price ID.
    pub id: String,

    /// Product this price is for.
    pub product: Expandable,
}
