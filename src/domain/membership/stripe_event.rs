//! Stripe webhook event envelope.
//!
//! Only the envelope is typed here. `data.object` stays raw JSON until the
//! handler knows which object the event type carries.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use super::webhook_errors::WebhookError;

/// A verified Stripe event. Unlisted envelope fields are ignored.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StripeEvent {
    /// `evt_...`
    pub id: String,

    #[serde(rename = "type")]
    pub event_type: String,

    /// Unix seconds.
    #[serde(default)]
    pub created: i64,

    #[serde(default)]
    pub livemode: bool,

    pub data: StripeEventData,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StripeEventData {
    pub object: serde_json::Value,
}

impl StripeEvent {
    pub fn kind(&self) -> StripeEventType {
        StripeEventType::from(self.event_type.as_str())
    }

    /// Reads `data.object` as `T`.
    pub fn object<T: DeserializeOwned>(&self) -> Result<T, WebhookError> {
        T::deserialize(&self.data.object)
            .map_err(|e| WebhookError::MalformedObject(format!("{}: {}", self.event_type, e)))
    }
}

/// Event types this service acts on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StripeEventType {
    SubscriptionUpdated,
    SubscriptionDeleted,
    CheckoutSessionCompleted,
    /// Verified and acknowledged, never acted on.
    Other,
}

impl StripeEventType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::SubscriptionUpdated => "customer.subscription.updated",
            Self::SubscriptionDeleted => "customer.subscription.deleted",
            Self::CheckoutSessionCompleted => "checkout.session.completed",
            Self::Other => "other",
        }
    }

    /// Subscription updated or deleted. Both carry a subscription object.
    pub fn is_subscription_change(&self) -> bool {
        matches!(self, Self::SubscriptionUpdated | Self::SubscriptionDeleted)
    }
}

impl From<&str> for StripeEventType {
    fn from(raw: &str) -> Self {
        match raw {
            "customer.subscription.updated" => Self::SubscriptionUpdated,
            "customer.subscription.deleted" => Self::SubscriptionDeleted,
            "checkout.session.completed" => Self::CheckoutSessionCompleted,
            _ => Self::Other,
        }
    }
}
