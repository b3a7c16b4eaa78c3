//! Customer aggregate.
//!
//! A Customer is the local, denormalized view of a user's billing state:
//! which tier they hold and which Stripe customer/subscription back it.
//!
//! # Invariants
//!
//! - At most one Customer per `user_id`
//! - At most one Customer per non-null `provider_customer_id`
//! - Customers are never deleted; a downgrade sets `membership` to `Free`
//!
//! Both uniqueness rules are enforced by the customer store, not here.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::foundation::{CustomerId, UserId};

use super::MembershipTier;

/// Local customer record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Customer {
    pub id: CustomerId,
    pub user_id: UserId,
    pub membership: MembershipTier,
    pub provider_customer_id: Option<String>,
    pub provider_subscription_id: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Customer {
    /// Creates an unlinked customer on the given tier.
    pub fn new(user_id: UserId, membership: MembershipTier) -> Self {
        let now = Utc::now();
        Self {
            id: CustomerId::new(),
            user_id,
            membership,
            provider_customer_id: None,
            provider_subscription_id: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Creates a customer already linked to a Stripe customer and subscription.
    pub fn linked(
        user_id: UserId,
        provider_customer_id: impl Into<String>,
        provider_subscription_id: impl Into<String>,
        membership: MembershipTier,
    ) -> Self {
        let mut customer = Self::new(user_id, membership);
        customer.provider_customer_id = Some(provider_customer_id.into());
        customer.provider_subscription_id = Some(provider_subscription_id.into());
        customer
    }

    /// True once the customer has a Stripe customer id.
    pub fn is_linked(&self) -> bool {
        self.provider_customer_id.is_some()
    }
}

/// Partial update of a customer. `None` fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub membership: Option<MembershipTier>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub provider_customer_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub provider_subscription_id: Option<String>,
}

impl CustomerPatch {
    /// Patch that sets only the membership tier.
    pub fn membership(tier: MembershipTier) -> Self {
        Self {
            membership: Some(tier),
            ..Self::default()
        }
    }

    pub fn with_provider_customer_id(mut self, id: impl Into<String>) -> Self {
        self.provider_customer_id = Some(id.into());
        self
    }

    pub fn with_provider_subscription_id(mut self, id: impl Into<String>) -> Self {
        self.provider_subscription_id = Some(id.into());
        self
    }

    /// True when the patch would change nothing.
    pub fn is_empty(&self) -> bool {
        self.membership.is_none()
            && self.provider_customer_id.is_none()
            && self.provider_subscription_id.is_none()
    }

    /// Applies the supplied fields to `customer`. `updated_at` moves to `now`
    /// only when a field actually changed, so replaying a patch leaves the
    /// record identical. Returns whether anything changed.
    pub fn apply(&self, customer: &mut Customer, now: DateTime<Utc>) -> bool {
        let mut changed = false;
        if let Some(tier) = self.membership {
            changed |= customer.membership != tier;
            customer.membership = tier;
        }
        if let Some(id) = &self.provider_customer_id {
            changed |= customer.provider_customer_id.as_deref() != Some(id.as_str());
            customer.provider_customer_id = Some(id.clone());
        }
        if let Some(id) = &self.provider_subscription_id {
            changed |= customer.provider_subscription_id.as_deref() != Some(id.as_str());
            customer.provider_subscription_id = Some(id.clone());
        }
        if changed {
            customer.updated_at = now;
        }
        changed
    }
}
