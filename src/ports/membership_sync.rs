//! Membership sync port.
//!
//! The only mutation surface the webhook handler is given. It exposes the
//! two transitions a Stripe event can cause and nothing else.

use crate::domain::foundation::{DomainError, UserId};
use crate::domain::membership::{Customer, MembershipTier};
use async_trait::async_trait;

/// Subscription state to record against a Stripe customer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubscriptionUpdate {
    pub provider_customer_id: String,
    pub provider_subscription_id: String,
    pub membership: MembershipTier,
}

/// Checkout result to attach to a user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkCustomer {
    pub user_id: UserId,
    pub provider_customer_id: String,
    pub provider_subscription_id: String,
    pub membership: MembershipTier,
}

/// What `link_provider_customer` did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkOutcome {
    pub customer: Customer,
    /// True when a new customer record was inserted.
    pub created: bool,
}

#[async_trait]
pub trait MembershipSync: Send + Sync {
    /// Patch membership and subscription id of the customer linked to
    /// `update.provider_customer_id`.
    ///
    /// Returns `None` when no customer is linked to that Stripe customer.
    async fn update_by_provider_customer_id(
        &self,
        update: SubscriptionUpdate,
    ) -> Result<Option<Customer>, DomainError>;

    /// Link the user's customer to a Stripe customer, creating the customer
    /// if the user has none.
    async fn link_provider_customer(&self, link: LinkCustomer) -> Result<LinkOutcome, DomainError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn membership_sync_is_object_safe() {
        fn _accepts_dyn(_sync: &dyn MembershipSync) {}
    }
}
