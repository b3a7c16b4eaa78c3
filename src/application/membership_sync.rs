//! CustomerMembershipSync - `MembershipSync` backed by the customer store.
//!
//! Both transitions are patches keyed by a stable identifier, so replaying
//! the same Stripe event leaves the record unchanged.

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, ErrorCode};
use crate::domain::membership::{Customer, CustomerPatch};
use crate::ports::{CustomerRepository, LinkCustomer, LinkOutcome, MembershipSync, SubscriptionUpdate};

/// Applies webhook-driven transitions through a `CustomerRepository`.
pub struct CustomerMembershipSync {
    repository: Arc<dyn CustomerRepository>,
}

impl CustomerMembershipSync {
    pub fn new(repository: Arc<dyn CustomerRepository>) -> Self {
        Self { repository }
    }

    fn link_patch(link: &LinkCustomer) -> CustomerPatch {
        CustomerPatch::membership(link.membership)
            .with_provider_customer_id(link.provider_customer_id.clone())
            .with_provider_subscription_id(link.provider_subscription_id.clone())
    }

    async fn patch_existing(
        &self,
        existing: &Customer,
        link: &LinkCustomer,
    ) -> Result<LinkOutcome, DomainError> {
        let customer = self
            .repository
            .patch(&existing.id, &Self::link_patch(link))
            .await?;
        Ok(LinkOutcome {
            customer,
            created: false,
        })
    }
}

#[async_trait]
impl MembershipSync for CustomerMembershipSync {
    async fn update_by_provider_customer_id(
        &self,
        update: SubscriptionUpdate,
    ) -> Result<Option<Customer>, DomainError> {
        let Some(existing) = self
            .repository
            .find_by_provider_customer_id(&update.provider_customer_id)
            .await?
        else {
            return Ok(None);
        };

        let patch = CustomerPatch::membership(update.membership)
            .with_provider_subscription_id(update.provider_subscription_id);

        let customer = self.repository.patch(&existing.id, &patch).await?;
        Ok(Some(customer))
    }

    async fn link_provider_customer(&self, link: LinkCustomer) -> Result<LinkOutcome, DomainError> {
        if let Some(existing) = self.repository.find_by_user_id(&link.user_id).await? {
            return self.patch_existing(&existing, &link).await;
        }

        let customer = Customer::linked(
            link.user_id.clone(),
            link.provider_customer_id.clone(),
            link.provider_subscription_id.clone(),
            link.membership,
        );

        match self.repository.insert(&customer).await {
            Ok(()) => Ok(LinkOutcome {
                customer,
                created: true,
            }),
            // A concurrent delivery created the customer first.
            Err(err) if err.code == ErrorCode::CustomerExists => {
                match self.repository.find_by_user_id(&link.user_id).await? {
                    Some(existing) => self.patch_existing(&existing, &link).await,
                    None => Err(err),
                }
            }
            Err(err) => Err(err),
        }
    }
}
