//! UpdateCustomerHandler - Command handler for explicit customer updates.
//!
//! Only the fields present in the patch change. This is the only path
//! besides Stripe webhooks that may alter a customer's membership.

use std::sync::Arc;

use crate::domain::foundation::UserId;
use crate::domain::membership::{Customer, CustomerError, CustomerPatch};
use crate::ports::CustomerRepository;

/// Command to update a user's customer.
#[derive(Debug, Clone)]
pub struct UpdateCustomerCommand {
    pub user_id: UserId,
    pub patch: CustomerPatch,
}

/// Result of successful update: the stored customer.
pub type UpdateCustomerResult = Customer;

/// Handler for partial customer updates.
pub struct UpdateCustomerHandler {
    repository: Arc<dyn CustomerRepository>,
}

impl UpdateCustomerHandler {
    pub fn new(repository: Arc<dyn CustomerRepository>) -> Self {
        Self { repository }
    }

    pub async fn handle(
        &self,
        cmd: UpdateCustomerCommand,
    ) -> Result<UpdateCustomerResult, CustomerError> {
        let existing = self
            .repository
            .find_by_user_id(&cmd.user_id)
            .await?
            .ok_or_else(|| CustomerError::not_found_for_user(cmd.user_id.clone()))?;

        if cmd.patch.is_empty() {
            return Ok(existing);
        }

        let customer = self.repository.patch(&existing.id, &cmd.patch).await?;

        tracing::info!(
            user_id = %customer.user_id,
            membership = %customer.membership,
            linked = customer.is_linked(),
            "Customer updated"
        );

        Ok(customer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::InMemoryCustomerRepository;
    use crate::domain::membership::MembershipTier;

    fn user(id: &str) -> UserId {
        UserId::new(id).unwrap()
    }

    async fn repo_with(customers: Vec<Customer>) -> Arc<InMemoryCustomerRepository> {
        let repo = Arc::new(InMemoryCustomerRepository::new());
        for customer in &customers {
            repo.insert(customer).await.unwrap();
        }
        repo
    }

    #[tokio::test]
    async fn updates_only_supplied_fields() {
        let repo = repo_with(vec![Customer::linked(
            user("u1"),
            "cus_1",
            "sub_1",
            MembershipTier::Free,
        )])
        .await;
        let handler = UpdateCustomerHandler::new(repo);

        let customer = handler
            .handle(UpdateCustomerCommand {
                user_id: user("u1"),
                patch: CustomerPatch::membership(MembershipTier::Pro),
            })
            .await
            .unwrap();

        assert_eq!(customer.membership, MembershipTier::Pro);
        assert_eq!(customer.provider_customer_id.as_deref(), Some("cus_1"));
        assert_eq!(customer.provider_subscription_id.as_deref(), Some("sub_1"));
    }

    #[tokio::test]
    async fn links_provider_ids() {
        let repo = repo_with(vec![Customer::new(user("u1"), MembershipTier::Free)]).await;
        let handler = UpdateCustomerHandler::new(repo);

        let customer = handler
            .handle(UpdateCustomerCommand {
                user_id: user("u1"),
                patch: CustomerPatch::default()
                    .with_provider_customer_id("cus_9")
                    .with_provider_subscription_id("sub_9"),
            })
            .await
            .unwrap();

        assert_eq!(customer.membership, MembershipTier::Free);
        assert_eq!(customer.provider_customer_id.as_deref(), Some("cus_9"));
        assert_eq!(customer.provider_subscription_id.as_deref(), Some("sub_9"));
    }

    #[tokio::test]
    async fn empty_patch_returns_customer_unchanged() {
        let original = Customer::new(user("u1"), MembershipTier::Free);
        let repo = repo_with(vec![original.clone()]).await;
        let handler = UpdateCustomerHandler::new(repo);

        let customer = handler
            .handle(UpdateCustomerCommand {
                user_id: user("u1"),
                patch: CustomerPatch::default(),
            })
            .await
            .unwrap();

        assert_eq!(customer, original);
    }

    #[tokio::test]
    async fn missing_customer_is_not_found() {
        let handler = UpdateCustomerHandler::new(Arc::new(InMemoryCustomerRepository::new()));

        let err = handler
            .handle(UpdateCustomerCommand {
                user_id: user("u1"),
                patch: CustomerPatch::membership(MembershipTier::Pro),
            })
            .await
            .unwrap_err();

        assert_eq!(err, CustomerError::NotFoundForUser(user("u1")));
    }

    #[tokio::test]
    async fn linking_taken_provider_customer_conflicts() {
        let repo = repo_with(vec![
            Customer::linked(user("u1"), "cus_1", "sub_1", MembershipTier::Pro),
            Customer::new(user("u2"), MembershipTier::Free),
        ])
        .await;
        let handler = UpdateCustomerHandler::new(repo);

        let err = handler
            .handle(UpdateCustomerCommand {
                user_id: user("u2"),
                patch: CustomerPatch::default().with_provider_customer_id("cus_1"),
            })
            .await
            .unwrap_err();

        assert_eq!(err, CustomerError::ProviderCustomerTaken("cus_1".to_string()));
    }
}
