//! In-memory customer repository.
//!
//! This adapter provides an in-memory implementation of the
//! `CustomerRepository` port. Useful for:
//! - Development without a database (`database.url = "memory"`)
//! - Handler and HTTP tests
//!
//! It enforces the same uniqueness rules as the PostgreSQL adapter. Each
//! operation holds the write lock for its whole read-modify-write.

use async_trait::async_trait;
use chrono::Utc;
use std::collections::HashMap;
use tokio::sync::RwLock;

use crate::domain::foundation::{CustomerId, DomainError, ErrorCode, UserId};
use crate::domain::membership::{Customer, CustomerPatch};
use crate::ports::CustomerRepository;

/// In-memory implementation of the CustomerRepository port.
#[derive(Default)]
pub struct InMemoryCustomerRepository {
    customers: RwLock<HashMap<CustomerId, Customer>>,
}

impl InMemoryCustomerRepository {
    /// Creates a new empty repository.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of stored customers.
    pub async fn len(&self) -> usize {
        self.customers.read().await.len()
    }

    /// Returns true if no customers are stored.
    pub async fn is_empty(&self) -> bool {
        self.customers.read().await.is_empty()
    }
}

fn provider_conflict(provider_customer_id: &str) -> DomainError {
    DomainError::new(
        ErrorCode::ProviderCustomerConflict,
        "Provider customer is already linked to another customer",
    )
    .with_detail("provider_customer_id", provider_customer_id)
}

#[async_trait]
impl CustomerRepository for InMemoryCustomerRepository {
    async fn find_by_user_id(&self, user_id: &UserId) -> Result<Option<Customer>, DomainError> {
        let customers = self.customers.read().await;
        Ok(customers.values().find(|c| &c.user_id == user_id).cloned())
    }

    async fn find_by_provider_customer_id(
        &self,
        provider_customer_id: &str,
    ) -> Result<Option<Customer>, DomainError> {
        let customers = self.customers.read().await;
        Ok(customers
            .values()
            .find(|c| c.provider_customer_id.as_deref() == Some(provider_customer_id))
            .cloned())
    }

    async fn insert(&self, customer: &Customer) -> Result<(), DomainError> {
        let mut customers = self.customers.write().await;

        if customers.values().any(|c| c.user_id == customer.user_id) {
            return Err(
                DomainError::new(ErrorCode::CustomerExists, "Customer already exists")
                    .with_detail("user_id", customer.user_id.as_str()),
            );
        }
        if let Some(provider_id) = customer.provider_customer_id.as_deref() {
            if customers
                .values()
                .any(|c| c.provider_customer_id.as_deref() == Some(provider_id))
            {
                return Err(provider_conflict(provider_id));
            }
        }

        customers.insert(customer.id, customer.clone());
        Ok(())
    }

    async fn patch(&self, id: &CustomerId, patch: &CustomerPatch) -> Result<Customer, DomainError> {
        let mut customers = self.customers.write().await;

        if let Some(provider_id) = patch.provider_customer_id.as_deref() {
            let taken = customers
                .values()
                .any(|c| &c.id != id && c.provider_customer_id.as_deref() == Some(provider_id));
            if taken {
                return Err(provider_conflict(provider_id));
            }
        }

        let customer = customers
            .get_mut(id)
            .ok_or_else(|| DomainError::new(ErrorCode::CustomerNotFound, "Customer not found"))?;
        patch.apply(customer, Utc::now());
        Ok(customer.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::membership::MembershipTier;

    fn user(id: &str) -> UserId {
        UserId::new(id).unwrap()
    }

    // ══════════════════════════════════════════════════════════════
    // Insert and lookup
    // ══════════════════════════════════════════════════════════════

    #[tokio::test]
    async fn insert_then_find_by_user_id() {
        let repo = InMemoryCustomerRepository::new();
        let customer = Customer::new(user("u1"), MembershipTier::Free);

        repo.insert(&customer).await.unwrap();

        let found = repo.find_by_user_id(&user("u1")).await.unwrap();
        assert_eq!(found, Some(customer));
    }

    #[tokio::test]
    async fn find_by_provider_customer_id_matches_linked_only() {
        let repo = InMemoryCustomerRepository::new();
        repo.insert(&Customer::new(user("u1"), MembershipTier::Free)).await.unwrap();
        repo.insert(&Customer::linked(user("u2"), "cus_2", "sub_2", MembershipTier::Pro))
            .await
            .unwrap();

        let found = repo.find_by_provider_customer_id("cus_2").await.unwrap().unwrap();
        assert_eq!(found.user_id, user("u2"));
        assert!(repo.find_by_provider_customer_id("cus_1").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn insert_rejects_duplicate_user() {
        let repo = InMemoryCustomerRepository::new();
        repo.insert(&Customer::new(user("u1"), MembershipTier::Free)).await.unwrap();

        let err = repo
            .insert(&Customer::new(user("u1"), MembershipTier::Pro))
            .await
            .unwrap_err();

        assert_eq!(err.code, ErrorCode::CustomerExists);
        assert_eq!(repo.len().await, 1);
    }

    #[tokio::test]
    async fn insert_rejects_duplicate_provider_customer() {
        let repo = InMemoryCustomerRepository::new();
        repo.insert(&Customer::linked(user("u1"), "cus_1", "sub_1", MembershipTier::Pro))
            .await
            .unwrap();

        let err = repo
            .insert(&Customer::linked(user("u2"), "cus_1", "sub_2", MembershipTier::Pro))
            .await
            .unwrap_err();

        assert_eq!(err.code, ErrorCode::ProviderCustomerConflict);
    }

    #[tokio::test]
    async fn unlinked_customers_do_not_conflict() {
        let repo = InMemoryCustomerRepository::new();
        repo.insert(&Customer::new(user("u1"), MembershipTier::Free)).await.unwrap();
        repo.insert(&Customer::new(user("u2"), MembershipTier::Free)).await.unwrap();

        assert_eq!(repo.len().await, 2);
    }

    // ══════════════════════════════════════════════════════════════
    // Patch
    // ══════════════════════════════════════════════════════════════

    #[tokio::test]
    async fn patch_updates_stored_customer() {
        let repo = InMemoryCustomerRepository::new();
        let customer = Customer::new(user("u1"), MembershipTier::Free);
        repo.insert(&customer).await.unwrap();

        let patched = repo
            .patch(&customer.id, &CustomerPatch::membership(MembershipTier::Pro))
            .await
            .unwrap();

        assert_eq!(patched.membership, MembershipTier::Pro);
        let stored = repo.find_by_user_id(&user("u1")).await.unwrap().unwrap();
        assert_eq!(stored, patched);
    }

    #[tokio::test]
    async fn repeated_patch_leaves_record_unchanged() {
        let repo = InMemoryCustomerRepository::new();
        let customer = Customer::linked(user("u1"), "cus_1", "sub_1", MembershipTier::Free);
        repo.insert(&customer).await.unwrap();
        let patch = CustomerPatch::membership(MembershipTier::Pro).with_provider_subscription_id("sub_2");

        let once = repo.patch(&customer.id, &patch).await.unwrap();
        tokio::time::sleep(std::time::Duration::from_millis(5)).await;
        let twice = repo.patch(&customer.id, &patch).await.unwrap();

        assert_eq!(once, twice);
        assert_eq!(repo.find_by_user_id(&user("u1")).await.unwrap(), Some(once));
    }

    #[tokio::test]
    async fn patch_unknown_customer_is_not_found() {
        let repo = InMemoryCustomerRepository::new();

        let err = repo
            .patch(&CustomerId::new(), &CustomerPatch::membership(MembershipTier::Pro))
            .await
            .unwrap_err();

        assert_eq!(err.code, ErrorCode::CustomerNotFound);
    }

    #[tokio::test]
    async fn patch_rejects_provider_id_owned_by_other_customer() {
        let repo = InMemoryCustomerRepository::new();
        repo.insert(&Customer::linked(user("u1"), "cus_1", "sub_1", MembershipTier::Pro))
            .await
            .unwrap();
        let other = Customer::new(user("u2"), MembershipTier::Free);
        repo.insert(&other).await.unwrap();

        let err = repo
            .patch(&other.id, &CustomerPatch::default().with_provider_customer_id("cus_1"))
            .await
            .unwrap_err();

        assert_eq!(err.code, ErrorCode::ProviderCustomerConflict);
    }

    #[tokio::test]
    async fn patch_may_repeat_own_provider_id() {
        let repo = InMemoryCustomerRepository::new();
        let customer = Customer::linked(user("u1"), "cus_1", "sub_1", MembershipTier::Free);
        repo.insert(&customer).await.unwrap();

        let patch = CustomerPatch::membership(MembershipTier::Pro).with_provider_customer_id("cus_1");
        let patched = repo.patch(&customer.id, &patch).await.unwrap();

        assert_eq!(patched.provider_customer_id.as_deref(), Some("cus_1"));
    }
}
